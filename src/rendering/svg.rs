//! Standalone SVG export of a scene.

use crate::rendering::curve::to_svg_path;
use crate::rendering::scene::{AssetNode, Scene};
use std::fmt::Write;

const FONT: &str = "font-family=\"Orbitron, sans-serif\" font-weight=\"900\"";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serializes the scene as an SVG document
pub fn to_svg(scene: &Scene) -> crate::Result<String> {
    let mut out = String::new();
    write_scene(&mut out, scene).map_err(|e| crate::Error::Render(e.to_string()))?;
    Ok(out)
}

fn write_scene(out: &mut String, scene: &Scene) -> std::fmt::Result {
    let (w, h) = (scene.size.x, scene.size.y);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{}"/>"#,
        scene.background.to_hex()
    )?;
    writeln!(out, r#"<g transform="{}">"#, scene.transform.to_svg())?;

    if !scene.countries.is_empty() {
        writeln!(out, r#"<g class="countries">"#)?;
        for country in &scene.countries {
            let mut d = String::new();
            for ring in &country.rings {
                for (i, p) in ring.iter().enumerate() {
                    write!(d, "{}{},{}", if i == 0 { 'M' } else { 'L' }, p.x, p.y)?;
                }
                d.push('Z');
            }
            writeln!(
                out,
                r#"<path class="country" data-name="{}" d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                escape(&country.name),
                d,
                country.current_fill().to_hex(),
                country.stroke.to_hex(),
                country.stroke_width
            )?;
        }
        writeln!(out, "</g>")?;
    }

    if let Some(trails) = &scene.trails {
        writeln!(out, r#"<g class="asset-trails">"#)?;
        for trail in trails {
            writeln!(
                out,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-dasharray="{},{}" opacity="{}"/>"#,
                to_svg_path(&trail.path),
                trail.color.to_hex(),
                trail.width,
                trail.dash[0],
                trail.dash[1],
                trail.opacity
            )?;
        }
        writeln!(out, "</g>")?;
    }

    writeln!(out, r#"<g class="pois">"#)?;
    for poi in &scene.pois {
        writeln!(
            out,
            r##"<g class="poi" transform="translate({}, {})" opacity="{}"><circle r="{}" fill="{}" stroke="#000" stroke-width="{}"/><text dy="{}" text-anchor="middle" fill="{}" font-size="{}px" {}>{}</text></g>"##,
            poi.anchor.x,
            poi.anchor.y,
            poi.opacity,
            poi.radius,
            poi.fill.to_hex(),
            poi.stroke_width,
            poi.label_dy,
            poi.label_color.to_hex(),
            poi.font_size,
            FONT,
            escape(&poi.label)
        )?;
    }
    writeln!(out, "</g>")?;

    for asset in &scene.assets {
        write_asset(out, asset)?;
    }

    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")
}

fn write_asset(out: &mut String, asset: &AssetNode) -> std::fmt::Result {
    writeln!(
        out,
        r#"<g class="asset" data-id="{}" transform="translate({}, {})">"#,
        escape(&asset.id),
        asset.anchor.x,
        asset.anchor.y
    )?;
    let rotate = asset
        .rotation
        .map(|deg| format!(r#" transform="rotate({})""#, deg))
        .unwrap_or_default();
    writeln!(
        out,
        r##"<g class="asset-icon-group" transform="scale({})"><path class="asset-path" d="{}" fill="{}" stroke="#fff" stroke-width="{}"{}/></g>"##,
        asset.icon_scale,
        asset.icon.path,
        asset.color.to_hex(),
        asset.icon.stroke_width,
        rotate
    )?;
    writeln!(
        out,
        r#"<text class="asset-label" x="{}" y="{}" fill="{}" font-size="{}px" {}>{}</text>"#,
        asset.label_offset.x,
        asset.label_offset.y,
        asset.label_color.to_hex(),
        asset.label_font,
        FONT,
        escape(&asset.name)
    )?;
    if let Some(pulse) = &asset.pulse {
        writeln!(
            out,
            r#"<circle r="{from}" fill="none" stroke="{}" stroke-width="{}" opacity="{}"><animate attributeName="r" from="{from}" to="{to}" dur="{}s" repeatCount="indefinite"/></circle>"#,
            asset.color.to_hex(),
            pulse.stroke_width,
            pulse.opacity,
            pulse.period.as_secs_f64(),
            from = pulse.start_radius,
            to = pulse.end_radius,
        )?;
    }
    writeln!(out, "</g>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RenderConfig;
    use crate::core::projection::Projection;
    use crate::core::viewport::Transform;
    use crate::data::asset::initial_assets;
    use crate::data::poi::strategic_pois;
    use crate::rendering::renderer::{SceneInput, SceneRenderer};
    use crate::rendering::scene::LayerToggles;
    use chrono::Utc;

    #[test]
    fn test_svg_document() {
        let assets = initial_assets(Utc::now());
        let projection = Projection::for_viewport(800.0, 600.0);
        let mut renderer = SceneRenderer::new(projection.size, RenderConfig::default());
        renderer.render(&SceneInput {
            assets: assets.iter().collect(),
            pois: strategic_pois(),
            geography: None,
            projection: &projection,
            transform: Transform::identity(),
            toggles: LayerToggles { trails: true, weather: false },
            content_revision: 1,
            geography_revision: 0,
        });

        let svg = to_svg(renderer.scene()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("STRAIT OF HORMUZ"));
        assert!(svg.contains(r#"repeatCount="indefinite""#));
        assert!(svg.contains(r#"dur="2.5s""#));
        assert!(svg.contains("#ef4444"));
        assert_eq!(svg.matches(r#"class="asset""#).count(), assets.len());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("A & B <C>"), "A &amp; B &lt;C&gt;");
    }
}
