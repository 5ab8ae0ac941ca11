//! Paints a [`Scene`] with egui shapes.

use crate::core::geo::Point;
use crate::rendering::curve::flatten;
use crate::rendering::scene::{AssetNode, Scene};
use crate::rendering::style::Rgba;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};
use egui::epaint::PathShape;
use std::time::Duration;

// Samples per cubic segment when flattening trails
const CURVE_STEPS: usize = 8;

pub fn color(rgba: Rgba, opacity: f64) -> Color32 {
    let alpha = (rgba.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, alpha)
}

/// Maps scene (plane) coordinates to screen positions inside `rect`
#[derive(Debug, Clone, Copy)]
struct ScreenMap<'a> {
    scene: &'a Scene,
    origin: Pos2,
}

impl ScreenMap<'_> {
    fn pos(&self, point: &Point) -> Pos2 {
        let p = self.scene.transform.apply(point);
        Pos2::new(self.origin.x + p.x as f32, self.origin.y + p.y as f32)
    }

    /// Plane length to pixels
    fn len(&self, length: f64) -> f32 {
        (length * self.scene.transform.k) as f32
    }
}

/// Draws every layer of `scene` into `rect`. `elapsed` drives the alert pulses.
pub fn paint_scene(painter: &Painter, rect: Rect, scene: &Scene, elapsed: Duration) {
    let map = ScreenMap {
        scene,
        origin: rect.min,
    };
    painter.rect_filled(rect, 0.0, color(scene.background, 1.0));

    // egui fills paths as convex fans, so countries are outlined and only
    // the hovered one gets a heavier stroke
    for country in &scene.countries {
        let stroke = if country.hovered {
            Stroke::new(map.len(country.stroke_width * 3.0).max(1.5), color(country.hover_fill, 1.0))
        } else {
            Stroke::new(map.len(country.stroke_width).max(0.5), color(country.stroke, 1.0))
        };
        for ring in &country.rings {
            if ring.len() < 3 {
                continue;
            }
            let points: Vec<Pos2> = ring.iter().map(|p| map.pos(p)).collect();
            painter.add(Shape::Path(PathShape::closed_line(points, stroke)));
        }
    }

    if let Some(trails) = &scene.trails {
        for trail in trails {
            let points: Vec<Pos2> = flatten(&trail.path, CURVE_STEPS)
                .iter()
                .map(|p| map.pos(p))
                .collect();
            let stroke = Stroke::new(map.len(trail.width).max(0.5), color(trail.color, trail.opacity));
            painter.extend(Shape::dashed_line(
                &points,
                stroke,
                map.len(trail.dash[0]).max(1.0),
                map.len(trail.dash[1]).max(1.0),
            ));
        }
    }

    for poi in &scene.pois {
        if poi.opacity <= 0.0 {
            continue;
        }
        let center = map.pos(&poi.anchor);
        painter.circle_filled(center, map.len(poi.radius).max(1.0), color(poi.fill, poi.opacity));
        painter.text(
            center + egui::vec2(0.0, map.len(poi.label_dy)),
            Align2::CENTER_BOTTOM,
            &poi.label,
            FontId::monospace(map.len(poi.font_size).max(6.0)),
            color(poi.label_color, poi.opacity),
        );
    }

    for asset in &scene.assets {
        paint_asset(painter, &map, asset, elapsed);
    }
}

fn paint_asset(painter: &Painter, map: &ScreenMap<'_>, asset: &AssetNode, elapsed: Duration) {
    let center = map.pos(&asset.anchor);

    if let Some(pulse) = &asset.pulse {
        painter.circle_stroke(
            center,
            map.len(pulse.radius_at(elapsed)),
            Stroke::new(map.len(pulse.stroke_width).max(1.0), color(asset.color, pulse.opacity)),
        );
    }

    let scale = map.len(asset.icon_scale) as f64;
    let (sin, cos) = asset.rotation.unwrap_or(0.0).to_radians().sin_cos();
    let fill = color(asset.color, 1.0);
    let stroke = Stroke::new((asset.icon.stroke_width * scale) as f32, Color32::BLACK);
    for outline in asset.icon.outline {
        let points: Vec<Pos2> = outline
            .iter()
            .map(|&(x, y)| {
                let (rx, ry) = (x * cos - y * sin, x * sin + y * cos);
                center + egui::vec2((rx * scale) as f32, (ry * scale) as f32)
            })
            .collect();
        painter.add(Shape::Path(PathShape {
            points,
            closed: true,
            fill,
            stroke,
        }));
    }

    painter.text(
        center + egui::vec2(map.len(asset.label_offset.x), map.len(asset.label_offset.y)),
        Align2::LEFT_CENTER,
        &asset.name,
        FontId::monospace(map.len(asset.label_font).max(6.0)),
        color(asset.label_color, 1.0),
    );
}
