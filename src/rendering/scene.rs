//! Retained scene graph.
//!
//! Nodes store geometry in plane (projected, untransformed) coordinates plus
//! the zoom-dependent attributes derived from the current transform. A
//! transform change rewrites those attributes in place; anything structural
//! goes through a full rebuild in [`super::renderer::SceneRenderer`].

use crate::core::config::RenderConfig;
use crate::core::constants::{PULSE_END_RADIUS, PULSE_START_RADIUS};
use crate::core::geo::Point;
use crate::core::viewport::{Transform, ZoomScales};
use crate::data::asset::AssetClass;
use crate::data::poi::PoiKind;
use crate::rendering::curve::PathCommand;
use crate::rendering::icons::Icon;
use crate::rendering::style::{palette, poi_opacity, Rgba};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Background,
    Countries,
    Trails,
    Pois,
    Assets,
}

/// Which optional overlays are on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LayerToggles {
    pub trails: bool,
    pub weather: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryNode {
    pub name: String,
    /// Projected rings
    pub rings: Vec<Vec<Point>>,
    pub fill: Rgba,
    pub hover_fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f64,
    pub hovered: bool,
}

impl CountryNode {
    pub fn current_fill(&self) -> Rgba {
        if self.hovered {
            self.hover_fill
        } else {
            self.fill
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrailNode {
    pub asset_id: String,
    pub path: Vec<PathCommand>,
    pub color: Rgba,
    pub width: f64,
    /// Dash and gap lengths
    pub dash: [f64; 2],
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoiNode {
    /// Upper-cased display name
    pub label: String,
    pub kind: PoiKind,
    pub anchor: Point,
    pub radius: f64,
    pub fill: Rgba,
    pub stroke_width: f64,
    pub label_color: Rgba,
    pub font_size: f64,
    pub label_dy: f64,
    pub opacity: f64,
}

impl PoiNode {
    fn apply_zoom(&mut self, zoom: &ZoomScales) {
        let city = self.kind == PoiKind::City;
        self.radius = if city { 1.4 } else { 0.8 } * zoom.visual * 1.5;
        self.font_size = if city { 2.8 } else { 2.2 } * zoom.label * 3.5;
        self.stroke_width = 0.1 * zoom.visual;
        self.label_dy = -4.5 * zoom.visual;
        self.opacity = poi_opacity(self.kind, zoom.k);
    }
}

/// Expanding ring drawn around alert-status assets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseRing {
    pub start_radius: f64,
    pub end_radius: f64,
    pub period: Duration,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl PulseRing {
    fn new(visual: f64, period: Duration) -> Self {
        Self {
            start_radius: PULSE_START_RADIUS * visual,
            end_radius: PULSE_END_RADIUS * visual,
            period,
            stroke_width: 2.0 * visual,
            opacity: 0.8,
        }
    }

    /// Radius `elapsed` into the loop
    pub fn radius_at(&self, elapsed: Duration) -> f64 {
        if self.period.is_zero() {
            return self.start_radius;
        }
        let t = (elapsed.as_secs_f64() % self.period.as_secs_f64()) / self.period.as_secs_f64();
        self.start_radius + (self.end_radius - self.start_radius) * t
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetNode {
    pub id: String,
    pub name: String,
    pub class: AssetClass,
    pub anchor: Point,
    pub color: Rgba,
    pub icon: &'static Icon,
    /// Degrees, `None` for icons that stay upright
    pub rotation: Option<f64>,
    pub icon_scale: f64,
    pub label_font: f64,
    pub label_offset: Point,
    pub label_color: Rgba,
    pub hovered: bool,
    pub pulse: Option<PulseRing>,
}

impl AssetNode {
    fn apply_zoom(&mut self, zoom: &ZoomScales, config: &RenderConfig) {
        if self.hovered {
            self.icon_scale = zoom.visual * config.icon_hover_scale;
            self.label_font = 7.0 * zoom.label * 7.0;
            self.label_color = Rgba::WHITE;
        } else {
            self.icon_scale = zoom.visual * config.icon_scale;
            self.label_font = 5.0 * zoom.label * 6.0;
            self.label_color = self.color;
        }
        self.label_offset = Point::new(80.0 * zoom.visual, 20.0 * zoom.visual);
        if let Some(pulse) = &mut self.pulse {
            *pulse = PulseRing::new(zoom.visual, pulse.period);
        }
    }

    /// Screen-space radius of the icon under `transform`
    pub fn hit_radius(&self, transform: &Transform) -> f64 {
        self.icon.radius * self.icon_scale * transform.k
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub size: Point,
    pub transform: Transform,
    pub zoom: ZoomScales,
    pub background: Rgba,
    pub countries: Vec<CountryNode>,
    /// `None` while the trails overlay is off
    pub trails: Option<Vec<TrailNode>>,
    pub pois: Vec<PoiNode>,
    pub assets: Vec<AssetNode>,
    pub toggles: LayerToggles,
    generation: u64,
    config: RenderConfig,
}

impl Scene {
    pub fn empty(size: Point, config: RenderConfig) -> Self {
        let transform = Transform::identity();
        Self {
            size,
            transform,
            zoom: ZoomScales::from_transform(&transform, &config),
            background: palette::BACKGROUND,
            countries: Vec::new(),
            trails: None,
            pois: Vec::new(),
            assets: Vec::new(),
            toggles: LayerToggles::default(),
            generation: 0,
            config,
        }
    }

    /// Number of full rebuilds so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub(crate) fn begin_rebuild(&mut self, size: Point, transform: Transform, toggles: LayerToggles) {
        self.size = size;
        self.transform = transform;
        self.zoom = ZoomScales::from_transform(&transform, &self.config);
        self.toggles = toggles;
        self.countries.clear();
        self.trails = None;
        self.pois.clear();
        self.assets.clear();
        self.generation += 1;
    }

    pub(crate) fn pulse_ring(&self) -> PulseRing {
        PulseRing::new(self.zoom.visual, Duration::from_millis(self.config.pulse_period_ms))
    }

    /// Layers present, bottom to top
    pub fn layers(&self) -> Vec<LayerKind> {
        let mut layers = vec![LayerKind::Background];
        if !self.countries.is_empty() {
            layers.push(LayerKind::Countries);
        }
        if self.trails.is_some() {
            layers.push(LayerKind::Trails);
        }
        layers.push(LayerKind::Pois);
        layers.push(LayerKind::Assets);
        layers
    }

    pub fn asset(&self, id: &str) -> Option<&AssetNode> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Updates the root transform and every zoom-dependent attribute.
    /// Never touches structure or `generation`.
    pub fn apply_zoom(&mut self, transform: &Transform) {
        self.transform = *transform;
        self.zoom = ZoomScales::from_transform(transform, &self.config);
        let zoom = self.zoom;

        for country in &mut self.countries {
            country.stroke_width = 0.7 / zoom.k;
        }
        if let Some(trails) = &mut self.trails {
            for trail in trails {
                trail.width = 1.2 / zoom.k;
                trail.dash = [4.0 / zoom.k, 3.0 / zoom.k];
            }
        }
        for poi in &mut self.pois {
            poi.apply_zoom(&zoom);
        }
        for asset in &mut self.assets {
            asset.apply_zoom(&zoom, &self.config);
        }
    }

    /// Marks one asset as hovered (or none). Returns whether anything changed.
    pub fn set_hovered_asset(&mut self, id: Option<&str>) -> bool {
        let zoom = self.zoom;
        let mut changed = false;
        for asset in &mut self.assets {
            let hovered = Some(asset.id.as_str()) == id;
            if asset.hovered != hovered {
                asset.hovered = hovered;
                asset.apply_zoom(&zoom, &self.config);
                changed = true;
            }
        }
        changed
    }

    pub fn set_hovered_country(&mut self, name: Option<&str>) -> bool {
        let mut changed = false;
        for country in &mut self.countries {
            let hovered = Some(country.name.as_str()) == name;
            if country.hovered != hovered {
                country.hovered = hovered;
                changed = true;
            }
        }
        changed
    }

    pub(crate) fn push_poi(&mut self, label: String, kind: PoiKind, anchor: Point) {
        let tactical = kind != PoiKind::City;
        let mut node = PoiNode {
            label,
            kind,
            anchor,
            radius: 0.0,
            fill: if tactical { palette::TACTICAL_POI } else { palette::CITY_MARKER },
            stroke_width: 0.0,
            label_color: if tactical { palette::TACTICAL_POI } else { palette::CITY_LABEL },
            font_size: 0.0,
            label_dy: 0.0,
            opacity: 0.0,
        };
        node.apply_zoom(&self.zoom);
        self.pois.push(node);
    }

    pub(crate) fn push_asset(&mut self, mut node: AssetNode) {
        node.apply_zoom(&self.zoom, &self.config);
        self.assets.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_loops() {
        let ring = PulseRing::new(1.0, Duration::from_millis(2500));
        assert_eq!(ring.radius_at(Duration::ZERO), 20.0);
        assert!((ring.radius_at(Duration::from_millis(1250)) - 35.0).abs() < 1e-9);
        assert_eq!(ring.radius_at(Duration::from_millis(2500)), 20.0);
    }

    #[test]
    fn test_poi_attributes_follow_zoom() {
        let mut scene = Scene::empty(Point::new(800.0, 600.0), RenderConfig::default());
        scene.push_poi("TEHRAN".into(), PoiKind::City, Point::new(10.0, 10.0));
        scene.push_poi("KHARG ISLAND".into(), PoiKind::Base, Point::new(20.0, 20.0));
        assert_eq!(scene.pois[0].opacity, 0.35);
        assert_eq!(scene.pois[1].opacity, 0.0);
        assert!((scene.pois[0].radius - 2.1).abs() < 1e-9);

        scene.apply_zoom(&Transform::new(0.0, 0.0, 8.0));
        assert_eq!(scene.pois[0].opacity, 1.0);
        assert_eq!(scene.pois[1].opacity, 1.0);
        let visual = 1.0 / 8_f64.powf(0.65);
        assert!((scene.pois[1].radius - 0.8 * visual * 1.5).abs() < 1e-9);
        assert_eq!(scene.generation(), 0);
    }

    #[test]
    fn test_layer_order() {
        let mut scene = Scene::empty(Point::new(800.0, 600.0), RenderConfig::default());
        assert_eq!(
            scene.layers(),
            vec![LayerKind::Background, LayerKind::Pois, LayerKind::Assets]
        );
        scene.trails = Some(Vec::new());
        assert_eq!(scene.layers()[1], LayerKind::Trails);
    }
}
