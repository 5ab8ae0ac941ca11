use crate::core::config::RenderConfig;
use crate::core::geo::Point;
use crate::core::projection::Projection;
use crate::core::viewport::Transform;
use crate::data::asset::Asset;
use crate::data::geojson::Geography;
use crate::data::poi::PointOfInterest;
use crate::rendering::curve::curve_basis;
use crate::rendering::icons::icon_for;
use crate::rendering::scene::{AssetNode, CountryNode, LayerToggles, Scene, TrailNode};
use crate::rendering::style::{asset_color, palette};

/// Everything the renderer reads for one frame
pub struct SceneInput<'a> {
    pub assets: Vec<&'a Asset>,
    pub pois: &'a [PointOfInterest],
    pub geography: Option<&'a Geography>,
    pub projection: &'a Projection,
    pub transform: Transform,
    pub toggles: LayerToggles,
    /// Changes whenever the asset set or any asset moves
    pub content_revision: u64,
    pub geography_revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct StructureKey {
    content: u64,
    geography: u64,
    toggles: LayerToggles,
    projection: Projection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Unchanged,
    ZoomApplied,
    Rebuilt,
}

/// Keeps the scene in sync with its inputs, rebuilding only on structural change
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    scene: Scene,
    key: Option<StructureKey>,
    hovered_asset: Option<String>,
    hovered_country: Option<String>,
}

impl SceneRenderer {
    pub fn new(size: Point, config: RenderConfig) -> Self {
        Self {
            scene: Scene::empty(size, config),
            key: None,
            hovered_asset: None,
            hovered_country: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn render(&mut self, input: &SceneInput<'_>) -> RenderOutcome {
        let key = StructureKey {
            content: input.content_revision,
            geography: input.geography_revision,
            toggles: input.toggles,
            projection: *input.projection,
        };

        if self.key.as_ref() != Some(&key) {
            self.rebuild(input);
            self.key = Some(key);
            return RenderOutcome::Rebuilt;
        }
        if self.scene.transform != input.transform {
            self.scene.apply_zoom(&input.transform);
            return RenderOutcome::ZoomApplied;
        }
        RenderOutcome::Unchanged
    }

    /// Forces a rebuild on the next `render`
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn set_hovered_asset(&mut self, id: Option<&str>) -> bool {
        self.hovered_asset = id.map(str::to_string);
        self.scene.set_hovered_asset(id)
    }

    pub fn set_hovered_country(&mut self, name: Option<&str>) -> bool {
        self.hovered_country = name.map(str::to_string);
        self.scene.set_hovered_country(name)
    }

    fn rebuild(&mut self, input: &SceneInput<'_>) {
        let projection = input.projection;
        self.scene
            .begin_rebuild(projection.size, input.transform, input.toggles);
        let k = input.transform.k;

        if let Some(geography) = input.geography {
            let (fill, hover_fill) = if input.toggles.weather {
                (palette::COUNTRY_FILL_WEATHER, palette::COUNTRY_HOVER_WEATHER)
            } else {
                (palette::COUNTRY_FILL, palette::COUNTRY_HOVER)
            };
            for country in geography.countries() {
                self.scene.countries.push(CountryNode {
                    name: country.name.clone(),
                    rings: country.rings().map(|ring| projection.project_ring(&ring)).collect(),
                    fill,
                    hover_fill,
                    stroke: palette::COUNTRY_STROKE,
                    stroke_width: 0.7 / k,
                    hovered: self.hovered_country.as_deref() == Some(country.name.as_str()),
                });
            }
        }

        if input.toggles.trails {
            let opacity = self.scene.config().trail_opacity;
            let trails = input
                .assets
                .iter()
                .filter(|asset| asset.trail.len() > 1)
                .map(|asset| {
                    let points: Vec<Point> =
                        asset.trail.iter().filter_map(|p| projection.project(p)).collect();
                    TrailNode {
                        asset_id: asset.id.clone(),
                        path: curve_basis(&points),
                        color: asset_color(asset),
                        width: 1.2 / k,
                        dash: [4.0 / k, 3.0 / k],
                        opacity,
                    }
                })
                .filter(|trail| !trail.path.is_empty())
                .collect();
            self.scene.trails = Some(trails);
        }

        for poi in input.pois {
            if let Some(anchor) = projection.project(&poi.position) {
                self.scene.push_poi(poi.name.to_uppercase(), poi.kind, anchor);
            }
        }

        for asset in &input.assets {
            let Some(anchor) = projection.project(&asset.position) else {
                log::warn!("asset {} has no projected position", asset.id);
                continue;
            };
            let icon = icon_for(asset.class);
            let color = asset_color(asset);
            let pulse = asset.is_alert().then(|| self.scene.pulse_ring());
            self.scene.push_asset(AssetNode {
                id: asset.id.clone(),
                name: asset.name.clone(),
                class: asset.class,
                anchor,
                color,
                icon,
                rotation: icon.rotates.then(|| asset.heading()),
                icon_scale: 0.0,
                label_font: 0.0,
                label_offset: Point::default(),
                label_color: color,
                hovered: self.hovered_asset.as_deref() == Some(asset.id.as_str()),
                pulse,
            });
        }

        log::debug!(
            "scene rebuilt (generation {}): {} countries, {} pois, {} assets",
            self.scene.generation(),
            self.scene.countries.len(),
            self.scene.pois.len(),
            self.scene.assets.len()
        );
    }
}
