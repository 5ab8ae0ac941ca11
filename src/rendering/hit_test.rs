//! Pointer hit-testing against the rendered scene.

use crate::core::geo::{LatLng, Point};
use crate::core::projection::Projection;
use crate::core::viewport::Transform;
use crate::data::geojson::{CountryShape, Geography};
use crate::rendering::scene::{AssetNode, Scene};
use geo::Contains;

/// Topmost asset whose icon covers the screen-space `pointer`
pub fn asset_at<'a>(scene: &'a Scene, pointer: &Point) -> Option<&'a AssetNode> {
    scene.assets.iter().rev().find(|node| {
        let center = scene.transform.apply(&node.anchor);
        center.distance_to(pointer) <= node.hit_radius(&scene.transform)
    })
}

/// Geographic location under a screen-space pointer, if any
pub fn location_at(
    projection: &Projection,
    transform: &Transform,
    pointer: &Point,
) -> Option<LatLng> {
    projection.unproject(&transform.invert(pointer))
}

/// Country containing the geographic `location`
pub fn country_containing<'a>(geography: &'a Geography, location: &LatLng) -> Option<&'a CountryShape> {
    let point = geo::Point::new(location.lng, location.lat);
    geography
        .countries()
        .iter()
        .find(|country| country.shape.contains(&point))
}

/// Country under a screen-space pointer
pub fn country_at<'a>(
    geography: &'a Geography,
    projection: &Projection,
    transform: &Transform,
    pointer: &Point,
) -> Option<(&'a CountryShape, LatLng)> {
    let location = location_at(projection, transform, pointer)?;
    country_containing(geography, &location).map(|country| (country, location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RenderConfig;
    use crate::data::asset::initial_assets;
    use crate::rendering::renderer::{SceneInput, SceneRenderer};
    use crate::rendering::scene::LayerToggles;
    use chrono::Utc;

    const SQUARE: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "Squareland"},
         "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}}
    ]}"#;

    #[test]
    fn test_country_under_pointer() {
        let geography = Geography::from_str(SQUARE).unwrap();
        let projection = Projection::for_viewport(800.0, 600.0);
        let transform = Transform::new(-50.0, 20.0, 2.0);

        let inside = projection.project(&LatLng::new(5.0, 5.0)).unwrap();
        let (country, location) =
            country_at(&geography, &projection, &transform, &transform.apply(&inside)).unwrap();
        assert_eq!(country.name, "Squareland");
        assert!((location.lat - 5.0).abs() < 1e-6);

        let outside = projection.project(&LatLng::new(-5.0, 5.0)).unwrap();
        assert!(country_at(&geography, &projection, &transform, &transform.apply(&outside)).is_none());
    }

    #[test]
    fn test_topmost_asset_wins() {
        let mut assets = initial_assets(Utc::now());
        // stack two assets on one spot; the later one is drawn on top
        let spot = assets[0].position;
        assets[1].position = spot;
        let projection = Projection::for_viewport(800.0, 600.0);
        let mut renderer = SceneRenderer::new(projection.size, RenderConfig::default());
        renderer.render(&SceneInput {
            assets: assets.iter().collect(),
            pois: &[],
            geography: None,
            projection: &projection,
            transform: Transform::identity(),
            toggles: LayerToggles::default(),
            content_revision: 1,
            geography_revision: 0,
        });

        let scene = renderer.scene();
        let pointer = projection.project(&spot).unwrap();
        assert_eq!(asset_at(scene, &pointer).unwrap().id, assets[1].id);
        assert!(asset_at(scene, &Point::new(-1000.0, -1000.0)).is_none());
    }
}
