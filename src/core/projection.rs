//! Cylindrical (Mercator) projection parameterized by viewport size.
//!
//! The projection is a plain value: rebuild it when the viewport resizes or
//! the geography changes, never mutate it in place.

use crate::core::config::ProjectionConfig;
use crate::core::geo::{LatLng, Point, MAX_LATITUDE};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Pixels per radian
    pub scale: f64,
    /// Pixel position of (0°, 0°)
    pub translate: Point,
    /// Viewport the projection was built for
    pub size: Point,
}

impl Projection {
    /// Builds the default projection for a viewport: scale `width / 6.2`,
    /// origin at `(width / 2, height / 1.5)`.
    pub fn for_viewport(width: f64, height: f64) -> Self {
        Self::with_config(width, height, &ProjectionConfig::default())
    }

    pub fn with_config(width: f64, height: f64, config: &ProjectionConfig) -> Self {
        Self {
            scale: width / config.scale_divisor,
            translate: Point::new(width / 2.0, height / config.vertical_origin_divisor),
            size: Point::new(width, height),
        }
    }

    /// Projects a geographic coordinate to plane coordinates.
    ///
    /// Longitudes wrap into [-180, 180]; latitudes are clamped to the
    /// Mercator domain. Returns `None` for non-finite input.
    pub fn project(&self, lat_lng: &LatLng) -> Option<Point> {
        if !lat_lng.lat.is_finite() || !lat_lng.lng.is_finite() {
            return None;
        }

        let lambda = LatLng::wrap_lng(lat_lng.lng).to_radians();
        let phi = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let y = (FRAC_PI_4 + phi / 2.0).tan().ln();

        let point = Point::new(
            self.translate.x + self.scale * lambda,
            self.translate.y - self.scale * y,
        );
        point.is_finite().then_some(point)
    }

    /// Inverse of [`project`](Self::project).
    ///
    /// Returns `None` when the plane point lies outside the projected world
    /// (beyond the antimeridian on either side) or is not finite. Callers
    /// treat `None` as "no location under pointer".
    pub fn unproject(&self, point: &Point) -> Option<LatLng> {
        if !point.is_finite() || self.scale <= 0.0 {
            return None;
        }

        let lambda = (point.x - self.translate.x) / self.scale;
        let y = (self.translate.y - point.y) / self.scale;
        let lng = lambda.to_degrees();
        if !(-180.0..=180.0).contains(&lng) {
            return None;
        }

        let lat = (2.0 * y.exp().atan() - FRAC_PI_2).to_degrees();
        if !lat.is_finite() || lat.abs() > MAX_LATITUDE + 1e-9 {
            return None;
        }

        Some(LatLng::new(lat, lng))
    }

    /// Projects a ring of coordinates, dropping points that do not project.
    pub fn project_ring(&self, ring: &[LatLng]) -> Vec<Point> {
        ring.iter().filter_map(|c| self.project(c)).collect()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::for_viewport(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_placement() {
        let projection = Projection::for_viewport(1240.0, 600.0);
        assert!((projection.scale - 200.0).abs() < 1e-9);

        let origin = projection.project(&LatLng::new(0.0, 0.0)).unwrap();
        assert!((origin.x - 620.0).abs() < 1e-9);
        assert!((origin.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_north_is_up_and_east_is_right() {
        let projection = Projection::for_viewport(800.0, 600.0);
        let origin = projection.project(&LatLng::new(0.0, 0.0)).unwrap();
        let north_east = projection.project(&LatLng::new(10.0, 10.0)).unwrap();

        assert!(north_east.x > origin.x);
        assert!(north_east.y < origin.y);
    }

    #[test]
    fn test_round_trip() {
        let projection = Projection::for_viewport(1024.0, 768.0);
        let kyiv = LatLng::new(50.4501, 30.5234);
        let point = projection.project(&kyiv).unwrap();
        let back = projection.unproject(&point).unwrap();

        assert!((back.lat - kyiv.lat).abs() < 1e-9);
        assert!((back.lng - kyiv.lng).abs() < 1e-9);
    }

    #[test]
    fn test_unproject_outside_domain() {
        let projection = Projection::for_viewport(1024.0, 768.0);
        let far_left = Point::new(projection.translate.x - projection.scale * 4.0, 300.0);

        assert!(projection.unproject(&far_left).is_none());
        assert!(projection.unproject(&Point::new(f64::NAN, 0.0)).is_none());
    }

    #[test]
    fn test_project_rejects_non_finite() {
        let projection = Projection::default();
        assert!(projection.project(&LatLng::new(f64::INFINITY, 0.0)).is_none());
    }

    #[test]
    fn test_poles_are_clamped() {
        let projection = Projection::default();
        let pole = projection.project(&LatLng::new(90.0, 0.0)).unwrap();
        let limit = projection.project(&LatLng::new(MAX_LATITUDE, 0.0)).unwrap();
        assert_eq!(pole, limit);
    }
}
