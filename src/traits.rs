//! Shared trait abstractions: interpolation used by transitions

use crate::core::geo::{LatLng, Point};
use crate::core::viewport::Transform;

/// Unified interpolation trait that consolidates all Lerp implementations
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

impl Lerp for LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LatLng::new(self.lat.lerp(&other.lat, t), self.lng.lerp(&other.lng, t))
    }
}

impl Lerp for Transform {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Transform::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t), self.k.lerp(&other.k, t))
    }
}
