use crate::animation::transition::TransformTransition;
use crate::core::config::{RenderConfig, ZoomConfig};
use crate::core::geo::{LatLng, Point};
use crate::core::projection::Projection;
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Zoom/pan transform: `screen = plane * k + (x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation in pixels
    pub x: f64,
    pub y: f64,
    /// Scale factor (1.0 = no scaling)
    pub k: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            k: 1.0,
        }
    }

    /// Check if this is effectively an identity transform
    pub fn is_identity(&self) -> bool {
        (self.k - 1.0).abs() < 1e-9 && self.x.abs() < 1e-9 && self.y.abs() < 1e-9
    }

    /// Maps a plane point to screen space
    pub fn apply(&self, point: &Point) -> Point {
        Point::new(point.x * self.k + self.x, point.y * self.k + self.y)
    }

    /// Maps a screen point back to plane space
    pub fn invert(&self, point: &Point) -> Point {
        Point::new((point.x - self.x) / self.k, (point.y - self.y) / self.k)
    }

    /// Scales about a fixed screen point, keeping that point stationary
    pub fn scale_about(&self, k: f64, anchor: &Point) -> Transform {
        let plane = self.invert(anchor);
        Transform::new(anchor.x - plane.x * k, anchor.y - plane.y * k, k)
    }

    pub fn translate_by(&self, dx: f64, dy: f64) -> Transform {
        Transform::new(self.x + dx, self.y + dy, self.k)
    }

    /// Icon multiplier: `1 / k^exponent`
    pub fn visual_scale(&self, exponent: f64) -> f64 {
        1.0 / self.k.powf(exponent)
    }

    /// Label multiplier: `1 / k^exponent`
    pub fn label_scale(&self, exponent: f64) -> f64 {
        1.0 / self.k.powf(exponent)
    }

    /// SVG `transform` attribute value
    pub fn to_svg(&self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

/// Zoom-dependent sizing factors derived from a transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScales {
    pub k: f64,
    pub visual: f64,
    pub label: f64,
}

impl ZoomScales {
    pub fn from_transform(transform: &Transform, config: &RenderConfig) -> Self {
        Self {
            k: transform.k,
            visual: transform.visual_scale(config.visual_scale_exponent),
            label: transform.label_scale(config.label_scale_exponent),
        }
    }
}

/// Owns the one and only zoom transform.
///
/// Gestures (wheel, drag) and programmatic requests (buttons, theater focus)
/// all go through the methods here, so the two can never diverge. A gesture
/// interrupts a running transition; a new programmatic request replaces it,
/// starting from whatever the transform is at that instant.
#[derive(Debug, Clone)]
pub struct ZoomController {
    transform: Transform,
    size: Point,
    config: ZoomConfig,
    transition: Option<TransformTransition>,
    revision: u64,
}

impl ZoomController {
    pub fn new(size: Point, config: ZoomConfig) -> Self {
        Self {
            transform: Transform::identity(),
            size,
            config,
            transition: None,
            revision: 0,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.k
    }

    /// Bumped on every transform change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Final transform of the running transition, or the current one
    pub fn target(&self) -> Transform {
        self.transition
            .as_ref()
            .map(|t| t.target())
            .unwrap_or(self.transform)
    }

    pub fn scale_extent(&self) -> (f64, f64) {
        (self.config.min_scale, self.config.max_scale)
    }

    pub fn set_viewport_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn viewport_center(&self) -> Point {
        Point::new(self.size.x / 2.0, self.size.y / 2.0)
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        if k.is_finite() {
            k.clamp(self.config.min_scale, self.config.max_scale)
        } else {
            self.transform.k
        }
    }

    fn set(&mut self, transform: Transform) -> bool {
        if transform == self.transform {
            return false;
        }
        self.transform = transform;
        self.revision += 1;
        true
    }

    fn start(&mut self, target: Transform, duration: Duration, now: Instant) -> bool {
        if !self.config.animate || duration.is_zero() {
            self.transition = None;
            return self.set(target);
        }

        self.transition = Some(TransformTransition::new(
            self.transform,
            target,
            self.viewport_center(),
            now,
            duration,
            self.config.easing,
        ));
        true
    }

    /// Zooms by `factor` about the viewport center
    pub fn scale_by(&mut self, factor: f64, now: Instant) -> bool {
        let k = self.clamp_scale(self.transform.k * factor);
        let target = self.transform.scale_about(k, &self.viewport_center());
        log::debug!("scale_by {:.2}: k {:.3} -> {:.3}", factor, self.transform.k, k);
        self.start(target, self.config.scale_by_duration(), now)
    }

    pub fn reset_to_identity(&mut self, now: Instant) -> bool {
        self.start(Transform::identity(), self.config.reset_duration(), now)
    }

    /// Transform that centers `center` in the viewport at `zoom` under `projection`
    pub fn focus_transform(
        &self,
        center: &LatLng,
        zoom: f64,
        projection: &Projection,
    ) -> Option<Transform> {
        let target = projection.project(center)?;
        let k = self.clamp_scale(zoom);
        let middle = self.viewport_center();
        Some(Transform::new(middle.x - target.x * k, middle.y - target.y * k, k))
    }

    /// Animates toward `center` at `zoom`. Returns false when the center
    /// does not project.
    pub fn focus_on(
        &mut self,
        center: &LatLng,
        zoom: f64,
        projection: &Projection,
        now: Instant,
    ) -> bool {
        match self.focus_transform(center, zoom, projection) {
            Some(target) => {
                log::debug!("focus on {} at {:.1}x", center, target.k);
                self.start(target, self.config.focus_duration(), now)
            }
            None => {
                log::warn!("focus center {:?} does not project", center);
                false
            }
        }
    }

    /// Wheel zoom about the pointer
    pub fn wheel(&mut self, delta_y: f64, pointer: &Point) -> bool {
        self.transition = None;
        let factor = 2_f64.powf(-delta_y * self.config.wheel_delta_factor);
        let k = self.clamp_scale(self.transform.k * factor);
        let target = self.transform.scale_about(k, pointer);
        self.set(target)
    }

    /// Drag pan by a screen-space delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        self.transition = None;
        let target = self.transform.translate_by(dx, dy);
        self.set(target)
    }

    /// Steps the running transition, if any
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(transition) = &self.transition else {
            return false;
        };

        let sample = transition.sample(now);
        if sample.finished {
            self.transition = None;
        }
        self.set(sample.transform)
    }

    /// Drops any running transition without touching the transform
    pub fn cancel(&mut self) {
        self.transition = None;
    }
}
