use crate::animation::easing::EasingType;
use crate::core::geo::Point;
use crate::core::viewport::Transform;
use crate::traits::Lerp;
use instant::Instant;
use std::time::Duration;

/// Time-based interpolation between two zoom transforms.
///
/// The view center (in untransformed plane coordinates) is interpolated
/// linearly and the scale geometrically, so long zooms do not swing off
/// target the way a component-wise lerp of the translation would.
#[derive(Debug, Clone)]
pub struct TransformTransition {
    from: Transform,
    to: Transform,
    viewport_center: Point,
    start_time: Instant,
    duration: Duration,
    easing: EasingType,
}

/// Transition output for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSample {
    pub transform: Transform,
    pub progress: f64,
    pub finished: bool,
}

impl TransformTransition {
    pub fn new(
        from: Transform,
        to: Transform,
        viewport_center: Point,
        start_time: Instant,
        duration: Duration,
        easing: EasingType,
    ) -> Self {
        Self {
            from,
            to,
            viewport_center,
            start_time,
            duration,
            easing,
        }
    }

    pub fn target(&self) -> Transform {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Samples the transition at `now`. The final sample is exactly the target.
    pub fn sample(&self, now: Instant) -> TransitionSample {
        let elapsed = now.saturating_duration_since(self.start_time);
        if self.duration.is_zero() || elapsed >= self.duration {
            return TransitionSample {
                transform: self.to,
                progress: 1.0,
                finished: true,
            };
        }

        let t = self.easing.apply(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        TransitionSample {
            transform: self.interpolate(t),
            progress: t,
            finished: false,
        }
    }

    fn interpolate(&self, t: f64) -> Transform {
        let from_center = self.from.invert(&self.viewport_center);
        let to_center = self.to.invert(&self.viewport_center);
        let center = from_center.lerp(&to_center, t);

        let k = if self.from.k > 0.0 && self.to.k > 0.0 {
            self.from.k.ln().lerp(&self.to.k.ln(), t).exp()
        } else {
            self.from.k.lerp(&self.to.k, t)
        };

        Transform::new(
            self.viewport_center.x - center.x * k,
            self.viewport_center.y - center.y * k,
            k,
        )
    }
}
