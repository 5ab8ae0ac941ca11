pub mod easing;
pub mod transition;

// Re-export commonly used types and functions for convenience
pub use easing::{ease_in_out_cubic, EasingType};
pub use transition::{TransformTransition, TransitionSample};
