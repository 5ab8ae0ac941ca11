//! Core constants for the situational map.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.
//! Most of these are empirically tuned and act as configuration defaults.

/// Projection scale is `viewport width / PROJECTION_SCALE_DIVISOR`.
pub const PROJECTION_SCALE_DIVISOR: f64 = 6.2;

/// Vertical origin is `viewport height / PROJECTION_VERTICAL_DIVISOR`, which
/// biases the visible world toward the northern hemisphere.
pub const PROJECTION_VERTICAL_DIVISOR: f64 = 1.5;

/// Zoom scale extent.
pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 1000.0;

/// Exponents of the inverse power laws for icon and label sizing.
pub const VISUAL_SCALE_EXPONENT: f64 = 0.65;
pub const LABEL_SCALE_EXPONENT: f64 = 0.85;

/// Theater focus transition.
pub const FOCUS_DURATION_MS: u64 = 2000;
/// Zoom-button transition.
pub const SCALE_BY_DURATION_MS: u64 = 500;
/// Reset-to-identity transition.
pub const RESET_DURATION_MS: u64 = 750;

/// Zoom-in / zoom-out button factors.
pub const ZOOM_IN_FACTOR: f64 = 1.8;
pub const ZOOM_OUT_FACTOR: f64 = 0.6;

/// Wheel zoom: `k * 2^(-delta_y * WHEEL_DELTA_FACTOR)`.
pub const WHEEL_DELTA_FACTOR: f64 = 0.002;

/// Simulation tick interval.
pub const TICK_INTERVAL_MS: u64 = 1000;
/// Coordinate-space displacement per tick at speed 10.
pub const BASE_MOVE_SCALE: f64 = 0.00005;
/// Maximum trail length per asset.
pub const TRAIL_CAP: usize = 50;
/// Upper bound on ticks replayed after a stall.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Alert pulse ring loop.
pub const PULSE_PERIOD_MS: u64 = 2500;
pub const PULSE_START_RADIUS: f64 = 20.0;
pub const PULSE_END_RADIUS: f64 = 50.0;

/// Weather tooltip offset from the pointer.
pub const TOOLTIP_OFFSET: f64 = 15.0;

/// Report news list bounds.
pub const MIN_NEWS_BEFORE_GROUNDING: usize = 3;
pub const MAX_NEWS_ITEMS: usize = 8;
