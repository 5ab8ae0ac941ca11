//! Configuration system for the situational map
//!
//! This module provides a hierarchical configuration system: presets through
//! [`DashboardProfile`], or a custom [`DashboardConfig`] loaded from JSON.
//! Every section has defaults, so a partial document is valid.

use crate::animation::easing::EasingType;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardProfile {
    Standard,
    /// No animated transitions; transforms jump to their target
    LowMotion,
    Custom(DashboardConfig),
}

impl DashboardProfile {
    pub fn resolve(&self) -> DashboardConfig {
        match self {
            Self::Standard => DashboardConfig::default(),
            Self::LowMotion => DashboardConfig {
                zoom: ZoomConfig {
                    animate: false,
                    easing: EasingType::Linear,
                    ..ZoomConfig::default()
                },
                ..DashboardConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for DashboardProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub projection: ProjectionConfig,
    pub zoom: ZoomConfig,
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
    pub report: ReportConfig,
}

impl DashboardConfig {
    /// Parses a (possibly partial) JSON configuration document
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| crate::Error::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !(self.zoom.min_scale > 0.0 && self.zoom.min_scale <= self.zoom.max_scale) {
            return Err(crate::Error::Config(format!(
                "zoom scale extent [{}, {}] is empty",
                self.zoom.min_scale, self.zoom.max_scale
            )));
        }
        if self.simulation.trail_cap == 0 {
            return Err(crate::Error::Config("trail cap must be at least 1".into()));
        }
        if self.simulation.tick_interval_ms == 0 {
            return Err(crate::Error::Config("tick interval must be nonzero".into()));
        }
        if self.projection.scale_divisor <= 0.0 || self.projection.vertical_origin_divisor <= 0.0 {
            return Err(crate::Error::Config("projection divisors must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub scale_divisor: f64,
    pub vertical_origin_divisor: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scale_divisor: PROJECTION_SCALE_DIVISOR,
            vertical_origin_divisor: PROJECTION_VERTICAL_DIVISOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub animate: bool,
    #[serde(skip)]
    pub easing: EasingType,
    pub focus_duration_ms: u64,
    pub scale_by_duration_ms: u64,
    pub reset_duration_ms: u64,
    pub wheel_delta_factor: f64,
}

impl ZoomConfig {
    pub fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.focus_duration_ms)
    }

    pub fn scale_by_duration(&self) -> Duration {
        Duration::from_millis(self.scale_by_duration_ms)
    }

    pub fn reset_duration(&self) -> Duration {
        Duration::from_millis(self.reset_duration_ms)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            animate: true,
            easing: EasingType::EaseInOut,
            focus_duration_ms: FOCUS_DURATION_MS,
            scale_by_duration_ms: SCALE_BY_DURATION_MS,
            reset_duration_ms: RESET_DURATION_MS,
            wheel_delta_factor: WHEEL_DELTA_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    /// Displacement per tick at speed 10, in degrees
    pub base_scale: f64,
    pub trail_cap: usize,
    pub max_catch_up_ticks: u32,
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            base_scale: BASE_MOVE_SCALE,
            trail_cap: TRAIL_CAP,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub visual_scale_exponent: f64,
    pub label_scale_exponent: f64,
    pub icon_scale: f64,
    pub icon_hover_scale: f64,
    pub pulse_period_ms: u64,
    pub trail_opacity: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            visual_scale_exponent: VISUAL_SCALE_EXPONENT,
            label_scale_exponent: LABEL_SCALE_EXPONENT,
            icon_scale: 5.5,
            icon_hover_scale: 7.5,
            pulse_period_ms: PULSE_PERIOD_MS,
            trail_opacity: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub endpoint: String,
    pub model: String,
    /// Explicit credential; when absent the environment is consulted
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl ReportConfig {
    /// Environment variables consulted for the credential, in order
    pub const API_KEY_VARS: [&'static str; 2] = ["SITMAP_API_KEY", "API_KEY"];

    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|k| !k.is_empty()).or_else(|| {
            Self::API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|k| !k.is_empty()))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            timeout_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.zoom.min_scale, 0.5);
        assert_eq!(config.zoom.max_scale, 1000.0);
        assert_eq!(config.simulation.trail_cap, 50);
        assert_eq!(config.simulation.tick_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config =
            DashboardConfig::from_json_str(r#"{"simulation": {"base_scale": 0.01}}"#).unwrap();
        assert_eq!(config.simulation.base_scale, 0.01);
        assert_eq!(config.simulation.trail_cap, TRAIL_CAP);
        assert_eq!(config.zoom, ZoomConfig::default());
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let result =
            DashboardConfig::from_json_str(r#"{"zoom": {"min_scale": 10.0, "max_scale": 1.0}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_low_motion_profile() {
        let config = DashboardProfile::LowMotion.resolve();
        assert!(!config.zoom.animate);
        assert!(DashboardProfile::default().resolve().zoom.animate);
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = ReportConfig {
            api_key: Some("explicit".into()),
            ..ReportConfig::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("explicit"));
    }
}
