//! # sitmap
//!
//! A strategic situational-awareness map engine.
//!
//! Simulated assets move across a Mercator-projected world map that the
//! operator can pan, zoom and filter, while a generative report service
//! supplies a narrative situational report per theater. Rendering produces
//! a retained scene graph that can be exported to SVG or painted with egui.

pub mod animation;
pub mod core;
pub mod data;
pub mod input;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod services;
pub mod simulation;
pub mod traits;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::DashboardBuilder,
    config::{DashboardConfig, DashboardProfile},
    dashboard::{AssetDetail, Dashboard, FrameStats, Hud},
    geo::{LatLng, Point},
    projection::Projection,
    theater::Theater,
    viewport::{Transform, ZoomController},
};

pub use data::{
    asset::{Affiliation, Asset, AssetClass, AssetStatus, CountryTag},
    geojson::Geography,
    poi::{PoiKind, PointOfInterest},
    report::{SituationalReport, ThreatLevel},
};

pub use input::{events::InputEvent, handler::InputHandler};

pub use rendering::{renderer::SceneRenderer, scene::Scene, svg::to_svg};

pub use services::{feed::ReportFeed, report::{GenerativeReportClient, ReportSource}};

pub use simulation::{AssetStore, ClassFilter};

#[cfg(feature = "egui")]
pub use ui::widget::DashboardWidget;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No API key configured for the report service")]
    MissingCredential,

    #[error("Report service error: {0}")]
    ReportService(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger`, filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
