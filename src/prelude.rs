//! Prelude module for common sitmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use sitmap::prelude::*;`

pub use crate::core::{
    builder::DashboardBuilder,
    config::{
        DashboardConfig, DashboardProfile, ProjectionConfig, RenderConfig, ReportConfig,
        SimulationConfig, ZoomConfig,
    },
    dashboard::{AssetDetail, Dashboard, FrameStats, HoverState, Hud, WeatherTooltip},
    geo::{LatLng, Point},
    projection::Projection,
    theater::{Theater, TheaterFocus},
    viewport::{Transform, ZoomController, ZoomScales},
};

pub use crate::data::{
    asset::{initial_assets, Affiliation, Asset, AssetClass, AssetStatus, CountryTag},
    geojson::{CountryShape, Geography},
    poi::{pois_in, strategic_pois, PoiKind, PointOfInterest},
    report::{Hotspot, NewsItem, PentagonActivity, SituationalReport, SourceType, ThreatLevel},
};

pub use crate::input::{
    events::{DashboardEvent, EventHandled, InputEvent, KeyCode, KeyModifiers, MouseButton},
    handler::{Action, EventManager, InputHandler},
};

pub use crate::animation::easing::EasingType;

pub use crate::rendering::{
    renderer::{RenderOutcome, SceneInput, SceneRenderer},
    scene::{LayerToggles, Scene},
    style::Rgba,
    weather::PseudoWeather,
};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner, DeferredSpawner, InlineSpawner};

pub use crate::services::{
    feed::ReportFeed,
    report::{fetch_or_fallback, GenerativeReportClient, ReportSource},
};

pub use crate::simulation::{AssetStore, ClassFilter, SimulationClock, StatusCounts};

pub use crate::traits::Lerp;

#[cfg(feature = "egui")]
pub use crate::ui::widget::{DashboardWidget, DashboardWidgetConfig};

pub use crate::{Error as MapError, Result};

pub use instant::Instant;
pub use std::{collections::VecDeque, future::Future, pin::Pin, sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
