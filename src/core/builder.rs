//! Dashboard builder for fluent configuration
//!
//! Collects the viewport size, a configuration profile and the external
//! collaborators (report source, async spawner, geography) before
//! constructing a [`Dashboard`]. Anything left unset gets a working default.

use crate::{
    core::{
        config::{DashboardConfig, DashboardProfile},
        dashboard::Dashboard,
        geo::Point,
        theater::Theater,
    },
    data::{
        asset::{initial_assets, Asset},
        geojson::Geography,
    },
    prelude::{Arc, Instant},
    rendering::scene::LayerToggles,
    runtime::{self, AsyncSpawner},
    services::report::{GenerativeReportClient, ReportSource},
    simulation::ClassFilter,
    Result,
};
use chrono::Utc;

/// Builder for creating and configuring Dashboard instances
pub struct DashboardBuilder {
    size: Option<Point>,
    profile: DashboardProfile,
    assets: Option<Vec<Asset>>,
    source: Option<Arc<dyn ReportSource>>,
    spawner: Option<Arc<dyn AsyncSpawner>>,
    geography: Option<Geography>,
    toggles: LayerToggles,
    filter: ClassFilter,
    theater: Option<Theater>,
    /// Request a report for the starting theater as part of `build`
    fetch_on_start: bool,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self {
            size: None,
            profile: DashboardProfile::default(),
            assets: None,
            source: None,
            spawner: None,
            geography: None,
            toggles: LayerToggles::default(),
            filter: ClassFilter::default(),
            theater: None,
            fetch_on_start: true,
        }
    }

    /// Viewport size in pixels
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Point::new(width, height));
        self
    }

    pub fn with_profile(mut self, profile: DashboardProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.profile = DashboardProfile::Custom(config);
        self
    }

    /// Replaces the built-in roster
    pub fn with_assets(mut self, assets: Vec<Asset>) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn with_report_source(mut self, source: Arc<dyn ReportSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_spawner(mut self, spawner: Arc<dyn AsyncSpawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn with_geography(mut self, geography: Geography) -> Self {
        self.geography = Some(geography);
        self
    }

    pub fn with_trails(mut self, enabled: bool) -> Self {
        self.toggles.trails = enabled;
        self
    }

    pub fn with_weather(mut self, enabled: bool) -> Self {
        self.toggles.weather = enabled;
        self
    }

    pub fn with_filter(mut self, filter: ClassFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Theater to focus once built
    pub fn with_theater(mut self, theater: Theater) -> Self {
        self.theater = Some(theater);
        self
    }

    pub fn with_fetch_on_start(mut self, enabled: bool) -> Self {
        self.fetch_on_start = enabled;
        self
    }

    /// Preset for tools without a display: no animation, no startup fetch
    pub fn headless(width: f64, height: f64) -> Self {
        Self::new()
            .with_size(width, height)
            .with_profile(DashboardProfile::LowMotion)
            .with_fetch_on_start(false)
    }

    pub fn build(self) -> Result<Dashboard> {
        let size = self
            .size
            .ok_or_else(|| crate::Error::Config("no viewport size specified".to_string()))?;
        let config = self.profile.resolve();

        let source = match self.source {
            Some(source) => source,
            None => Arc::new(GenerativeReportClient::new(config.report.clone())?),
        };
        let spawner = self.spawner.unwrap_or_else(runtime::runtime);
        let assets = self.assets.unwrap_or_else(|| initial_assets(Utc::now()));

        let mut dashboard = Dashboard::new(size, config, assets, source, spawner)?;
        dashboard.set_toggles(self.toggles);
        dashboard.set_filter(self.filter);
        if let Some(geography) = self.geography {
            dashboard.set_geography(geography);
        }

        match (self.theater, self.fetch_on_start) {
            (Some(theater), true) => {
                dashboard.select_theater(theater, Instant::now());
            }
            (None, true) => {
                dashboard.refresh_report();
            }
            (Some(theater), false) => {
                dashboard.focus_theater(theater, Instant::now());
            }
            (None, false) => {}
        }

        Ok(dashboard)
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
