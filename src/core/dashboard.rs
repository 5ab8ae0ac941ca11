//! The coordinator: single owner of every piece of mutable dashboard state.
//!
//! A host surface (the egui widget, the headless demo, tests) drives a
//! [`Dashboard`] by feeding it input and calling [`Dashboard::pump`] once per
//! frame. `pump` advances the simulation clock, steps any zoom transition,
//! applies finished report fetches and brings the scene up to date. Nothing
//! else writes to the assets, the transform or the displayed report.

use crate::core::config::DashboardConfig;
use crate::core::geo::{LatLng, Point};
use crate::core::projection::Projection;
use crate::core::theater::Theater;
use crate::core::viewport::{Transform, ZoomController};
use crate::data::asset::{Asset, AssetClass};
use crate::data::geojson::Geography;
use crate::data::poi::strategic_pois;
use crate::data::report::SituationalReport;
use crate::input::{Action, DashboardEvent, EventHandled, EventManager, InputEvent, InputHandler};
use crate::prelude::{Arc, Duration, Instant};
use crate::rendering::hit_test;
use crate::rendering::renderer::{RenderOutcome, SceneInput, SceneRenderer};
use crate::rendering::scene::{LayerToggles, Scene};
use crate::rendering::weather::{tooltip_position, PseudoWeather};
use crate::runtime::AsyncSpawner;
use crate::services::feed::ReportFeed;
use crate::services::report::ReportSource;
use crate::simulation::{AssetStore, ClassFilter, SimulationClock, StatusCounts};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What one call to [`Dashboard::pump`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub ticks: u32,
    pub moved: usize,
    pub reports: usize,
    pub render: RenderOutcome,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            ticks: 0,
            moved: 0,
            reports: 0,
            render: RenderOutcome::Unchanged,
        }
    }
}

/// Weather readout shown next to the pointer in weather mode
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherTooltip {
    pub weather: PseudoWeather,
    pub position: Point,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    pub asset: Option<String>,
    pub country: Option<String>,
    pub location: Option<LatLng>,
    pub weather: Option<WeatherTooltip>,
}

/// Zoom readout: magnification plus the focused theater's center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub magnification: f64,
    pub theater: Theater,
    pub center: LatLng,
    pub loading: bool,
}

impl Hud {
    pub fn mag_label(&self) -> String {
        format!("MAG: {:.1}x", self.magnification)
    }

    pub fn loc_label(&self) -> String {
        format!("LOC: {}", self.center)
    }
}

/// Everything the detail panel shows for the selected asset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetail {
    pub id: String,
    pub name: String,
    pub class: AssetClass,
    pub status: &'static str,
    pub affiliation: &'static str,
    pub country: &'static str,
    pub position: LatLng,
    pub heading: f64,
    pub speed: f64,
    /// Only reported for aircraft
    pub altitude: Option<f64>,
    pub mission: String,
    pub last_updated: DateTime<Utc>,
    pub tracking_url: Option<String>,
    pub wiki_url: Option<String>,
    pub trail_len: usize,
}

impl AssetDetail {
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            name: asset.name.clone(),
            class: asset.class,
            status: asset.status.label(),
            affiliation: asset.affiliation.label(),
            country: asset.country.label(),
            position: asset.position,
            heading: asset.heading(),
            speed: asset.speed,
            altitude: (asset.class == AssetClass::Air).then_some(asset.altitude),
            mission: asset.mission.clone(),
            last_updated: asset.last_updated,
            tracking_url: asset.tracking_url.clone(),
            wiki_url: asset.wiki_url.clone(),
            trail_len: asset.trail.len(),
        }
    }

    pub fn position_label(&self) -> String {
        format!("{:.4}, {:.4}", self.position.lat, self.position.lng)
    }

    pub fn updated_label(&self) -> String {
        self.last_updated.format("%H:%M:%S").to_string()
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    store: AssetStore,
    filter: ClassFilter,
    filter_revision: u64,
    selected: Option<String>,
    theater: Theater,
    zoom: ZoomController,
    projection: Projection,
    renderer: SceneRenderer,
    feed: ReportFeed,
    clock: SimulationClock,
    toggles: LayerToggles,
    events: EventManager,
    input: InputHandler,
    geography: Option<Geography>,
    geography_revision: u64,
    /// Zoom revision last reported to listeners
    transform_revision: u64,
    hover: HoverState,
    running: bool,
}

impl Dashboard {
    pub fn new(
        size: Point,
        config: DashboardConfig,
        assets: Vec<Asset>,
        source: Arc<dyn ReportSource>,
        spawner: Arc<dyn AsyncSpawner>,
    ) -> crate::Result<Self> {
        config.validate()?;
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(crate::Error::Config(format!(
                "viewport must have a positive size, got {}x{}",
                size.x, size.y
            )));
        }

        let projection = Projection::with_config(size.x, size.y, &config.projection);
        let clock = SimulationClock::new(
            config.simulation.tick_interval(),
            config.simulation.max_catch_up_ticks,
        );
        log::info!(
            "dashboard {}x{} with {} assets",
            size.x,
            size.y,
            assets.len()
        );

        Ok(Self {
            zoom: ZoomController::new(size, config.zoom.clone()),
            renderer: SceneRenderer::new(size, config.render.clone()),
            feed: ReportFeed::new(source, spawner),
            store: AssetStore::new(assets),
            filter: ClassFilter::default(),
            filter_revision: 0,
            selected: None,
            theater: Theater::Global,
            projection,
            clock,
            toggles: LayerToggles::default(),
            events: EventManager::new(),
            input: InputHandler::new(),
            geography: None,
            geography_revision: 0,
            transform_revision: 0,
            hover: HoverState::default(),
            running: true,
            config,
        })
    }

    /// One cooperative step of the event loop
    pub fn pump(&mut self, now: Instant, wall: DateTime<Utc>) -> FrameStats {
        if !self.running {
            return FrameStats::default();
        }

        let ticks = self.clock.poll(now);
        let mut moved = 0;
        for _ in 0..ticks {
            moved += self.store.tick(wall, &self.config.simulation);
        }
        if ticks > 0 {
            self.events.emit(DashboardEvent::Tick { moved });
        }

        self.zoom.advance(now);
        self.sync_transform();

        let applied = self.feed.pump();
        for &theater in &applied {
            self.events.emit(DashboardEvent::ReportUpdated { theater });
        }

        FrameStats {
            ticks,
            moved,
            reports: applied.len(),
            render: self.render_scene(),
        }
    }

    fn render_scene(&mut self) -> RenderOutcome {
        let input = SceneInput {
            assets: self.store.visible(&self.filter).collect(),
            pois: strategic_pois(),
            geography: self.geography.as_ref(),
            projection: &self.projection,
            transform: self.zoom.transform(),
            toggles: self.toggles,
            content_revision: self.store.revision() + self.filter_revision,
            geography_revision: self.geography_revision,
        };
        self.renderer.render(&input)
    }

    /// Emits `TransformChanged` if the zoom controller moved since the last report
    fn sync_transform(&mut self) -> bool {
        let revision = self.zoom.revision();
        if revision == self.transform_revision {
            return false;
        }
        self.transform_revision = revision;
        self.events.emit(DashboardEvent::TransformChanged {
            transform: self.zoom.transform(),
        });
        true
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> EventHandled {
        if !self.running {
            return EventHandled::NotHandled;
        }

        let mut handled = EventHandled::NotHandled;
        for action in self.input.handle_event(event) {
            if self.apply(action, now) {
                handled = EventHandled::Handled;
            }
        }
        handled
    }

    fn apply(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Pan { dx, dy } => {
                self.zoom.pan_by(dx, dy);
                self.sync_transform()
            }
            Action::Wheel { delta_y, pointer } => {
                self.zoom.wheel(delta_y, &pointer);
                self.sync_transform()
            }
            Action::ScaleBy(factor) => self.scale_by(factor, now),
            Action::ResetZoom => self.reset_zoom(now),
            Action::Hover(pointer) => self.hover_at(pointer),
            Action::Leave => self.clear_hover(),
            Action::Select(pointer) => self.select_at(pointer),
            Action::ClearSelection => self.clear_selection(),
            Action::Resize(size) => self.resize(size),
        }
    }

    /// Animated zoom about the viewport center
    pub fn scale_by(&mut self, factor: f64, now: Instant) -> bool {
        let started = self.zoom.scale_by(factor, now);
        self.sync_transform();
        started
    }

    pub fn reset_zoom(&mut self, now: Instant) -> bool {
        let started = self.zoom.reset_to_identity(now);
        self.sync_transform();
        started
    }

    /// Switches theater: clears the selection, flies to the theater's focus
    /// and requests a fresh report. Returns the request's sequence number.
    pub fn select_theater(&mut self, theater: Theater, now: Instant) -> u64 {
        self.clear_selection();
        self.focus_theater(theater, now);

        let sequence = self.feed.request(theater);
        self.events
            .emit(DashboardEvent::ReportRequested { theater, sequence });
        log::info!("theater -> {}", theater);
        sequence
    }

    /// Flies to the theater's focus without requesting a report
    pub fn focus_theater(&mut self, theater: Theater, now: Instant) -> bool {
        self.theater = theater;
        let focus = theater.focus();
        let moved = self
            .zoom
            .focus_on(&focus.center, focus.zoom, &self.projection, now);
        self.sync_transform();
        self.events.emit(DashboardEvent::TheaterChanged { theater });
        moved
    }

    /// Re-fetches the current theater's report unless one is still loading
    pub fn refresh_report(&mut self) -> Option<u64> {
        let sequence = self.feed.refresh()?;
        self.events.emit(DashboardEvent::ReportRequested {
            theater: self.theater,
            sequence,
        });
        Some(sequence)
    }

    pub fn set_filter(&mut self, filter: ClassFilter) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.filter_revision += 1;

        let hidden = self
            .selected
            .as_deref()
            .and_then(|id| self.store.get(id))
            .map(|asset| !filter.allows(asset.class))
            .unwrap_or(false);
        if hidden {
            self.clear_selection();
        }
    }

    pub fn toggle_class(&mut self, class: AssetClass) {
        let mut filter = self.filter;
        filter.toggle(class);
        self.set_filter(filter);
    }

    /// Selects a visible asset by id
    pub fn select_asset(&mut self, id: &str) -> bool {
        let visible = self
            .store
            .get(id)
            .map(|asset| self.filter.allows(asset.class))
            .unwrap_or(false);
        if !visible {
            log::debug!("cannot select {}: unknown or filtered out", id);
            return false;
        }
        self.selected = Some(id.to_string());
        self.events
            .emit(DashboardEvent::AssetSelected { id: id.to_string() });
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.selected.take().is_some() {
            self.events.emit(DashboardEvent::SelectionCleared);
            return true;
        }
        false
    }

    fn select_at(&mut self, pointer: Point) -> bool {
        self.render_scene();
        let id = hit_test::asset_at(self.renderer.scene(), &pointer).map(|node| node.id.clone());
        match id {
            Some(id) => self.select_asset(&id),
            None => false,
        }
    }

    fn hover_at(&mut self, pointer: Point) -> bool {
        self.render_scene();
        let mut changed = false;

        let asset = hit_test::asset_at(self.renderer.scene(), &pointer).map(|node| node.id.clone());
        if asset != self.hover.asset {
            self.renderer.set_hovered_asset(asset.as_deref());
            self.events
                .emit(DashboardEvent::AssetHovered { id: asset.clone() });
            self.hover.asset = asset;
            changed = true;
        }

        let transform = self.zoom.transform();
        let (country, location) = match self
            .geography
            .as_ref()
            .and_then(|g| hit_test::country_at(g, &self.projection, &transform, &pointer))
        {
            Some((shape, location)) => (Some(shape.name.clone()), Some(location)),
            None => (None, None),
        };

        self.hover.weather = match (&country, location) {
            (Some(name), Some(location)) if self.toggles.weather => Some(WeatherTooltip {
                weather: PseudoWeather::at(&location, name.clone()),
                position: tooltip_position(&pointer),
            }),
            _ => None,
        };

        if country != self.hover.country {
            self.renderer.set_hovered_country(country.as_deref());
            self.events.emit(DashboardEvent::CountryHovered {
                name: country.clone(),
                location,
            });
            changed = true;
        }
        self.hover.country = country;
        self.hover.location = location;
        changed
    }

    fn clear_hover(&mut self) -> bool {
        if self.hover == HoverState::default() {
            return false;
        }
        if self.hover.asset.is_some() {
            self.renderer.set_hovered_asset(None);
            self.events.emit(DashboardEvent::AssetHovered { id: None });
        }
        if self.hover.country.is_some() {
            self.renderer.set_hovered_country(None);
            self.events.emit(DashboardEvent::CountryHovered {
                name: None,
                location: None,
            });
        }
        self.hover = HoverState::default();
        true
    }

    /// Rebuilds the projection for a new viewport size
    pub fn resize(&mut self, size: Point) -> bool {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 || size == self.projection.size {
            return false;
        }
        self.projection = Projection::with_config(size.x, size.y, &self.config.projection);
        self.zoom.set_viewport_size(size);
        log::debug!("viewport resized to {}x{}", size.x, size.y);
        true
    }

    /// Installs the country dataset once it has loaded
    pub fn set_geography(&mut self, geography: Geography) {
        log::info!(
            "geography loaded: {} countries ({} skipped)",
            geography.countries().len(),
            geography.skipped()
        );
        self.geography = Some(geography);
        self.geography_revision += 1;
    }

    pub fn set_toggles(&mut self, toggles: LayerToggles) {
        if !toggles.weather {
            self.hover.weather = None;
        }
        self.toggles = toggles;
    }

    /// Stops the clock, cancels fetches and animation, detaches listeners.
    /// Every later `pump` is a no-op.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.clock.stop();
        self.feed.cancel_all();
        self.zoom.cancel();
        self.events.detach_all();
        self.input.enabled = false;
        log::info!("dashboard shut down");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Registers a listener for a [`DashboardEvent::kind`]
    pub fn on<F>(&mut self, kind: &'static str, callback: F)
    where
        F: Fn(&DashboardEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, callback);
    }

    pub fn process_events(&mut self) -> Vec<DashboardEvent> {
        self.events.process_events()
    }

    /// Standalone SVG of the current frame
    pub fn export_svg(&mut self) -> crate::Result<String> {
        self.render_scene();
        crate::rendering::svg::to_svg(self.renderer.scene())
    }

    pub fn hud(&self) -> Hud {
        Hud {
            magnification: self.zoom.scale(),
            theater: self.theater,
            center: self.theater.focus().center,
            loading: self.feed.is_loading(),
        }
    }

    pub fn detail(&self) -> Option<AssetDetail> {
        self.selected
            .as_deref()
            .and_then(|id| self.store.get(id))
            .map(AssetDetail::from_asset)
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.store.status_counts()
    }

    /// Assets that pass the class filter, in roster order
    pub fn visible_assets(&self) -> impl Iterator<Item = &Asset> + '_ {
        self.store.visible(&self.filter)
    }

    pub fn assets(&self) -> &[Asset] {
        self.store.assets()
    }

    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    pub fn report(&self) -> Option<&SituationalReport> {
        self.feed.report()
    }

    pub fn is_loading(&self) -> bool {
        self.feed.is_loading()
    }

    pub fn transform(&self) -> Transform {
        self.zoom.transform()
    }

    pub fn is_animating(&self) -> bool {
        self.zoom.is_animating()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn theater(&self) -> Theater {
        self.theater
    }

    pub fn filter(&self) -> ClassFilter {
        self.filter
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn toggles(&self) -> LayerToggles {
        self.toggles
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn geography(&self) -> Option<&Geography> {
        self.geography.as_ref()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// How long the host may sleep before the next tick is due
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.clock.time_until_next(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::asset::initial_assets;
    use crate::runtime::DeferredSpawner;
    use crate::services::report::ReportSource;
    use async_trait::async_trait;

    struct Quiet;

    #[async_trait]
    impl ReportSource for Quiet {
        async fn fetch(&self, theater: Theater) -> crate::Result<SituationalReport> {
            Ok(SituationalReport {
                summary: format!("{} quiet", theater.label()),
                ..SituationalReport::default()
            })
        }
    }

    fn dashboard() -> (Dashboard, DeferredSpawner) {
        let spawner = DeferredSpawner::new();
        let dashboard = Dashboard::new(
            Point::new(960.0, 600.0),
            DashboardConfig::default(),
            initial_assets(Utc::now()),
            Arc::new(Quiet),
            Arc::new(spawner.clone()),
        )
        .unwrap();
        (dashboard, spawner)
    }

    #[test]
    fn test_rejects_empty_viewport() {
        let result = Dashboard::new(
            Point::new(0.0, 600.0),
            DashboardConfig::default(),
            Vec::new(),
            Arc::new(Quiet),
            Arc::new(DeferredSpawner::new()),
        );
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_first_pump_builds_scene() {
        let (mut dashboard, _) = dashboard();
        let stats = dashboard.pump(Instant::now(), Utc::now());
        assert_eq!(stats.render, RenderOutcome::Rebuilt);
        assert_eq!(dashboard.scene().assets.len(), dashboard.assets().len());
        assert_eq!(dashboard.pump(Instant::now(), Utc::now()).render, RenderOutcome::Unchanged);
    }

    #[test]
    fn test_theater_switch_clears_selection() {
        let (mut dashboard, spawner) = dashboard();
        let id = dashboard.assets()[0].id.clone();
        assert!(dashboard.select_asset(&id));
        assert!(dashboard.detail().is_some());

        let now = Instant::now();
        let sequence = dashboard.select_theater(Theater::Pacific, now);
        assert_eq!(sequence, 1);
        assert!(dashboard.selected().is_none());
        assert!(dashboard.is_animating());
        assert!(dashboard.is_loading());
        assert_eq!(spawner.pending(), 1);

        let events = dashboard.process_events();
        assert!(events.contains(&DashboardEvent::SelectionCleared));
        assert!(events.contains(&DashboardEvent::ReportRequested {
            theater: Theater::Pacific,
            sequence: 1
        }));
    }

    #[test]
    fn test_filter_drops_hidden_selection() {
        let (mut dashboard, _) = dashboard();
        let air = dashboard
            .assets()
            .iter()
            .find(|a| a.class == AssetClass::Air)
            .map(|a| a.id.clone())
            .unwrap();
        dashboard.select_asset(&air);
        dashboard.toggle_class(AssetClass::Air);
        assert!(dashboard.selected().is_none());
        assert!(!dashboard.select_asset(&air));
        assert!(dashboard.visible_assets().all(|a| a.class != AssetClass::Air));
    }

    #[test]
    fn test_hud_tracks_theater() {
        let (mut dashboard, _) = dashboard();
        assert_eq!(dashboard.hud().mag_label(), "MAG: 1.0x");
        dashboard.select_theater(Theater::Ukraine, Instant::now());
        assert_eq!(dashboard.hud().loc_label(), "LOC: 48.30N / 31.10E");
    }

    #[test]
    fn test_shutdown_freezes_pump() {
        let (mut dashboard, _) = dashboard();
        let start = Instant::now();
        dashboard.pump(start, Utc::now());
        dashboard.shutdown();
        let before = dashboard.assets().to_vec();
        let stats = dashboard.pump(start + Duration::from_secs(5), Utc::now());
        assert_eq!(stats, FrameStats::default());
        assert_eq!(dashboard.assets(), &before[..]);
        assert_eq!(
            dashboard.handle_input(
                InputEvent::Resize {
                    size: Point::new(100.0, 100.0)
                },
                start
            ),
            EventHandled::NotHandled
        );
    }
}
