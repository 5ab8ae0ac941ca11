use async_trait::async_trait;
use chrono::Utc;
use sitmap::prelude::*;

struct Canned;

#[async_trait]
impl ReportSource for Canned {
    async fn fetch(&self, theater: Theater) -> sitmap::Result<SituationalReport> {
        Ok(SituationalReport {
            summary: format!("{} canned", theater.label()),
            threat_level: ThreatLevel::Medium,
            ..SituationalReport::default()
        })
    }
}

/// Two contacts far enough apart that their icons never overlap
fn pair() -> Vec<Asset> {
    vec![
        Asset::new(
            "AIR-1",
            "Overwatch",
            AssetClass::Air,
            AssetStatus::Active,
            Affiliation::FriendlyBloc,
            CountryTag::Usa,
            LatLng::new(20.0, 10.0),
            90.0,
            450.0,
        )
        .with_altitude(30000.0),
        Asset::new(
            "SEA-1",
            "Picket",
            AssetClass::Sea,
            AssetStatus::Alert,
            Affiliation::Opposing,
            CountryTag::Russia,
            LatLng::new(-30.0, -60.0),
            180.0,
            20.0,
        ),
    ]
}

fn headless(spawner: &DeferredSpawner) -> DashboardBuilder {
    DashboardBuilder::headless(960.0, 600.0)
        .with_report_source(Arc::new(Canned))
        .with_spawner(Arc::new(spawner.clone()))
}

fn click(dashboard: &mut Dashboard, at: Point) -> EventHandled {
    dashboard.handle_input(
        InputEvent::Click {
            position: at,
            button: MouseButton::Left,
        },
        Instant::now(),
    )
}

#[test]
fn theater_switch_requests_report_and_flies_to_focus() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = DashboardBuilder::new()
        .with_size(960.0, 600.0)
        .with_report_source(Arc::new(Canned))
        .with_spawner(Arc::new(spawner.clone()))
        .with_fetch_on_start(false)
        .build()
        .unwrap();

    let start = Instant::now();
    let sequence = dashboard.select_theater(Theater::Ukraine, start);
    assert_eq!(dashboard.theater(), Theater::Ukraine);
    assert!(dashboard.is_animating());
    assert!(dashboard.is_loading());
    assert_eq!(spawner.pending(), 1);

    let events = dashboard.process_events();
    assert!(events.contains(&DashboardEvent::TheaterChanged {
        theater: Theater::Ukraine
    }));
    assert!(events.contains(&DashboardEvent::ReportRequested {
        theater: Theater::Ukraine,
        sequence
    }));

    // well past the focus transition
    dashboard.pump(start + Duration::from_secs(10), Utc::now());
    assert!(!dashboard.is_animating());
    assert!((dashboard.transform().k - Theater::Ukraine.focus().zoom).abs() < 1e-9);

    // the focus center lands in the middle of the viewport
    let focus = dashboard
        .projection()
        .project(&Theater::Ukraine.focus().center)
        .unwrap();
    let on_screen = dashboard.transform().apply(&focus);
    assert!((on_screen.x - 480.0).abs() < 1e-6);
    assert!((on_screen.y - 300.0).abs() < 1e-6);

    spawner.run_pending();
    let stats = dashboard.pump(start + Duration::from_secs(10), Utc::now());
    assert_eq!(stats.reports, 1);
    assert!(!dashboard.is_loading());
    assert_eq!(dashboard.report().unwrap().summary, "UKRAINE canned");
}

#[test]
fn hidden_class_is_neither_drawn_nor_clickable() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner).with_assets(pair()).build().unwrap();
    dashboard.pump(Instant::now(), Utc::now());

    let air = dashboard
        .projection()
        .project(&LatLng::new(20.0, 10.0))
        .unwrap();
    assert_eq!(click(&mut dashboard, air), EventHandled::Handled);
    assert_eq!(dashboard.selected(), Some("AIR-1"));
    let detail = dashboard.detail().unwrap();
    assert_eq!(detail.altitude, Some(30000.0));

    dashboard.toggle_class(AssetClass::Air);
    assert!(dashboard.selected().is_none());

    dashboard.pump(Instant::now(), Utc::now());
    assert!(dashboard
        .scene()
        .assets
        .iter()
        .all(|node| node.class != AssetClass::Air));
    assert_eq!(click(&mut dashboard, air), EventHandled::NotHandled);
    assert!(dashboard.selected().is_none());

    // the other contact is still reachable
    let sea = dashboard
        .projection()
        .project(&LatLng::new(-30.0, -60.0))
        .unwrap();
    click(&mut dashboard, sea);
    assert_eq!(dashboard.selected(), Some("SEA-1"));
    assert!(dashboard.detail().unwrap().altitude.is_none());
}

#[test]
fn filter_can_start_hidden() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner)
        .with_assets(pair())
        .with_filter(ClassFilter {
            air: false,
            sea: true,
            ground: true,
        })
        .build()
        .unwrap();
    dashboard.pump(Instant::now(), Utc::now());

    assert_eq!(dashboard.scene().assets.len(), 1);
    assert!(!dashboard.select_asset("AIR-1"));
    assert_eq!(dashboard.status_counts().active, 1);
}

#[test]
fn wheel_zoom_reuses_scene() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner).with_assets(pair()).build().unwrap();
    let now = Instant::now();

    assert_eq!(dashboard.pump(now, Utc::now()).render, RenderOutcome::Rebuilt);
    let generation = dashboard.scene().generation();

    let handled = dashboard.handle_input(
        InputEvent::Scroll {
            delta: -100.0,
            position: Point::new(480.0, 300.0),
        },
        now,
    );
    assert_eq!(handled, EventHandled::Handled);
    assert!(dashboard.transform().k > 1.0);

    assert_eq!(dashboard.pump(now, Utc::now()).render, RenderOutcome::ZoomApplied);
    assert_eq!(dashboard.scene().generation(), generation);
    assert_eq!(dashboard.scene().transform, dashboard.transform());
}

#[test]
fn zoom_stays_within_extent() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner).with_assets(pair()).build().unwrap();
    let now = Instant::now();

    for _ in 0..40 {
        dashboard.scale_by(2.0, now);
    }
    assert!(dashboard.transform().k <= 1000.0);

    for _ in 0..40 {
        dashboard.scale_by(0.5, now);
    }
    assert!(dashboard.transform().k >= 0.5);
}

#[test]
fn focusing_twice_is_stable() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner).with_assets(pair()).build().unwrap();
    let now = Instant::now();

    dashboard.focus_theater(Theater::Pacific, now);
    let first = dashboard.transform();
    dashboard.focus_theater(Theater::Pacific, now);
    assert_eq!(dashboard.transform(), first);
    assert_eq!(spawner.pending(), 0);
}

#[test]
fn shutdown_stops_everything() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner).with_assets(pair()).build().unwrap();
    let start = Instant::now();
    dashboard.pump(start, Utc::now());

    dashboard.select_theater(Theater::Iran, start);
    dashboard.shutdown();
    assert!(!dashboard.is_running());
    assert!(!dashboard.is_loading());

    spawner.run_pending();
    let before = dashboard.assets().to_vec();
    let stats = dashboard.pump(start + Duration::from_secs(30), Utc::now());
    assert_eq!(stats, FrameStats::default());
    assert!(dashboard.report().is_none());
    assert_eq!(dashboard.assets(), &before[..]);
}

#[test]
fn svg_export_draws_visible_assets() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner)
        .with_assets(pair())
        .with_trails(true)
        .build()
        .unwrap();

    let start = Instant::now();
    dashboard.pump(start, Utc::now());
    let stats = dashboard.pump(start + Duration::from_secs(3), Utc::now());
    assert!(stats.ticks > 0);

    let svg = dashboard.export_svg().unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(">Overwatch<"));
    assert!(svg.contains(">Picket<"));
}

const SQUARELAND: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "Squareland"},
         "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}}
    ]
}"#;

fn hover(dashboard: &mut Dashboard, at: Point) {
    dashboard.handle_input(InputEvent::MouseMove { position: at }, Instant::now());
}

#[test]
fn weather_overlay_follows_hovered_country() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner)
        .with_assets(Vec::new())
        .with_geography(Geography::from_str(SQUARELAND).unwrap())
        .with_weather(true)
        .build()
        .unwrap();
    dashboard.pump(Instant::now(), Utc::now());

    let pointer = dashboard
        .projection()
        .project(&LatLng::new(5.0, 5.0))
        .unwrap();
    hover(&mut dashboard, pointer);

    let state = dashboard.hover().clone();
    assert_eq!(state.country.as_deref(), Some("Squareland"));
    let location = state.location.unwrap();
    assert!((location.lat - 5.0).abs() < 1e-6);
    assert!((location.lng - 5.0).abs() < 1e-6);

    let tooltip = state.weather.unwrap();
    assert_eq!(tooltip.position, Point::new(pointer.x + 15.0, pointer.y + 15.0));
    assert_eq!(tooltip.weather, PseudoWeather::at(&location, "Squareland"));

    // switching the overlay off drops the tooltip but keeps the country hover
    let mut toggles = dashboard.toggles();
    toggles.weather = false;
    dashboard.set_toggles(toggles);
    assert!(dashboard.hover().weather.is_none());

    hover(&mut dashboard, Point::new(pointer.x + 1.0, pointer.y));
    assert_eq!(dashboard.hover().country.as_deref(), Some("Squareland"));
    assert!(dashboard.hover().weather.is_none());

    // open water
    let ocean = dashboard
        .projection()
        .project(&LatLng::new(-40.0, -30.0))
        .unwrap();
    hover(&mut dashboard, ocean);
    assert!(dashboard.hover().country.is_none());
}

#[test]
fn hover_without_geography_finds_no_country() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner)
        .with_assets(Vec::new())
        .with_weather(true)
        .build()
        .unwrap();
    dashboard.pump(Instant::now(), Utc::now());

    let pointer = dashboard
        .projection()
        .project(&LatLng::new(5.0, 5.0))
        .unwrap();
    hover(&mut dashboard, pointer);

    let state = dashboard.hover();
    assert!(state.country.is_none());
    assert!(state.location.is_none());
    assert!(state.weather.is_none());
}

#[test]
fn immediate_zoom_changes_are_reported() {
    let spawner = DeferredSpawner::new();
    let mut dashboard = headless(&spawner).with_assets(pair()).build().unwrap();
    let now = Instant::now();
    dashboard.process_events();

    let transforms = |events: Vec<DashboardEvent>| -> Vec<Transform> {
        events
            .into_iter()
            .filter_map(|event| match event {
                DashboardEvent::TransformChanged { transform } => Some(transform),
                _ => None,
            })
            .collect()
    };

    assert!(dashboard.scale_by(2.0, now));
    let changes = transforms(dashboard.process_events());
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0], dashboard.transform());
    assert!((changes[0].k - 2.0).abs() < 1e-12);

    dashboard.focus_theater(Theater::Africa, now);
    assert_eq!(transforms(dashboard.process_events()), vec![dashboard.transform()]);

    // same focus again leaves the transform alone
    dashboard.focus_theater(Theater::Africa, now);
    assert!(transforms(dashboard.process_events()).is_empty());

    dashboard.reset_zoom(now);
    assert_eq!(transforms(dashboard.process_events()), vec![Transform::identity()]);

    // nothing left for pump to report
    dashboard.pump(now, Utc::now());
    assert!(transforms(dashboard.process_events()).is_empty());
}
