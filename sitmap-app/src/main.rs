use anyhow::Context;
use crossbeam_channel::{Receiver, TryRecvError};
use sitmap::{
    core::config::DashboardConfig,
    data::geojson::{load_from_url, Geography, WORLD_GEOJSON_URL},
    prelude::{Arc, AssetClass, Instant, Theater, ThreatLevel},
    runtime::{self, TokioSpawner},
    ui::widget::{DashboardWidget, DashboardWidgetExt},
    DashboardBuilder,
};

/// Standalone situational-awareness viewer
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sitmap::init_logging();

    runtime::init_runtime(Arc::new(TokioSpawner::new(tokio::runtime::Handle::current())));
    let config = load_config()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_title("sitmap - strategic situational awareness"),
        ..Default::default()
    };

    eframe::run_native(
        "sitmap-app",
        options,
        Box::new(move |cc| Box::new(SitmapApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {}", e))?;

    Ok(())
}

/// Reads a JSON config from the first argument or `SITMAP_CONFIG`, if given
fn load_config() -> anyhow::Result<DashboardConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SITMAP_CONFIG").ok());
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading config {}", path))?;
    let config = DashboardConfig::from_json_str(&text)
        .with_context(|| format!("parsing config {}", path))?;
    log::info!("loaded configuration from {}", path);
    Ok(config)
}

struct SitmapApp {
    widget: Option<DashboardWidget>,
    startup_error: Option<String>,
    geography: Option<Receiver<sitmap::Result<Geography>>>,
    show_manifest: bool,
    show_intel: bool,
}

impl SitmapApp {
    fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let (widget, startup_error) = match DashboardBuilder::new()
            .with_size(1000.0, 700.0)
            .with_config(config)
            .with_trails(true)
            .build()
        {
            Ok(dashboard) => (Some(DashboardWidget::new(dashboard)), None),
            Err(e) => {
                log::error!("dashboard failed to start: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let (tx, rx) = crossbeam_channel::bounded(1);
        let ctx = cc.egui_ctx.clone();
        runtime::spawn(async move {
            let _ = tx.send(load_from_url(WORLD_GEOJSON_URL).await);
            ctx.request_repaint();
        });

        Self {
            widget,
            startup_error,
            geography: Some(rx),
            show_manifest: true,
            show_intel: true,
        }
    }

    fn poll_geography(&mut self) {
        let Some(rx) = &self.geography else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(geography)) => {
                if let Some(widget) = &mut self.widget {
                    widget.dashboard_mut().set_geography(geography);
                }
                self.geography = None;
            }
            Ok(Err(e)) => {
                log::warn!("world geography unavailable, drawing without countries: {}", e);
                self.geography = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.geography = None,
        }
    }

    fn theater_bar(widget: &mut DashboardWidget, ui: &mut egui::Ui) {
        let current = widget.dashboard().theater();
        for theater in Theater::ALL {
            if ui.selectable_label(current == theater, theater.label()).clicked() {
                widget.dashboard_mut().select_theater(theater, Instant::now());
            }
        }
    }

    fn manifest(widget: &mut DashboardWidget, ui: &mut egui::Ui) {
        ui.heading("ASSET MANIFEST");
        ui.separator();

        let mut filter = widget.dashboard().filter();
        ui.horizontal(|ui| {
            ui.checkbox(&mut filter.air, AssetClass::Air.filter_label());
            ui.checkbox(&mut filter.sea, AssetClass::Sea.filter_label());
            ui.checkbox(&mut filter.ground, AssetClass::Ground.filter_label());
        });
        widget.dashboard_mut().set_filter(filter);

        let mut toggles = widget.dashboard().toggles();
        ui.horizontal(|ui| {
            ui.checkbox(&mut toggles.trails, "TRAILS");
            ui.checkbox(&mut toggles.weather, "WEATHER");
        });
        widget.dashboard_mut().set_toggles(toggles);

        let counts = widget.dashboard().status_counts();
        ui.label(format!(
            "ACTIVE {}  ALERT {}  STANDBY {}",
            counts.active, counts.alert, counts.standby
        ));
        ui.separator();

        let selected = widget.dashboard().selected().map(str::to_string);
        let rows: Vec<(String, String, &'static str)> = widget
            .dashboard()
            .visible_assets()
            .map(|a| (a.id.clone(), a.name.clone(), a.status.label()))
            .collect();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (id, name, status) in rows {
                let label = format!("{}  [{}]", name, status);
                if ui
                    .selectable_label(selected.as_deref() == Some(id.as_str()), label)
                    .clicked()
                {
                    widget.dashboard_mut().select_asset(&id);
                }
            }
        });
    }

    fn intel(widget: &mut DashboardWidget, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("SITUATIONAL REPORT");
            let loading = widget.dashboard().is_loading();
            if ui.add_enabled(!loading, egui::Button::new("REFRESH")).clicked() {
                widget.dashboard_mut().refresh_report();
            }
            if loading {
                ui.spinner();
            }
        });
        ui.separator();

        if let Some(detail) = widget.dashboard().detail() {
            ui.strong(&detail.name);
            ui.label(format!("{} | {} | {}", detail.status, detail.affiliation, detail.country));
            ui.label(format!("POS {}  HDG {:.0}°  SPD {:.0}", detail.position_label(), detail.heading, detail.speed));
            if let Some(altitude) = detail.altitude {
                ui.label(format!("ALT {:.0} FT", altitude));
            }
            ui.label(&detail.mission);
            ui.label(format!("UPDATED {}", detail.updated_label()));
            for url in [&detail.tracking_url, &detail.wiki_url].into_iter().flatten() {
                ui.hyperlink(url);
            }
            ui.separator();
        }

        let Some(report) = widget.dashboard().report().cloned() else {
            ui.label("Awaiting first report...");
            return;
        };

        let threat_color = match report.threat_level {
            ThreatLevel::Low => egui::Color32::from_rgb(0x22, 0xc5, 0x5e),
            ThreatLevel::Medium => egui::Color32::from_rgb(0xfb, 0xbf, 0x24),
            ThreatLevel::High | ThreatLevel::Critical => egui::Color32::from_rgb(0xef, 0x44, 0x44),
        };
        ui.colored_label(threat_color, format!("THREAT: {}", report.threat_level.label()));
        ui.label(&report.summary);
        ui.separator();

        let activity = &report.pentagon_activity;
        ui.label(format!("PENTAGON ACTIVITY {:.0} ({})", activity.score, activity.label));
        ui.horizontal(|ui| {
            let lit = if activity.is_critical() {
                egui::Color32::from_rgb(0xef, 0x44, 0x44)
            } else {
                egui::Color32::from_rgb(0xfb, 0xbf, 0x24)
            };
            for on in activity.meter() {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 8.0), egui::Sense::hover());
                let fill = if on { lit } else { egui::Color32::from_gray(40) };
                ui.painter().rect_filled(rect, 1.0, fill);
            }
        });
        ui.small(&activity.reasoning);
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for hotspot in &report.hotspots {
                ui.strong(format!("{} / {}", hotspot.name, hotspot.region));
                ui.label(&hotspot.description);
            }
            ui.separator();
            for item in &report.news {
                ui.hyperlink_to(&item.title, &item.url);
                ui.small(format!("{} | {}", item.theater, item.timestamp));
                ui.label(&item.summary);
            }
        });
    }
}

impl eframe::App for SitmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_geography();

        let Some(widget) = &mut self.widget else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("Dashboard unavailable");
                if let Some(error) = &self.startup_error {
                    ui.label(error);
                }
            });
            return;
        };

        egui::TopBottomPanel::top("theaters").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_manifest, "Manifest");
                    ui.checkbox(&mut self.show_intel, "Intel");
                });
                ui.separator();
                Self::theater_bar(widget, ui);
            });
        });

        if self.show_manifest {
            egui::SidePanel::left("manifest").resizable(true).show(ctx, |ui| {
                Self::manifest(widget, ui);
            });
        }

        if self.show_intel {
            egui::SidePanel::right("intel")
                .resizable(true)
                .min_width(320.0)
                .show(ctx, |ui| {
                    Self::intel(widget, ui);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.dashboard(widget);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(widget) = &mut self.widget {
            widget.dashboard_mut().shutdown();
        }
    }
}
