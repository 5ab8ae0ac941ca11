use crate::{
    core::{
        constants::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR},
        dashboard::Dashboard,
        geo::Point,
    },
    input::events::{InputEvent, KeyCode, KeyModifiers, MouseButton},
    prelude::Instant,
    rendering::style::palette,
    ui::painter::{color, paint_scene},
};
use chrono::Utc;
use egui::{Align2, Color32, CursorIcon, FontId, Rect, Response, Sense, Stroke, Ui, Vec2};
use std::time::Duration;

/// Interactive dashboard widget configuration
#[derive(Debug, Clone)]
pub struct DashboardWidgetConfig {
    pub interactive: bool,
    pub show_zoom_controls: bool,
    pub show_hud: bool,
    pub preferred_size: Option<Vec2>,
    /// Upper bound on idle repaint spacing
    pub max_repaint_interval: Duration,
}

impl Default for DashboardWidgetConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            show_zoom_controls: true,
            show_hud: true,
            preferred_size: None,
            max_repaint_interval: Duration::from_millis(250),
        }
    }
}

/// Owns a [`Dashboard`] and drives it from egui: translates pointer and
/// keyboard input, pumps it once per frame and paints its scene.
pub struct DashboardWidget {
    dashboard: Dashboard,
    config: DashboardWidgetConfig,
    started: Instant,
    pointer_inside: bool,
}

impl DashboardWidget {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            config: DashboardWidgetConfig::default(),
            started: Instant::now(),
            pointer_inside: false,
        }
    }

    pub fn with_config(mut self, config: DashboardWidgetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let desired_size = self.config.preferred_size.unwrap_or_else(|| ui.available_size());
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());
        let now = Instant::now();

        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if size != self.dashboard.projection().size {
            self.dashboard.handle_input(InputEvent::Resize { size }, now);
        }

        if self.config.interactive {
            for event in self.collect_input(ui, rect, &response) {
                self.dashboard.handle_input(event, now);
            }
        }

        self.dashboard.pump(now, Utc::now());

        let painter = ui.painter_at(rect);
        paint_scene(&painter, rect, self.dashboard.scene(), now - self.started);

        if self.config.show_hud {
            self.paint_hud(&painter, rect);
        }
        self.paint_weather(&painter, rect);

        if self.config.show_zoom_controls {
            self.zoom_controls(ui, rect, now);
        }

        if response.dragged() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if self.dashboard.hover().asset.is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        self.schedule_repaint(ui, now);
        response
    }

    fn collect_input(&mut self, ui: &Ui, rect: Rect, response: &Response) -> Vec<InputEvent> {
        let local = |pos: egui::Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
        let mut events = Vec::new();

        match response.hover_pos() {
            Some(pos) => {
                self.pointer_inside = true;
                events.push(InputEvent::MouseMove { position: local(pos) });

                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    // egui reports wheel-up as positive; the zoom gesture expects the opposite
                    events.push(InputEvent::Scroll {
                        delta: -scroll as f64,
                        position: local(pos),
                    });
                }

                let modifiers = ui.input(|i| KeyModifiers {
                    shift: i.modifiers.shift,
                    ctrl: i.modifiers.ctrl,
                    alt: i.modifiers.alt,
                    meta: i.modifiers.mac_cmd,
                });
                for (key, code) in [
                    (egui::Key::Plus, KeyCode::Plus),
                    (egui::Key::Equals, KeyCode::Plus),
                    (egui::Key::Minus, KeyCode::Minus),
                    (egui::Key::Home, KeyCode::Home),
                    (egui::Key::Escape, KeyCode::Escape),
                    (egui::Key::ArrowUp, KeyCode::ArrowUp),
                    (egui::Key::ArrowDown, KeyCode::ArrowDown),
                    (egui::Key::ArrowLeft, KeyCode::ArrowLeft),
                    (egui::Key::ArrowRight, KeyCode::ArrowRight),
                ] {
                    if ui.input(|i| i.key_pressed(key)) {
                        events.push(InputEvent::KeyPress { key: code, modifiers });
                    }
                }
            }
            None if self.pointer_inside => {
                self.pointer_inside = false;
                events.push(InputEvent::PointerLeave);
            }
            None => {}
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(InputEvent::DragStart { position: local(pos) });
            }
        }
        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                events.push(InputEvent::Drag {
                    delta: Point::new(delta.x as f64, delta.y as f64),
                });
            }
        }
        if response.drag_released() {
            events.push(InputEvent::DragEnd);
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(InputEvent::Click {
                    position: local(pos),
                    button: MouseButton::Left,
                });
            }
        }

        events
    }

    fn zoom_controls(&mut self, ui: &mut Ui, rect: Rect, now: Instant) {
        let button = Vec2::splat(28.0);
        let column = rect.right_top() + Vec2::new(-40.0, 10.0);
        let controls: [(&str, f32); 3] = [("+", 0.0), ("-", 34.0), ("⟲", 68.0)];

        for (label, offset) in controls {
            let at = Rect::from_min_size(column + Vec2::new(0.0, offset), button);
            if ui.put(at, egui::Button::new(label)).clicked() {
                match label {
                    "+" => self.dashboard.scale_by(ZOOM_IN_FACTOR, now),
                    "-" => self.dashboard.scale_by(ZOOM_OUT_FACTOR, now),
                    _ => self.dashboard.reset_zoom(now),
                };
            }
        }
    }

    fn paint_hud(&self, painter: &egui::Painter, rect: Rect) {
        let hud = self.dashboard.hud();
        let text = format!("{}\n{}", hud.mag_label(), hud.loc_label());
        painter.text(
            rect.left_bottom() + Vec2::new(12.0, -12.0),
            Align2::LEFT_BOTTOM,
            text,
            FontId::monospace(11.0),
            color(palette::CITY_LABEL, 1.0),
        );
    }

    fn paint_weather(&self, painter: &egui::Painter, rect: Rect) {
        let Some(tooltip) = &self.dashboard.hover().weather else {
            return;
        };
        let weather = &tooltip.weather;
        let text = format!(
            "{}\nTEMP {}°C\nWIND {} KTS\n{}",
            weather.name.to_uppercase(),
            weather.temp,
            weather.wind,
            weather.condition.label()
        );

        let anchor = rect.min + Vec2::new(tooltip.position.x as f32, tooltip.position.y as f32);
        let galley = painter.layout_no_wrap(text, FontId::monospace(11.0), Color32::WHITE);
        let frame = Rect::from_min_size(anchor, galley.size() + Vec2::splat(12.0));
        painter.rect(
            frame,
            2.0,
            Color32::from_black_alpha(220),
            Stroke::new(1.0, color(palette::COUNTRY_STROKE, 1.0)),
        );
        painter.galley(anchor + Vec2::splat(6.0), galley, Color32::WHITE);
    }

    fn schedule_repaint(&self, ui: &Ui, now: Instant) {
        let ctx = ui.ctx();
        let pulsing = self.dashboard.scene().assets.iter().any(|a| a.pulse.is_some());
        if self.dashboard.is_animating() || pulsing || self.dashboard.is_loading() {
            ctx.request_repaint();
            return;
        }
        let wait = self
            .dashboard
            .time_until_next_tick(now)
            .unwrap_or(self.config.max_repaint_interval)
            .min(self.config.max_repaint_interval);
        ctx.request_repaint_after(wait);
    }
}

pub trait DashboardWidgetExt {
    fn dashboard(&mut self, widget: &mut DashboardWidget) -> Response;
}

impl DashboardWidgetExt for Ui {
    fn dashboard(&mut self, widget: &mut DashboardWidget) -> Response {
        widget.show(self)
    }
}
