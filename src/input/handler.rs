use crate::core::constants::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::core::geo::Point;
use crate::input::events::{DashboardEvent, InputEvent, KeyCode, MouseButton};
use crate::prelude::{HashMap, VecDeque};

/// What the dashboard should do in response to input
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Drag pan by a screen delta
    Pan { dx: f64, dy: f64 },
    /// Wheel zoom about the pointer
    Wheel { delta_y: f64, pointer: Point },
    /// Animated zoom about the viewport center
    ScaleBy(f64),
    ResetZoom,
    /// Pointer moved to a new screen position
    Hover(Point),
    /// Pointer left the surface
    Leave,
    /// Primary click at a screen position
    Select(Point),
    ClearSelection,
    Resize(Point),
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&DashboardEvent) + Send + Sync>;

/// Listener registry and outgoing event queue
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: HashMap<&'static str, Vec<EventCallback>>,
    event_queue: VecDeque<DashboardEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener for an event kind (see [`DashboardEvent::kind`])
    pub fn on<F>(&mut self, kind: &'static str, callback: F)
    where
        F: Fn(&DashboardEvent) + Send + Sync + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(callback));
    }

    pub fn emit(&mut self, event: DashboardEvent) {
        self.event_queue.push_back(event);
    }

    /// Dispatches queued events to their listeners and returns them
    pub fn process_events(&mut self) -> Vec<DashboardEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();
        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }
        events
    }

    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Drops every listener and pending event
    pub fn detach_all(&mut self) {
        self.listeners.clear();
        self.event_queue.clear();
    }
}

/// Translates raw input into dashboard actions
pub struct InputHandler {
    pub enabled: bool,
    pub zoom_on_wheel: bool,
    pub pan_on_drag: bool,
    /// Pixels moved per arrow key press
    pub keyboard_pan_step: f64,
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            zoom_on_wheel: true,
            pan_on_drag: true,
            keyboard_pan_step: 50.0,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Vec<Action> {
        if !self.enabled {
            return vec![];
        }

        match event {
            InputEvent::Click {
                position,
                button: MouseButton::Left,
            } => vec![Action::Select(position)],
            InputEvent::Click { .. } => vec![],
            InputEvent::MouseMove { position } => {
                if self.dragging {
                    vec![]
                } else {
                    vec![Action::Hover(position)]
                }
            }
            InputEvent::PointerLeave => {
                self.dragging = false;
                vec![Action::Leave]
            }
            InputEvent::DragStart { .. } => {
                self.dragging = self.pan_on_drag;
                vec![]
            }
            InputEvent::Drag { delta } => {
                if self.pan_on_drag {
                    vec![Action::Pan {
                        dx: delta.x,
                        dy: delta.y,
                    }]
                } else {
                    vec![]
                }
            }
            InputEvent::DragEnd => {
                self.dragging = false;
                vec![]
            }
            InputEvent::Scroll { delta, position } => {
                if self.zoom_on_wheel && delta != 0.0 {
                    vec![Action::Wheel {
                        delta_y: delta,
                        pointer: position,
                    }]
                } else {
                    vec![]
                }
            }
            InputEvent::KeyPress { key, .. } => {
                let step = self.keyboard_pan_step;
                match key {
                    KeyCode::Plus => vec![Action::ScaleBy(ZOOM_IN_FACTOR)],
                    KeyCode::Minus => vec![Action::ScaleBy(ZOOM_OUT_FACTOR)],
                    KeyCode::Home => vec![Action::ResetZoom],
                    KeyCode::Escape => vec![Action::ClearSelection],
                    KeyCode::ArrowUp => vec![Action::Pan { dx: 0.0, dy: step }],
                    KeyCode::ArrowDown => vec![Action::Pan { dx: 0.0, dy: -step }],
                    KeyCode::ArrowLeft => vec![Action::Pan { dx: step, dy: 0.0 }],
                    KeyCode::ArrowRight => vec![Action::Pan { dx: -step, dy: 0.0 }],
                    KeyCode::Other(_) => vec![],
                }
            }
            InputEvent::Resize { size } => vec![Action::Resize(size)],
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::KeyModifiers;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_drag_suppresses_hover() {
        let mut handler = InputHandler::new();
        handler.handle_event(InputEvent::DragStart {
            position: Point::new(0.0, 0.0),
        });
        assert!(handler.is_dragging());
        assert!(handler
            .handle_event(InputEvent::MouseMove {
                position: Point::new(5.0, 5.0)
            })
            .is_empty());
        assert_eq!(
            handler.handle_event(InputEvent::Drag {
                delta: Point::new(5.0, -2.0)
            }),
            vec![Action::Pan { dx: 5.0, dy: -2.0 }]
        );
        handler.handle_event(InputEvent::DragEnd);
        assert_eq!(
            handler.handle_event(InputEvent::MouseMove {
                position: Point::new(5.0, 5.0)
            }),
            vec![Action::Hover(Point::new(5.0, 5.0))]
        );
    }

    #[test]
    fn test_keyboard_zoom() {
        let mut handler = InputHandler::new();
        let press = |key| InputEvent::KeyPress {
            key,
            modifiers: KeyModifiers::default(),
        };
        assert_eq!(handler.handle_event(press(KeyCode::Plus)), vec![Action::ScaleBy(1.8)]);
        assert_eq!(handler.handle_event(press(KeyCode::Minus)), vec![Action::ScaleBy(0.6)]);
        assert_eq!(handler.handle_event(press(KeyCode::Home)), vec![Action::ResetZoom]);
    }

    #[test]
    fn test_disabled_handler_ignores_input() {
        let mut handler = InputHandler::new();
        handler.enabled = false;
        assert!(handler
            .handle_event(InputEvent::Click {
                position: Point::new(1.0, 1.0),
                button: MouseButton::Left
            })
            .is_empty());
    }

    #[test]
    fn test_listeners_receive_their_kind() {
        let mut manager = EventManager::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        manager.on("deselect", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.emit(DashboardEvent::SelectionCleared);
        manager.emit(DashboardEvent::Tick { moved: 1 });
        let events = manager.process_events();
        assert_eq!(events.len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        manager.detach_all();
        assert_eq!(manager.listener_count(), 0);
        manager.emit(DashboardEvent::SelectionCleared);
        manager.process_events();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
