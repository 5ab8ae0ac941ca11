use crate::core::geo::{LatLng, Point};
use crate::core::theater::Theater;
use crate::core::viewport::Transform;
use serde::{Deserialize, Serialize};

/// Raw input delivered by the host surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Press and release without travel
    Click {
        position: Point,
        button: MouseButton,
    },
    /// Mouse move
    MouseMove { position: Point },
    /// Pointer left the map surface
    PointerLeave,
    /// Start of drag operation
    DragStart { position: Point },
    /// Drag in progress
    Drag { delta: Point },
    /// End of drag operation
    DragEnd,
    /// Scroll wheel; positive `delta` scrolls down (zooms out)
    Scroll { delta: f64, position: Point },
    /// Keyboard input
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Viewport/window resize
    Resize { size: Point },
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
    Home,
    Escape,
    Other(u32),
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Notifications emitted by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The zoom transform changed
    TransformChanged { transform: Transform },
    AssetSelected { id: String },
    SelectionCleared,
    AssetHovered { id: Option<String> },
    CountryHovered { name: Option<String>, location: Option<LatLng> },
    TheaterChanged { theater: Theater },
    ReportRequested { theater: Theater, sequence: u64 },
    ReportUpdated { theater: Theater },
    Tick { moved: usize },
}

impl DashboardEvent {
    /// Listener key for this event
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardEvent::TransformChanged { .. } => "transform",
            DashboardEvent::AssetSelected { .. } => "select",
            DashboardEvent::SelectionCleared => "deselect",
            DashboardEvent::AssetHovered { .. } => "assethover",
            DashboardEvent::CountryHovered { .. } => "countryhover",
            DashboardEvent::TheaterChanged { .. } => "theater",
            DashboardEvent::ReportRequested { .. } => "reportrequest",
            DashboardEvent::ReportUpdated { .. } => "report",
            DashboardEvent::Tick { .. } => "tick",
        }
    }
}
