pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{DashboardEvent, EventHandled, InputEvent, KeyCode, KeyModifiers, MouseButton};
pub use handler::{Action, EventManager, InputHandler};
