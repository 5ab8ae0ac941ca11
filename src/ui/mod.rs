pub mod painter;
pub mod widget;

pub use painter::paint_scene;
pub use widget::{DashboardWidget, DashboardWidgetConfig, DashboardWidgetExt};
