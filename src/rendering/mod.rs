pub mod curve;
pub mod hit_test;
pub mod icons;
pub mod renderer;
pub mod scene;
pub mod style;
pub mod svg;
pub mod weather;

// Re-export main types
pub use renderer::{RenderOutcome, SceneInput, SceneRenderer};
pub use scene::{AssetNode, CountryNode, LayerKind, LayerToggles, PoiNode, PulseRing, Scene, TrailNode};
pub use style::{asset_color, poi_opacity, Rgba, COLOR_RULES, POI_VISIBILITY_RULES};
pub use weather::{PseudoWeather, WeatherCondition};
