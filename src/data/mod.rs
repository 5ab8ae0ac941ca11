pub mod asset;
pub mod geojson;
pub mod poi;
pub mod report;

pub use asset::{initial_assets, Affiliation, Asset, AssetClass, AssetStatus, CountryTag};
pub use geojson::{CountryShape, Geography};
pub use poi::{pois_in, strategic_pois, PoiKind, PointOfInterest};
pub use report::{NewsItem, SituationalReport, SourceType, ThreatLevel};
