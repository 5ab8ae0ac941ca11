//! Dead-reckoning simulation of the asset roster.

pub mod clock;

pub use clock::SimulationClock;

use crate::core::config::SimulationConfig;
use crate::core::geo::LatLng;
use crate::data::asset::{Asset, AssetClass, AssetStatus};
use chrono::{DateTime, Utc};

/// Per-status asset counts for the status chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub active: usize,
    pub alert: usize,
    pub standby: usize,
}

/// Owns every asset. The only writer is [`AssetStore::tick`].
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    assets: Vec<Asset>,
    revision: u64,
}

impl AssetStore {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets, revision: 0 }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Bumped whenever any asset moves
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Advances every moving asset one step. Returns how many moved.
    pub fn tick(&mut self, now: DateTime<Utc>, config: &SimulationConfig) -> usize {
        let mut moved = 0;
        for asset in &mut self.assets {
            if step(asset, now, config) {
                moved += 1;
            }
        }
        if moved > 0 {
            self.revision += 1;
        }
        log::trace!("tick moved {} assets", moved);
        moved
    }

    pub fn visible<'a>(&'a self, filter: &'a ClassFilter) -> impl Iterator<Item = &'a Asset> + 'a {
        self.assets.iter().filter(move |a| filter.allows(a.class))
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.assets
            .iter()
            .fold(StatusCounts::default(), |mut counts, asset| {
                match asset.status {
                    AssetStatus::Active => counts.active += 1,
                    AssetStatus::Alert => counts.alert += 1,
                    AssetStatus::Standby => counts.standby += 1,
                }
                counts
            })
    }
}

/// Moves one asset along its heading.
///
/// `delta = base_scale * speed / 10`; longitude advances by `delta * sin(h)`,
/// latitude by `delta * cos(h)`. The pre-move position goes on the trail.
pub fn step(asset: &mut Asset, now: DateTime<Utc>, config: &SimulationConfig) -> bool {
    if asset.is_parked() || !asset.speed.is_finite() {
        return false;
    }

    let heading = asset.heading().to_radians();
    let delta = config.base_scale * (asset.speed / 10.0);
    let previous = asset.position;

    asset.position = LatLng::new(
        previous.lat + delta * heading.cos(),
        previous.lng + delta * heading.sin(),
    );
    asset.push_trail(previous, config.trail_cap);
    asset.last_updated = now;
    true
}

/// Which asset classes the manifest currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassFilter {
    pub air: bool,
    pub sea: bool,
    pub ground: bool,
}

impl Default for ClassFilter {
    fn default() -> Self {
        Self {
            air: true,
            sea: true,
            ground: true,
        }
    }
}

impl ClassFilter {
    pub fn allows(&self, class: AssetClass) -> bool {
        match class {
            AssetClass::Air => self.air,
            AssetClass::Sea => self.sea,
            AssetClass::Ground => self.ground,
        }
    }

    pub fn set(&mut self, class: AssetClass, enabled: bool) {
        match class {
            AssetClass::Air => self.air = enabled,
            AssetClass::Sea => self.sea = enabled,
            AssetClass::Ground => self.ground = enabled,
        }
    }

    pub fn toggle(&mut self, class: AssetClass) {
        self.set(class, !self.allows(class));
    }
}
