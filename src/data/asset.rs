//! Asset model and the initial roster.

use crate::core::geo::LatLng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    #[serde(alias = "AIRCRAFT")]
    Air,
    #[serde(alias = "VESSEL")]
    Sea,
    Ground,
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [AssetClass::Air, AssetClass::Sea, AssetClass::Ground];

    pub fn label(self) -> &'static str {
        match self {
            AssetClass::Air => "AIR",
            AssetClass::Sea => "SEA",
            AssetClass::Ground => "GROUND",
        }
    }

    /// Filter label shown to the operator
    pub fn filter_label(self) -> &'static str {
        match self {
            AssetClass::Air => "AIRCRAFT",
            AssetClass::Sea => "NAVAL",
            AssetClass::Ground => "GROUND",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Active,
    Standby,
    Alert,
}

impl AssetStatus {
    pub fn label(self) -> &'static str {
        match self {
            AssetStatus::Active => "ACTIVE",
            AssetStatus::Standby => "STANDBY",
            AssetStatus::Alert => "ALERT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Affiliation {
    #[serde(alias = "NATO")]
    FriendlyBloc,
    Allied,
    Neutral,
    #[serde(alias = "OPFOR")]
    Opposing,
    Unknown,
}

impl Affiliation {
    pub fn label(self) -> &'static str {
        match self {
            Affiliation::FriendlyBloc => "NATO",
            Affiliation::Allied => "ALLIED",
            Affiliation::Neutral => "NEUTRAL",
            Affiliation::Opposing => "OPFOR",
            Affiliation::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountryTag {
    Usa,
    Uk,
    Russia,
    China,
    Taiwan,
    Japan,
    Ukraine,
    Other,
    Unknown,
}

impl CountryTag {
    pub fn label(self) -> &'static str {
        match self {
            CountryTag::Usa => "USA",
            CountryTag::Uk => "UK",
            CountryTag::Russia => "RUSSIA",
            CountryTag::China => "CHINA",
            CountryTag::Taiwan => "TAIWAN",
            CountryTag::Japan => "JAPAN",
            CountryTag::Ukraine => "UKRAINE",
            CountryTag::Other => "OTHER",
            CountryTag::Unknown => "UNKNOWN",
        }
    }
}

/// A simulated strategic asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub class: AssetClass,
    pub status: AssetStatus,
    pub affiliation: Affiliation,
    pub country: CountryTag,
    pub position: LatLng,
    /// Not used by the kinematics
    pub destination: LatLng,
    pub speed: f64,
    /// Feet, cosmetic
    pub altitude: f64,
    #[serde(deserialize_with = "deserialize_heading")]
    heading: f64,
    pub mission: String,
    pub last_updated: DateTime<Utc>,
    pub tracking_url: Option<String>,
    pub wiki_url: Option<String>,
    /// Most recent positions, oldest first
    #[serde(default)]
    pub trail: VecDeque<LatLng>,
}

impl Asset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: AssetClass,
        status: AssetStatus,
        affiliation: Affiliation,
        country: CountryTag,
        position: LatLng,
        heading: f64,
        speed: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class,
            status,
            affiliation,
            country,
            position,
            destination: position,
            speed,
            altitude: 0.0,
            heading: normalize_heading(heading),
            mission: String::new(),
            last_updated: Utc::now(),
            tracking_url: None,
            wiki_url: None,
            trail: VecDeque::new(),
        }
    }

    pub fn with_destination(mut self, destination: LatLng) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.mission = mission.into();
        self
    }

    pub fn with_wiki_url(mut self, url: impl Into<String>) -> Self {
        self.wiki_url = Some(url.into());
        self
    }

    pub fn with_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.tracking_url = Some(url.into());
        self
    }

    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = at;
        self
    }

    /// Heading in degrees, always in [0, 360)
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = normalize_heading(degrees);
    }

    pub fn is_parked(&self) -> bool {
        self.speed == 0.0
    }

    pub fn is_alert(&self) -> bool {
        self.status == AssetStatus::Alert
    }

    /// Appends to the trail, evicting the oldest entries beyond `cap`
    pub fn push_trail(&mut self, point: LatLng, cap: usize) {
        self.trail.push_back(point);
        while self.trail.len() > cap {
            self.trail.pop_front();
        }
    }
}

/// Maps any finite angle into [0, 360)
pub fn normalize_heading(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let h = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn deserialize_heading<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(normalize_heading)
}

/// The starting roster, all stamped with `now`
pub fn initial_assets(now: DateTime<Utc>) -> Vec<Asset> {
    use Affiliation::*;
    use AssetClass::*;
    use AssetStatus::*;
    use CountryTag::*;

    vec![
        Asset::new("USN-CVN-78", "USS Gerald R. Ford", Sea, Active, FriendlyBloc, Usa, LatLng::new(38.5, -45.0), 65.0, 30.0)
            .with_destination(LatLng::new(45.0, -15.0))
            .with_mission("Atlantic Sentinel Patrol")
            .with_wiki_url("https://en.wikipedia.org/wiki/USS_Gerald_R._Ford"),
        Asset::new("RN-R08", "HMS Queen Elizabeth", Sea, Standby, FriendlyBloc, Uk, LatLng::new(50.8, -1.1), 0.0, 0.0)
            .with_mission("Maintenance - Portsmouth")
            .with_wiki_url("https://en.wikipedia.org/wiki/HMS_Queen_Elizabeth_(R08)"),
        Asset::new("FRA-R91", "Charles de Gaulle", Sea, Active, FriendlyBloc, Other, LatLng::new(43.1, 5.9), 145.0, 25.0)
            .with_destination(LatLng::new(35.0, 25.0))
            .with_mission("Mission Akila - Mediterranean Presence"),
        Asset::new("NATO-EFP-POL", "Battle Group Poland (Abrams)", Ground, Alert, FriendlyBloc, Usa, LatLng::new(53.8, 21.9), 0.0, 0.0)
            .with_mission("Enhanced Forward Presence - Eastern Flank"),
        Asset::new("RFS-011", "Varyag (Slava-class)", Sea, Active, Opposing, Russia, LatLng::new(38.0, 135.0), 340.0, 15.0)
            .with_destination(LatLng::new(40.0, 132.0))
            .with_mission("Pacific Command Patrol"),
        Asset::new("PLAN-17", "Shandong (Type 002)", Sea, Active, Opposing, China, LatLng::new(18.5, 112.5), 210.0, 22.0)
            .with_destination(LatLng::new(15.0, 110.0))
            .with_mission("South China Sea Sovereignty Mission"),
        Asset::new("IN-R33", "INS Vikramaditya", Sea, Active, Neutral, Other, LatLng::new(15.4, 73.8), 240.0, 20.0)
            .with_destination(LatLng::new(10.0, 65.0))
            .with_mission("Arabian Sea Task Force"),
        Asset::new("IRN-SAHAND", "Sahand (Moudge-class)", Sea, Alert, Opposing, Other, LatLng::new(27.1, 56.2), 120.0, 18.0)
            .with_destination(LatLng::new(25.0, 58.0))
            .with_mission("Strait of Hormuz Surveillance"),
        Asset::new("IRA-W5114", "Mahan Air W5114", Air, Active, Opposing, Other, LatLng::new(35.7, 51.4), 245.0, 480.0)
            .with_destination(LatLng::new(33.5, 36.3))
            .with_altitude(34_000.0)
            .with_mission("Tehran-Damascus Logistical Corridor"),
        Asset::new("IRIAF-F14", "IRIAF Tomcat (Patrol)", Air, Alert, Opposing, Other, LatLng::new(32.6, 51.7), 210.0, 550.0)
            .with_destination(LatLng::new(28.0, 50.0))
            .with_altitude(28_000.0)
            .with_mission("Air Supremacy - Central Province Monitoring"),
        Asset::new("USAF-RQ-4", "Global Hawk (Surveillance)", Air, Active, FriendlyBloc, Usa, LatLng::new(25.0, 55.0), 320.0, 310.0)
            .with_destination(LatLng::new(27.0, 53.0))
            .with_altitude(60_000.0)
            .with_mission("High-Altitude Persian Gulf Monitoring"),
    ]
    .into_iter()
    .map(|asset| asset.stamped(now))
    .collect()
}
