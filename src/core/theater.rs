use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Named regions of interest, each with a predefined map focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theater {
    #[serde(rename = "GLOBAL")]
    Global,
    #[serde(rename = "UKRAINE")]
    Ukraine,
    #[serde(rename = "MIDDLE EAST", alias = "MIDDLE_EAST")]
    MiddleEast,
    #[serde(rename = "AFRICA")]
    Africa,
    #[serde(rename = "PACIFIC")]
    Pacific,
    #[serde(rename = "CARIBBEAN")]
    Caribbean,
    #[serde(rename = "SOUTH & CENTRAL AMERICA", alias = "SOUTH_CENTRAL_AMERICA")]
    SouthCentralAmerica,
    #[serde(rename = "IRAN")]
    Iran,
}

/// Map focus for a theater: center and target zoom scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheaterFocus {
    pub center: LatLng,
    pub zoom: f64,
}

impl Theater {
    pub const ALL: [Theater; 8] = [
        Theater::Global,
        Theater::Ukraine,
        Theater::MiddleEast,
        Theater::Africa,
        Theater::Pacific,
        Theater::Caribbean,
        Theater::SouthCentralAmerica,
        Theater::Iran,
    ];

    /// Display label, also the wire value
    pub fn label(self) -> &'static str {
        match self {
            Theater::Global => "GLOBAL",
            Theater::Ukraine => "UKRAINE",
            Theater::MiddleEast => "MIDDLE EAST",
            Theater::Africa => "AFRICA",
            Theater::Pacific => "PACIFIC",
            Theater::Caribbean => "CARIBBEAN",
            Theater::SouthCentralAmerica => "SOUTH & CENTRAL AMERICA",
            Theater::Iran => "IRAN",
        }
    }

    /// Lookup key: the label with every run of non-letters collapsed to `_`
    pub fn key(self) -> String {
        let mut key = String::new();
        for c in self.label().chars() {
            if c.is_ascii_uppercase() {
                key.push(c);
            } else if !key.ends_with('_') {
                key.push('_');
            }
        }
        key.trim_matches('_').to_string()
    }

    pub fn focus(self) -> TheaterFocus {
        let (lng, lat, zoom) = match self {
            Theater::Global => (0.0, 0.0, 1.0),
            Theater::Ukraine => (31.1, 48.3, 6.0),
            Theater::MiddleEast => (43.0, 24.0, 4.5),
            Theater::Africa => (10.0, 15.0, 3.5),
            Theater::Pacific => (125.0, 22.0, 4.5),
            Theater::Caribbean => (-75.0, 18.0, 4.0),
            Theater::SouthCentralAmerica => (-65.0, -15.0, 2.2),
            Theater::Iran => (53.0, 32.0, 5.0),
        };
        TheaterFocus {
            center: LatLng::from_lng_lat(lng, lat),
            zoom,
        }
    }

    pub fn is_global(self) -> bool {
        self == Theater::Global
    }
}

impl Default for Theater {
    fn default() -> Self {
        Theater::Global
    }
}

impl std::fmt::Display for Theater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Theater {
    type Err = crate::Error;

    /// Accepts either the label ("MIDDLE EAST") or the key ("MIDDLE_EAST")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Theater::ALL
            .into_iter()
            .find(|t| t.label() == wanted || t.key() == wanted)
            .ok_or_else(|| crate::Error::ParseError(format!("unknown theater: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(Theater::MiddleEast.key(), "MIDDLE_EAST");
        assert_eq!(Theater::SouthCentralAmerica.key(), "SOUTH_CENTRAL_AMERICA");
        assert_eq!(Theater::Global.key(), "GLOBAL");
    }

    #[test]
    fn test_parse() {
        assert_eq!("middle east".parse::<Theater>().unwrap(), Theater::MiddleEast);
        assert_eq!(
            "SOUTH_CENTRAL_AMERICA".parse::<Theater>().unwrap(),
            Theater::SouthCentralAmerica
        );
        assert!("ATLANTIS".parse::<Theater>().is_err());
    }

    #[test]
    fn test_focus_table() {
        let focus = Theater::Ukraine.focus();
        assert_eq!(focus.center, LatLng::new(48.3, 31.1));
        assert_eq!(focus.zoom, 6.0);
        assert_eq!(Theater::Global.focus().zoom, 1.0);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Theater::SouthCentralAmerica).unwrap();
        assert_eq!(json, "\"SOUTH & CENTRAL AMERICA\"");
        let parsed: Theater = serde_json::from_str("\"MIDDLE_EAST\"").unwrap();
        assert_eq!(parsed, Theater::MiddleEast);
    }
}
