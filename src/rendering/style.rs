//! Colors and the rule tables that drive styling.

use crate::data::asset::{Affiliation, Asset, CountryTag};
use crate::data::poi::PoiKind;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> crate::Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let byte = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| crate::Error::ParseError(format!("invalid color: {}", hex)))
        };
        match digits.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                a: byte(6)?,
                ..Self::rgb(byte(0)?, byte(2)?, byte(4)?)
            }),
            _ => Err(crate::Error::ParseError(format!("invalid color: {}", hex))),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::rgb(0x05, 0x05, 0x07);
    pub const RUSSIA: Rgba = Rgba::rgb(0xef, 0x44, 0x44);
    pub const CHINA: Rgba = Rgba::rgb(0xfb, 0xbf, 0x24);
    pub const FRIENDLY_BLOC: Rgba = Rgba::rgb(0x3b, 0x82, 0xf6);
    pub const ALLIED: Rgba = Rgba::rgb(0x22, 0xc5, 0x5e);
    pub const UNKNOWN: Rgba = Rgba::rgb(0xa8, 0x55, 0xf7);
    pub const OTHER: Rgba = Rgba::rgb(0x94, 0xa3, 0xb8);

    pub const COUNTRY_FILL: Rgba = Rgba::rgb(0x11, 0x14, 0x18);
    pub const COUNTRY_HOVER: Rgba = Rgba::rgb(0x1c, 0x22, 0x29);
    pub const COUNTRY_FILL_WEATHER: Rgba = Rgba::rgb(0x0d, 0x1b, 0x2a);
    pub const COUNTRY_HOVER_WEATHER: Rgba = Rgba::rgb(0x1b, 0x26, 0x3b);
    pub const COUNTRY_STROKE: Rgba = Rgba::rgb(0x3a, 0x41, 0x4a);

    pub const CITY_MARKER: Rgba = Rgba::rgb(0xe2, 0xe8, 0xf0);
    pub const CITY_LABEL: Rgba = Rgba::rgb(0x94, 0xa3, 0xb8);
    pub const TACTICAL_POI: Rgba = Rgba::rgb(0xfb, 0xbf, 0x24);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMatch {
    Country(CountryTag),
    Affiliation(Affiliation),
}

impl ColorMatch {
    fn matches(&self, asset: &Asset) -> bool {
        match *self {
            ColorMatch::Country(country) => asset.country == country,
            ColorMatch::Affiliation(affiliation) => asset.affiliation == affiliation,
        }
    }
}

/// Asset color rules; first match wins
pub const COLOR_RULES: &[(ColorMatch, Rgba)] = &[
    (ColorMatch::Country(CountryTag::Russia), palette::RUSSIA),
    (ColorMatch::Country(CountryTag::China), palette::CHINA),
    (ColorMatch::Affiliation(Affiliation::FriendlyBloc), palette::FRIENDLY_BLOC),
    (ColorMatch::Affiliation(Affiliation::Allied), palette::ALLIED),
    (ColorMatch::Affiliation(Affiliation::Unknown), palette::UNKNOWN),
];

pub fn asset_color(asset: &Asset) -> Rgba {
    COLOR_RULES
        .iter()
        .find(|(rule, _)| rule.matches(asset))
        .map(|(_, color)| *color)
        .unwrap_or(palette::OTHER)
}

/// Opacity as a step function of zoom scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoiVisibility {
    Hidden,
    /// `above` once the scale reaches `threshold` (or exceeds it when
    /// `inclusive` is false), `below` otherwise
    Step {
        threshold: f64,
        inclusive: bool,
        below: f64,
        above: f64,
    },
}

impl PoiVisibility {
    pub fn opacity(&self, k: f64) -> f64 {
        match *self {
            PoiVisibility::Hidden => 0.0,
            PoiVisibility::Step {
                threshold,
                inclusive,
                below,
                above,
            } => {
                let past = if inclusive { k >= threshold } else { k > threshold };
                if past {
                    above
                } else {
                    below
                }
            }
        }
    }
}

pub const POI_VISIBILITY_RULES: &[(PoiKind, PoiVisibility)] = &[
    (
        PoiKind::City,
        PoiVisibility::Step { threshold: 1.4, inclusive: true, below: 0.35, above: 1.0 },
    ),
    (
        PoiKind::Strait,
        PoiVisibility::Step { threshold: 2.5, inclusive: false, below: 0.0, above: 1.0 },
    ),
    (
        PoiKind::Base,
        PoiVisibility::Step { threshold: 5.0, inclusive: false, below: 0.0, above: 1.0 },
    ),
    (PoiKind::Sea, PoiVisibility::Hidden),
    (PoiKind::Province, PoiVisibility::Hidden),
];

pub fn poi_opacity(kind: PoiKind, k: f64) -> f64 {
    POI_VISIBILITY_RULES
        .iter()
        .find(|(rule_kind, _)| *rule_kind == kind)
        .map(|(_, visibility)| visibility.opacity(k))
        .unwrap_or(0.0)
}
