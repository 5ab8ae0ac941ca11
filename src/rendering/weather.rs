use crate::core::constants::TOOLTIP_OFFSET;
use crate::core::geo::{LatLng, Point};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherCondition {
    Clear,
    Gale,
    Snow,
    Heatwave,
    Storm,
}

impl WeatherCondition {
    pub fn label(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "CLEAR",
            WeatherCondition::Gale => "GALE",
            WeatherCondition::Snow => "SNOW",
            WeatherCondition::Heatwave => "HEATWAVE",
            WeatherCondition::Storm => "STORM",
        }
    }
}

/// Synthetic weather for the hover tooltip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoWeather {
    pub name: String,
    /// Degrees Celsius
    pub temp: i32,
    /// Knots
    pub wind: i32,
    pub condition: WeatherCondition,
}

impl PseudoWeather {
    pub fn at(location: &LatLng, name: impl Into<String>) -> Self {
        let (lat, lng) = (location.lat, location.lng);
        let base = 25.0 - lat.abs() * 0.55;
        let variation = ((lat * 0.1).sin() + (lng * 0.1).cos()) * 5.0;
        let temp = round_half_up(base + variation) as i32;
        let wind = round_half_up(((lat * lng).sin() * 40.0).abs() + 5.0) as i32;

        let condition = if wind > 30 {
            WeatherCondition::Gale
        } else if temp < 0 {
            WeatherCondition::Snow
        } else if temp > 32 {
            WeatherCondition::Heatwave
        } else if coordinate_hash(lat, lng) > 0.8 {
            WeatherCondition::Storm
        } else {
            WeatherCondition::Clear
        };

        Self {
            name: name.into(),
            temp,
            wind,
            condition,
        }
    }
}

// Rounds .5 toward positive infinity
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Deterministic value in [0, 1) for a coordinate
fn coordinate_hash(lat: f64, lng: f64) -> f64 {
    let v = ((lat * 12.9898 + lng * 78.233).sin() * 43758.5453).fract();
    v.abs()
}

/// Tooltip anchor for a pointer position
pub fn tooltip_position(pointer: &Point) -> Point {
    Point::new(pointer.x + TOOLTIP_OFFSET, pointer.y + TOOLTIP_OFFSET)
}
