//! Situational report model and the offline fallback report.

use crate::core::theater::Theater;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Low => "LOW",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::High => "HIGH",
            ThreatLevel::Critical => "CRITICAL",
        }
    }
}

impl Default for ThreatLevel {
    fn default() -> Self {
        ThreatLevel::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    News,
    Social,
    Official,
}

impl Default for SourceType {
    fn default() -> Self {
        SourceType::News
    }
}

/// Activity index near the Pentagon, 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PentagonActivity {
    pub score: f64,
    pub label: String,
    pub reasoning: String,
}

impl Default for PentagonActivity {
    fn default() -> Self {
        Self {
            score: 15.0,
            label: "NORMAL".to_string(),
            reasoning: "Baseline telemetry active.".to_string(),
        }
    }
}

impl PentagonActivity {
    pub const METER_SEGMENTS: usize = 5;

    /// Lit state of each meter segment: segment `i` is lit at score >= i * 20
    pub fn meter(&self) -> [bool; Self::METER_SEGMENTS] {
        let mut lit = [false; Self::METER_SEGMENTS];
        for (i, segment) in lit.iter_mut().enumerate() {
            *segment = self.score >= (i as f64) * 20.0;
        }
        lit
    }

    /// Scores above 75 are drawn in the critical color
    pub fn is_critical(&self) -> bool {
        self.score > 75.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotspot {
    pub name: String,
    pub region: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsItem {
    /// Theater label, or "GLOBAL"
    pub theater: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    /// Free-form relative time ("NOW", "2h ago")
    pub timestamp: String,
    pub source_type: SourceType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SituationalReport {
    pub timestamp: String,
    pub summary: String,
    pub threat_level: ThreatLevel,
    #[serde(deserialize_with = "null_as_default")]
    pub pentagon_activity: PentagonActivity,
    #[serde(deserialize_with = "null_as_default")]
    pub hotspots: Vec<Hotspot>,
    #[serde(deserialize_with = "null_as_default")]
    pub news: Vec<NewsItem>,
}

// The service sends `null` for sections it has nothing for
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SituationalReport {
    /// Parses service output. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        let trimmed = strip_code_fence(text.trim());
        let trimmed = if trimmed.is_empty() { "{}" } else { trimmed };
        Ok(serde_json::from_str(trimmed)?)
    }

    /// Served whenever the report service cannot be reached or parsed
    pub fn fallback(theater: Theater) -> Self {
        let label = theater.label();
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            summary: format!(
                "Surveillance of {} is currently utilizing cached telemetry.",
                label
            ),
            threat_level: ThreatLevel::Medium,
            pentagon_activity: PentagonActivity {
                score: 42.0,
                label: "ELEVATED".to_string(),
                reasoning: "Satellite link delay, estimating based on last known patterns."
                    .to_string(),
            },
            hotspots: vec![Hotspot {
                name: "Sector A".to_string(),
                region: label.to_string(),
                description: "Routine monitoring active.".to_string(),
            }],
            news: vec![NewsItem {
                theater: label.to_string(),
                title: "Intel Link Degraded".to_string(),
                summary: "Re-establishing secure link...".to_string(),
                url: "#".to_string(),
                timestamp: "NOW".to_string(),
                source_type: SourceType::Official,
            }],
        }
    }
}

// Models sometimes wrap JSON in a markdown fence even when asked not to
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gets_defaults() {
        let report = SituationalReport::from_json_str("{}").unwrap();
        assert!(report.news.is_empty());
        assert!(report.hotspots.is_empty());
        assert_eq!(report.pentagon_activity.score, 15.0);
        assert_eq!(report.pentagon_activity.label, "NORMAL");
        assert_eq!(report.pentagon_activity.reasoning, "Baseline telemetry active.");
    }

    #[test]
    fn test_null_sections_get_defaults() {
        let json = r#"{"summary":"Fleet repositioning.","threatLevel":"HIGH","pentagonActivity":null,"news":null,"hotspots":null}"#;
        let report = SituationalReport::from_json_str(json).unwrap();
        assert_eq!(report.summary, "Fleet repositioning.");
        assert_eq!(report.threat_level, ThreatLevel::High);
        assert!(report.news.is_empty());
        assert!(report.hotspots.is_empty());
        assert_eq!(report.pentagon_activity, PentagonActivity::default());
    }

    #[test]
    fn test_parses_wire_names() {
        let json = r#"{
            "timestamp": "2026-01-01T00:00:00Z",
            "summary": "Posture stable.",
            "threatLevel": "HIGH",
            "pentagonActivity": {"score": 80, "label": "CRITICAL", "reasoning": "Pizza."},
            "hotspots": [{"name": "Kharkiv", "region": "UKRAINE", "description": "Shelling"}],
            "news": [{"theater": "UKRAINE", "title": "T", "summary": "S", "url": "u",
                      "timestamp": "1h", "sourceType": "SOCIAL"}]
        }"#;
        let report = SituationalReport::from_json_str(json).unwrap();
        assert_eq!(report.threat_level, ThreatLevel::High);
        assert!(report.pentagon_activity.is_critical());
        assert_eq!(report.news[0].source_type, SourceType::Social);
        assert_eq!(report.hotspots[0].name, "Kharkiv");
    }

    #[test]
    fn test_fenced_json() {
        let report = SituationalReport::from_json_str("```json\n{\"summary\":\"x\"}\n```").unwrap();
        assert_eq!(report.summary, "x");
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(SituationalReport::from_json_str("not json").is_err());
    }

    #[test]
    fn test_fallback_is_fully_populated() {
        let report = SituationalReport::fallback(Theater::MiddleEast);
        assert_eq!(
            report.summary,
            "Surveillance of MIDDLE EAST is currently utilizing cached telemetry."
        );
        assert_eq!(report.threat_level, ThreatLevel::Medium);
        assert_eq!(report.pentagon_activity.score, 42.0);
        assert_eq!(report.hotspots[0].region, "MIDDLE EAST");
        assert_eq!(report.news[0].title, "Intel Link Degraded");
        assert_eq!(report.news[0].source_type, SourceType::Official);
        assert!(!report.timestamp.is_empty());
    }

    #[test]
    fn test_meter_segments() {
        let activity = PentagonActivity {
            score: 42.0,
            ..PentagonActivity::default()
        };
        assert_eq!(activity.meter(), [true, true, true, false, false]);
        assert!(!activity.is_critical());
    }
}
