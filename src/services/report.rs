//! Situational report client.
//!
//! Talks to a generateContent-style JSON endpoint, asks for a report as a
//! JSON document, and tops up thin news lists with the web sources the
//! service cites. Any failure is replaced by
//! [`SituationalReport::fallback`] in [`fetch_or_fallback`].

use crate::core::config::ReportConfig;
use crate::core::constants::{MAX_NEWS_ITEMS, MIN_NEWS_BEFORE_GROUNDING};
use crate::core::theater::Theater;
use crate::data::report::{NewsItem, SituationalReport, SourceType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Anything that can produce a report for a theater
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self, theater: Theater) -> crate::Result<SituationalReport>;
}

/// Fetches a report, substituting the offline fallback on any error
pub async fn fetch_or_fallback(source: &dyn ReportSource, theater: Theater) -> SituationalReport {
    match source.fetch(theater).await {
        Ok(report) => report,
        Err(e) => {
            log::warn!("situational report for {} unavailable: {}", theater, e);
            SituationalReport::fallback(theater)
        }
    }
}

/// Prompt sent to the service for `theater`
pub fn build_prompt(theater: Theater) -> String {
    let context = if theater.is_global() {
        "globally across all major conflict zones (Ukraine, Middle East, Africa, Pacific)".to_string()
    } else {
        format!("specifically for the {} theater of operations", theater.label())
    };

    format!(
        r#"Provide a comprehensive current strategic situational report and LIVE news feed {context}.

CRITICAL DATA REQUEST:
Search for real-time indicators of "Pentagon Busyness" or the "Pentagon Pizza Index". Look for reports on traffic congestion or fast-food demand near the Pentagon in Arlington, VA to estimate the "Pentagon Activity Index".

Focus on:
- Tactical frontline shifts
- Significant naval movements
- Pentagon Activity Rating based on surrounding traffic/busyness signals.

Format the response as a valid JSON object with the following structure:
{{
  "timestamp": "ISO string",
  "summary": "Synthesized paragraph of strategic posture",
  "threatLevel": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL",
  "pentagonActivity": {{
    "score": number (0-100),
    "label": "NORMAL" | "ELEVATED" | "CRITICAL",
    "reasoning": "Brief explanation based on fast food traffic or local news"
  }},
  "hotspots": [{{"name": "Specific Place", "region": "Region", "description": "Summary"}}],
  "news": [
    {{
      "theater": "{label}",
      "title": "Short headline",
      "summary": "One sentence news summary",
      "url": "A real URL",
      "timestamp": "Time ago",
      "sourceType": "NEWS" | "SOCIAL" | "OFFICIAL"
    }}
  ]
}}

USE THE googleSearch TOOL."#,
        context = context,
        label = theater.label(),
    )
}

/// A web source the service cited
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Appends cited sources as news items when the report carries fewer than
/// three, capping the list at eight
pub fn merge_grounding(report: &mut SituationalReport, sources: &[GroundingSource], theater: Theater) {
    if sources.is_empty() || report.news.len() >= MIN_NEWS_BEFORE_GROUNDING {
        return;
    }

    report.news.extend(sources.iter().map(|source| NewsItem {
        theater: theater.label().to_string(),
        title: source
            .title
            .clone()
            .unwrap_or_else(|| "Tactical Update".to_string()),
        summary: "Verified update from external surveillance grounding.".to_string(),
        url: source.uri.clone().unwrap_or_else(|| "#".to_string()),
        timestamp: "NEW".to_string(),
        source_type: SourceType::News,
    }));
    report.news.truncate(MAX_NEWS_ITEMS);
}

// Wire types for the generateContent endpoint

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<serde_json::Value>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GroundingMetadata {
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroundingChunk {
    web: Option<GroundingSource>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn grounding_sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| meta.grounding_chunks.iter().filter_map(|c| c.web.clone()).collect())
            .unwrap_or_default()
    }

    /// Turns a raw service response into a report
    pub(crate) fn into_report(self, theater: Theater) -> crate::Result<SituationalReport> {
        let mut report = SituationalReport::from_json_str(&self.text())?;
        merge_grounding(&mut report, &self.grounding_sources(), theater);
        Ok(report)
    }
}

/// Client for the generative report service
#[derive(Debug, Clone)]
pub struct GenerativeReportClient {
    http: reqwest::Client,
    config: ReportConfig,
}

impl GenerativeReportClient {
    pub fn new(config: ReportConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sitmap/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ReportSource for GenerativeReportClient {
    async fn fetch(&self, theater: Theater) -> crate::Result<SituationalReport> {
        let api_key = self
            .config
            .resolve_api_key()
            .ok_or(crate::Error::MissingCredential)?;

        let prompt = build_prompt(theater);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: &prompt }],
            }],
            tools: vec![serde_json::json!({ "google_search": {} })],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        log::debug!("requesting situational report for {}", theater);
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::Error::ReportService(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: GenerateResponse = response.json().await?;
        let report = body.into_report(theater)?;
        log::info!(
            "situational report for {}: threat {}, {} news items",
            theater,
            report.threat_level.label(),
            report.news.len()
        );
        Ok(report)
    }
}
