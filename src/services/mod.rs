//! External collaborators: the situational report service and the feed
//! that keeps the displayed report current.

pub mod feed;
pub mod report;

pub use feed::{ReportDelivery, ReportFeed};
pub use report::{
    build_prompt, fetch_or_fallback, merge_grounding, GenerativeReportClient, GroundingSource,
    ReportSource,
};
