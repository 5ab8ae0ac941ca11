use async_trait::async_trait;
use sitmap::prelude::*;
use sitmap::runtime::TokioSpawner;
use sitmap::services::report::build_prompt;

/// Answers after a per-theater delay
struct Staggered;

#[async_trait]
impl ReportSource for Staggered {
    async fn fetch(&self, theater: Theater) -> sitmap::Result<SituationalReport> {
        let delay = match theater {
            Theater::Ukraine => 150,
            _ => 10,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(SituationalReport {
            summary: format!("{} live", theater.label()),
            threat_level: ThreatLevel::High,
            ..SituationalReport::default()
        })
    }
}

struct Offline;

#[async_trait]
impl ReportSource for Offline {
    async fn fetch(&self, _theater: Theater) -> sitmap::Result<SituationalReport> {
        Err(MapError::MissingCredential)
    }
}

fn feed(source: Arc<dyn ReportSource>) -> ReportFeed {
    let spawner = TokioSpawner::current().expect("inside a tokio runtime");
    ReportFeed::new(source, Arc::new(spawner))
}

/// Pumps until `count` deliveries have been applied
async fn settle(feed: &mut ReportFeed, count: usize) -> Vec<Theater> {
    let mut applied = Vec::new();
    for _ in 0..200 {
        applied.extend(feed.pump());
        if applied.len() >= count {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    applied
}

#[tokio::test]
async fn failed_fetch_shows_degraded_report() {
    let mut feed = feed(Arc::new(Offline));
    feed.request(Theater::MiddleEast);
    assert!(feed.is_loading());

    let applied = settle(&mut feed, 1).await;
    assert_eq!(applied, vec![Theater::MiddleEast]);
    assert!(!feed.is_loading());

    let report = feed.report().unwrap();
    assert_eq!(report.threat_level, ThreatLevel::Medium);
    assert_eq!(report.pentagon_activity.score, 42.0);
    assert_eq!(report.pentagon_activity.label, "ELEVATED");
    assert_eq!(report.hotspots[0].name, "Sector A");
    assert_eq!(report.hotspots[0].region, "MIDDLE EAST");
    assert_eq!(report.news[0].title, "Intel Link Degraded");
    assert!(report.summary.contains("MIDDLE EAST"));
}

#[tokio::test]
async fn slower_earlier_request_overwrites_newer_one() {
    let mut feed = feed(Arc::new(Staggered));
    feed.request(Theater::Ukraine);
    let latest = feed.request(Theater::Pacific);
    assert_eq!(latest, 2);
    assert_eq!(feed.theater(), Theater::Pacific);

    let applied = settle(&mut feed, 2).await;
    assert_eq!(applied, vec![Theater::Pacific, Theater::Ukraine]);

    // whichever lands last is shown, even if it was requested first
    assert_eq!(feed.report().unwrap().summary, "UKRAINE live");
    assert!(!feed.is_loading());
}

#[tokio::test]
async fn refresh_waits_for_the_pending_report() {
    let mut feed = feed(Arc::new(Staggered));
    feed.request(Theater::Caribbean);
    assert_eq!(feed.refresh(), None);

    settle(&mut feed, 1).await;
    assert_eq!(feed.refresh(), Some(2));
    assert!(feed.is_loading());

    settle(&mut feed, 1).await;
    assert_eq!(feed.report().unwrap().summary, "CARIBBEAN live");
}

#[tokio::test]
async fn cancelled_requests_never_land() {
    let mut feed = feed(Arc::new(Staggered));
    feed.request(Theater::Ukraine);
    feed.cancel_all();
    assert!(!feed.is_loading());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(feed.pump().is_empty());
    assert!(feed.report().is_none());
}

#[tokio::test]
async fn fallback_helper_never_fails() {
    let report = fetch_or_fallback(&Offline, Theater::Global).await;
    assert_eq!(report.hotspots.len(), 1);
    assert_eq!(report.news[0].url, "#");
}

#[test]
fn prompt_scopes_to_theater() {
    assert!(build_prompt(Theater::Iran).contains("specifically for the IRAN theater of operations"));
    assert!(!build_prompt(Theater::Global).contains("theater of operations"));
}
