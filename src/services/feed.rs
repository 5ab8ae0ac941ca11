use crate::core::theater::Theater;
use crate::data::report::SituationalReport;
use crate::prelude::Arc;
use crate::runtime::{AsyncHandle, AsyncSpawner};
use crate::services::report::{fetch_or_fallback, ReportSource};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// A finished fetch on its way back to the coordinator
#[derive(Debug, Clone)]
pub struct ReportDelivery {
    pub sequence: u64,
    pub theater: Theater,
    pub report: SituationalReport,
}

/// Owns the displayed report and the fetches that replace it.
///
/// Fetches run on the spawner and post into a channel; [`ReportFeed::pump`]
/// applies them in arrival order, so the response that resolves last is the
/// one left on screen even if it was requested first.
pub struct ReportFeed {
    source: Arc<dyn ReportSource>,
    spawner: Arc<dyn AsyncSpawner>,
    sender: Sender<ReportDelivery>,
    receiver: Receiver<ReportDelivery>,
    report: Option<SituationalReport>,
    theater: Theater,
    sequence: u64,
    loading: bool,
    in_flight: Vec<Box<dyn AsyncHandle>>,
}

impl ReportFeed {
    pub fn new(source: Arc<dyn ReportSource>, spawner: Arc<dyn AsyncSpawner>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            source,
            spawner,
            sender,
            receiver,
            report: None,
            theater: Theater::Global,
            sequence: 0,
            loading: false,
            in_flight: Vec::new(),
        }
    }

    pub fn report(&self) -> Option<&SituationalReport> {
        self.report.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Theater of the most recent request
    pub fn theater(&self) -> Theater {
        self.theater
    }

    /// Sequence number of the most recent request
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }

    /// Starts a fetch for `theater` regardless of any fetch already running
    pub fn request(&mut self, theater: Theater) -> u64 {
        self.sequence += 1;
        self.theater = theater;
        self.loading = true;

        let sequence = self.sequence;
        let source = self.source.clone();
        let sender = self.sender.clone();
        log::debug!("report request #{} for {}", sequence, theater);

        let handle = self.spawner.spawn_boxed(Box::pin(async move {
            let report = fetch_or_fallback(source.as_ref(), theater).await;
            // receiver gone means the feed was dropped
            let _ = sender.send(ReportDelivery {
                sequence,
                theater,
                report,
            });
        }));

        self.in_flight.retain(|h| !h.is_finished());
        self.in_flight.push(handle);
        sequence
    }

    /// Re-requests the current theater. Returns `None` while a fetch is loading.
    pub fn refresh(&mut self) -> Option<u64> {
        if self.loading {
            log::debug!("refresh ignored, report still loading");
            return None;
        }
        Some(self.request(self.theater))
    }

    /// Applies every delivery that has arrived. Returns the theaters whose
    /// reports were applied, in arrival order.
    pub fn pump(&mut self) -> Vec<Theater> {
        let mut applied = Vec::new();
        while let Ok(delivery) = self.receiver.try_recv() {
            if delivery.sequence != self.sequence {
                log::debug!(
                    "report #{} for {} arrived after #{} was requested",
                    delivery.sequence,
                    delivery.theater,
                    self.sequence
                );
            }
            self.loading = false;
            self.report = Some(delivery.report);
            applied.push(delivery.theater);
        }
        if !applied.is_empty() {
            self.in_flight.retain(|h| !h.is_finished());
        }
        applied
    }

    /// Cancels every fetch still running and clears the loading flag
    pub fn cancel_all(&mut self) {
        for handle in self.in_flight.drain(..) {
            handle.cancel();
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{DeferredSpawner, InlineSpawner};
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl ReportSource for Echo {
        async fn fetch(&self, theater: Theater) -> crate::Result<SituationalReport> {
            Ok(SituationalReport {
                summary: format!("summary for {}", theater.label()),
                ..SituationalReport::default()
            })
        }
    }

    struct Broken;

    #[async_trait]
    impl ReportSource for Broken {
        async fn fetch(&self, _theater: Theater) -> crate::Result<SituationalReport> {
            Err(crate::Error::ReportService("HTTP 503".into()))
        }
    }

    #[test]
    fn test_inline_fetch_is_applied_on_pump() {
        let mut feed = ReportFeed::new(Arc::new(Echo), Arc::new(InlineSpawner));
        feed.request(Theater::Iran);
        assert!(feed.is_loading());
        assert_eq!(feed.pump(), vec![Theater::Iran]);
        assert!(!feed.is_loading());
        assert_eq!(feed.report().unwrap().summary, "summary for IRAN");
    }

    #[test]
    fn test_failure_becomes_fallback() {
        let mut feed = ReportFeed::new(Arc::new(Broken), Arc::new(InlineSpawner));
        feed.request(Theater::Global);
        feed.pump();
        let report = feed.report().unwrap();
        assert!(!report.summary.is_empty());
        assert_eq!(report.hotspots[0].name, "Sector A");
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_refresh_refused_while_loading() {
        let spawner = DeferredSpawner::new();
        let mut feed = ReportFeed::new(Arc::new(Echo), Arc::new(spawner.clone()));
        assert_eq!(feed.refresh(), Some(1));
        assert_eq!(feed.refresh(), None);
        // a theater switch still goes through
        assert_eq!(feed.request(Theater::Pacific), 2);
        assert_eq!(spawner.pending(), 2);
    }

    #[test]
    fn test_last_resolved_response_wins() {
        let spawner = DeferredSpawner::new();
        let mut feed = ReportFeed::new(Arc::new(Echo), Arc::new(spawner.clone()));
        feed.request(Theater::Ukraine);
        feed.request(Theater::Africa);
        // the later request resolves first
        spawner.run_in_order(&[1, 0]);
        assert_eq!(feed.pump(), vec![Theater::Africa, Theater::Ukraine]);
        assert_eq!(feed.report().unwrap().summary, "summary for UKRAINE");
        assert_eq!(feed.theater(), Theater::Africa);
    }

    #[test]
    fn test_cancel_all_drops_pending() {
        let spawner = DeferredSpawner::new();
        let mut feed = ReportFeed::new(Arc::new(Echo), Arc::new(spawner.clone()));
        feed.request(Theater::Global);
        feed.cancel_all();
        spawner.run_pending();
        assert!(feed.pump().is_empty());
        assert!(feed.report().is_none());
        assert!(!feed.is_loading());
    }
}
