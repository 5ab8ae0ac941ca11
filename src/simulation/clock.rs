use instant::Instant;
use std::time::Duration;

/// Turns elapsed wall time into whole simulation ticks.
///
/// A stalled event loop catches up at most `max_catch_up` ticks; anything
/// beyond that is dropped rather than replayed.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    interval: Duration,
    max_catch_up: u32,
    next_due: Option<Instant>,
    stopped: bool,
}

impl SimulationClock {
    pub fn new(interval: Duration, max_catch_up: u32) -> Self {
        Self {
            interval,
            max_catch_up: max_catch_up.max(1),
            next_due: None,
            stopped: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts counting from `now`; the first tick is due one interval later
    pub fn start(&mut self, now: Instant) {
        self.stopped = false;
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        !self.stopped && self.next_due.is_some()
    }

    /// Number of ticks due at `now`
    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.stopped || self.interval.is_zero() {
            return 0;
        }
        let Some(mut due) = self.next_due else {
            self.start(now);
            return 0;
        };

        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += self.interval;
            if ticks == self.max_catch_up {
                if due <= now {
                    log::debug!("simulation fell behind, dropping missed ticks");
                    due = now + self.interval;
                }
                break;
            }
        }
        self.next_due = Some(due);
        ticks
    }

    /// Time until the next tick, for scheduling repaints
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .filter(|_| !self.stopped)
            .map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks() {
        let start = Instant::now();
        let mut clock = SimulationClock::new(Duration::from_secs(1), 5);
        clock.start(start);
        assert_eq!(clock.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(clock.poll(start + Duration::from_millis(1000)), 1);
        assert_eq!(clock.poll(start + Duration::from_millis(1500)), 0);
        assert_eq!(clock.poll(start + Duration::from_millis(3100)), 2);
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let start = Instant::now();
        let mut clock = SimulationClock::new(Duration::from_secs(1), 5);
        clock.start(start);
        assert_eq!(clock.poll(start + Duration::from_secs(60)), 5);
        assert_eq!(clock.poll(start + Duration::from_secs(60)), 0);
        assert_eq!(clock.poll(start + Duration::from_secs(61)), 1);
    }

    #[test]
    fn test_stopped_clock_never_ticks() {
        let start = Instant::now();
        let mut clock = SimulationClock::new(Duration::from_secs(1), 5);
        clock.start(start);
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.poll(start + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_first_poll_starts_clock() {
        let start = Instant::now();
        let mut clock = SimulationClock::new(Duration::from_secs(1), 5);
        assert_eq!(clock.poll(start), 0);
        assert!(clock.is_running());
        assert_eq!(clock.poll(start + Duration::from_secs(1)), 1);
    }
}
