//! Periodic re-fetch of the profile collection.
//!
//! The scheduler decides when a refresh is due; the worker runs the fetch on
//! a background thread and hands the result back over a channel so that the
//! event loop applies it on the main thread. At most one fetch is in flight:
//! a tick that arrives while the previous fetch is still running is skipped.

use super::ports::ProfileSource;
use crate::domain::{DirectoryData, DomainError, DomainResult};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Fixed-interval ticker gated on foreground visibility and an in-flight flag.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    interval: Duration,
    last_tick: Instant,
    visible: bool,
    in_flight: bool,
}

impl RefreshScheduler {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
            visible: true,
            in_flight: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Advances the ticker and reports whether a fetch should start now.
    ///
    /// A tick is consumed even when it is skipped, so ticks stay on the
    /// fixed interval instead of piling up while hidden or busy.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_tick) < self.interval {
            return false;
        }
        self.last_tick = now;

        if !self.visible || self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn mark_finished(&mut self) {
        self.in_flight = false;
    }

    /// Time left until the next tick, for the event loop's poll timeout.
    pub fn time_until_next_tick(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.duration_since(self.last_tick))
    }
}

/// Runs fetches off the main thread.
pub struct RefreshWorker {
    source: Arc<dyn ProfileSource>,
    sender: Sender<DomainResult<DirectoryData>>,
    receiver: Receiver<DomainResult<DirectoryData>>,
}

impl RefreshWorker {
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source,
            sender,
            receiver,
        }
    }

    pub fn start_fetch(&self) -> DomainResult<()> {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();

        thread::Builder::new()
            .name("profile-refresh".to_string())
            .spawn(move || {
                tracing::debug!(location = source.location(), "refreshing profiles");
                // The receiver only goes away when the app is shutting down.
                let _ = sender.send(source.fetch());
            })
            .map(|_| ())
            .map_err(|e| DomainError::Fetch {
                location: self.source.location().to_string(),
                message: format!("could not start refresh thread: {}", e),
            })
    }

    /// Non-blocking check for a finished fetch.
    pub fn try_recv(&self) -> Option<DomainResult<DirectoryData>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: Duration) -> Option<DomainResult<DirectoryData>> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Profile;

    struct FixedSource(DirectoryData);

    impl ProfileSource for FixedSource {
        fn location(&self) -> &str {
            "fixed"
        }

        fn fetch(&self) -> DomainResult<DirectoryData> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_no_tick_before_interval() {
        let start = Instant::now();
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30), start);
        assert!(!scheduler.poll(start + Duration::from_secs(29)));
        assert!(!scheduler.in_flight());
    }

    #[test]
    fn test_tick_after_interval() {
        let start = Instant::now();
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30), start);
        assert!(scheduler.poll(start + Duration::from_secs(30)));
        assert!(scheduler.in_flight());
    }

    #[test]
    fn test_in_flight_fetch_skips_next_tick() {
        let start = Instant::now();
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30), start);

        assert!(scheduler.poll(start + Duration::from_secs(30)));
        // Fetch still running when the next tick arrives
        assert!(!scheduler.poll(start + Duration::from_secs(60)));

        scheduler.mark_finished();
        assert!(!scheduler.poll(start + Duration::from_secs(61)));
        assert!(scheduler.poll(start + Duration::from_secs(90)));
    }

    #[test]
    fn test_hidden_view_skips_ticks() {
        let start = Instant::now();
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30), start);
        scheduler.set_visible(false);

        assert!(!scheduler.poll(start + Duration::from_secs(30)));
        assert!(!scheduler.in_flight());

        scheduler.set_visible(true);
        assert!(!scheduler.poll(start + Duration::from_secs(45)));
        assert!(scheduler.poll(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_time_until_next_tick() {
        let start = Instant::now();
        let scheduler = RefreshScheduler::new(Duration::from_secs(30), start);
        assert_eq!(
            scheduler.time_until_next_tick(start + Duration::from_secs(10)),
            Duration::from_secs(20)
        );
        assert_eq!(
            scheduler.time_until_next_tick(start + Duration::from_secs(40)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_worker_delivers_fetch_result() {
        let data = DirectoryData {
            profiles: vec![Profile {
                id: "a".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let worker = RefreshWorker::new(Arc::new(FixedSource(data.clone())));

        assert!(worker.try_recv().is_none());
        worker.start_fetch().unwrap();

        let result = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.unwrap(), data);
    }
}
