//! Single-flight refresh coordination
//!
//! A [`RefreshCoordinator`] tracks whether a credential refresh is in flight
//! and parks every request that hits the unauthorized status meanwhile. The
//! first caller to [`RefreshCoordinator::enter`] while idle becomes the
//! [`RefreshLeader`] and performs the refresh; everyone else receives a
//! [`RefreshWaiter`] that resolves once the leader settles.
//!
//! The lock is only held inside the synchronous sections below, never across
//! an `.await`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

/// How the refresh call resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The refresher accepted the new credential.
    Succeeded,
    /// The refresher failed or the leader was abandoned.
    Failed,
}

/// Signal delivered to a parked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSignal {
    /// The refresh succeeded; replay the request.
    Retry,
    /// The refresh failed; surface the request's own unauthorized error.
    Fail,
}

impl From<RefreshOutcome> for RefreshSignal {
    fn from(outcome: RefreshOutcome) -> Self {
        match outcome {
            RefreshOutcome::Succeeded => Self::Retry,
            RefreshOutcome::Failed => Self::Fail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshState {
    Idle,
    Refreshing,
}

#[derive(Debug)]
struct Inner {
    state: RefreshState,
    waiters: VecDeque<oneshot::Sender<RefreshSignal>>,
}

/// Counters describing refresh activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Refresh calls started (leaders elected)
    pub refreshes_started: u64,

    /// Refresh calls that succeeded
    pub refreshes_succeeded: u64,

    /// Refresh calls that failed, including abandoned leaders
    pub refreshes_failed: u64,

    /// Requests parked behind an in-flight refresh
    pub waiters_parked: u64,

    /// Requests replayed after a successful refresh
    pub replays_issued: u64,
}

#[derive(Debug, Default)]
struct StatsCollector {
    refreshes_started: AtomicU64,
    refreshes_succeeded: AtomicU64,
    refreshes_failed: AtomicU64,
    waiters_parked: AtomicU64,
    replays_issued: AtomicU64,
}

impl StatsCollector {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> RefreshStats {
        RefreshStats {
            refreshes_started: self.refreshes_started.load(Ordering::Relaxed),
            refreshes_succeeded: self.refreshes_succeeded.load(Ordering::Relaxed),
            refreshes_failed: self.refreshes_failed.load(Ordering::Relaxed),
            waiters_parked: self.waiters_parked.load(Ordering::Relaxed),
            replays_issued: self.replays_issued.load(Ordering::Relaxed),
        }
    }
}

/// Refresh state and waiter queue owned by one client instance.
#[derive(Debug)]
pub struct RefreshCoordinator {
    inner: Mutex<Inner>,
    stats: StatsCollector,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    /// Idle coordinator with an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { state: RefreshState::Idle, waiters: VecDeque::new() }),
            stats: StatsCollector::default(),
        }
    }

    /// Join the refresh cycle.
    ///
    /// Returns a leader ticket if no refresh was in flight (the state is now
    /// `Refreshing`), otherwise a waiter queued at the back of the line.
    pub fn enter(&self) -> RefreshTicket<'_> {
        let mut inner = self.inner.lock();
        match inner.state {
            RefreshState::Idle => {
                inner.state = RefreshState::Refreshing;
                drop(inner);
                StatsCollector::bump(&self.stats.refreshes_started);
                RefreshTicket::Leader(RefreshLeader { coordinator: self, settled: false })
            }
            RefreshState::Refreshing => {
                let (tx, rx) = oneshot::channel();
                inner.waiters.push_back(tx);
                let position = inner.waiters.len();
                drop(inner);
                StatsCollector::bump(&self.stats.waiters_parked);
                debug!(position, "parked behind in-flight refresh");
                RefreshTicket::Waiter(RefreshWaiter { rx })
            }
        }
    }

    /// Whether a refresh is currently in flight.
    pub fn is_refreshing(&self) -> bool {
        self.inner.lock().state == RefreshState::Refreshing
    }

    /// Number of parked waiters.
    pub fn queued(&self) -> usize {
        self.inner.lock().waiters.len()
    }

    /// Snapshot of the refresh counters.
    pub fn stats(&self) -> RefreshStats {
        self.stats.snapshot()
    }

    pub(crate) fn record_replay(&self) {
        StatsCollector::bump(&self.stats.replays_issued);
    }

    fn settle(&self, outcome: RefreshOutcome) -> usize {
        let waiters = {
            let mut inner = self.inner.lock();
            inner.state = RefreshState::Idle;
            std::mem::take(&mut inner.waiters)
        };

        match outcome {
            RefreshOutcome::Succeeded => StatsCollector::bump(&self.stats.refreshes_succeeded),
            RefreshOutcome::Failed => StatsCollector::bump(&self.stats.refreshes_failed),
        }

        let signal = RefreshSignal::from(outcome);
        let released = waiters.len();
        for waiter in waiters {
            // A closed receiver means the parked request was dropped.
            let _ = waiter.send(signal);
        }
        released
    }
}

/// Result of [`RefreshCoordinator::enter`].
#[derive(Debug)]
pub enum RefreshTicket<'a> {
    /// The caller must perform the refresh and settle it.
    Leader(RefreshLeader<'a>),
    /// The caller is parked until the leader settles.
    Waiter(RefreshWaiter),
}

/// Exclusive right to perform the refresh.
///
/// Dropping a leader without calling [`RefreshLeader::settle`] settles the
/// cycle as failed, so parked requests are never left pending.
#[derive(Debug)]
pub struct RefreshLeader<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLeader<'_> {
    /// Return to `Idle` and signal every waiter in FIFO order.
    ///
    /// Returns how many waiters were released.
    pub fn settle(mut self, outcome: RefreshOutcome) -> usize {
        self.settled = true;
        self.coordinator.settle(outcome)
    }
}

impl Drop for RefreshLeader<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let released = self.coordinator.settle(RefreshOutcome::Failed);
            debug!(released, "refresh leader dropped before settling");
        }
    }
}

/// A parked request waiting for the leader to settle.
#[derive(Debug)]
pub struct RefreshWaiter {
    rx: oneshot::Receiver<RefreshSignal>,
}

impl RefreshWaiter {
    /// Wait for the refresh outcome.
    ///
    /// A sender that disappears without signalling counts as a failure.
    pub async fn wait(self) -> RefreshSignal {
        self.rx.await.unwrap_or(RefreshSignal::Fail)
    }
}
