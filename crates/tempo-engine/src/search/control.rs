//! Search control: deadline and stop flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// The search ran out of time or was told to stop.
///
/// Returned through every frame of an interrupted search so that no
/// partial score is ever used or cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search aborted")]
pub struct Aborted;

/// Decides when a search must stop.
///
/// Polled at every node. Once the deadline passes or the external stop
/// flag is raised the control latches into the aborted state, and every
/// later poll fails immediately.
pub struct SearchControl {
    start: Instant,
    max_time: Duration,
    stop: Option<Arc<AtomicBool>>,
    aborted: bool,
}

impl SearchControl {
    /// Start the clock now with a budget of `max_time`.
    pub fn new(max_time: Duration) -> Self {
        Self {
            start: Instant::now(),
            max_time,
            stop: None,
            aborted: false,
        }
    }

    /// Also stop when `flag` is set by another thread.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Fail if the search must stop, latching the aborted state.
    pub fn poll(&mut self) -> Result<(), Aborted> {
        if self.aborted {
            return Err(Aborted);
        }
        if self.out_of_budget() {
            self.aborted = true;
            return Err(Aborted);
        }
        Ok(())
    }

    /// Whether the deadline has passed or a stop was requested.
    ///
    /// Does not latch; used between iterations.
    pub fn out_of_budget(&self) -> bool {
        self.start.elapsed() >= self.max_time
            || self
                .stop
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
