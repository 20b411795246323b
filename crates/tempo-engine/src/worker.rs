//! Running a search on its own thread.
//!
//! The caller keeps its thread free while the search runs, can stop it
//! early through a shared flag, and can watch completed depths arrive over
//! a channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;

use tempo_core::Rules;
use tracing::debug;

use crate::error::EngineError;
use crate::limits::SearchLimits;
use crate::search::{DepthReport, SearchOutcome, Searcher};

/// A search running on a background thread.
///
/// Each handle owns its position and search state; handles never share
/// anything, so several may run at once.
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    progress: mpsc::Receiver<DepthReport>,
    thread: JoinHandle<SearchOutcome>,
}

/// Move `position` to a new thread and search it within `limits`.
pub fn spawn_search<R>(mut position: R, limits: SearchLimits) -> SearchHandle
where
    R: Rules + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let (tx, progress) = mpsc::channel();
    let searcher = Searcher::new(limits).with_stop_flag(Arc::clone(&stop));

    let thread = std::thread::spawn(move || {
        debug!(fen = %position.fen(), max_depth = limits.max_depth, "background search started");
        searcher.search_with(&mut position, |report| {
            // The receiver may already be gone; the search still finishes.
            let _ = tx.send(*report);
        })
    });

    SearchHandle {
        stop,
        progress,
        thread,
    }
}

impl SearchHandle {
    /// Ask the search to stop. The last completed depth is still reported.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Whether the search thread has returned.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Depth reports received so far, without blocking.
    pub fn progress(&self) -> impl Iterator<Item = DepthReport> + '_ {
        self.progress.try_iter()
    }

    /// Block until the search returns its outcome.
    pub fn wait(self) -> Result<SearchOutcome, EngineError> {
        self.thread.join().map_err(|_| EngineError::WorkerPanicked)
    }
}
