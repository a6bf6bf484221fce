//! Host-side orchestration for interactive callers.
//!
//! The engine is synchronous and owns nothing beyond one run, so a host
//! that wants a responsive surface runs it on a background thread and
//! recomputes from scratch whenever the inputs or tuning change. Each
//! run is tagged with a monotonically increasing version token; only the
//! run matching the most recently issued token is allowed to deliver its
//! result. Cancellation is advisory: a superseded run finishes, and its
//! output is discarded at the join point.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc
    },
    thread::{self, JoinHandle}
};

use tracing::debug;

use crate::model::{
    structures::{config::EngineConfig, race::Race, report::RatingReport},
    RatingEngine
};

pub struct RunPool {
    next_version: u64,
    latest: Arc<AtomicU64>
}

pub struct RunHandle {
    version: u64,
    latest: Arc<AtomicU64>,
    thread: JoinHandle<RatingReport>
}

impl Default for RunPool {
    fn default() -> Self {
        Self::new()
    }
}

impl RunPool {
    pub fn new() -> RunPool {
        RunPool {
            next_version: 0,
            latest: Arc::new(AtomicU64::new(0))
        }
    }

    /// Starts a fresh engine run over a private snapshot of the inputs,
    /// superseding any run still in flight.
    pub fn submit(&mut self, races: Vec<Race>, config: EngineConfig) -> RunHandle {
        self.next_version += 1;
        let version = self.next_version;
        self.latest.store(version, Ordering::SeqCst);

        debug!(version, races = races.len(), "submitting engine run");

        let thread = thread::spawn(move || RatingEngine::new(config).process(&races));

        RunHandle {
            version,
            latest: Arc::clone(&self.latest),
            thread
        }
    }
}

impl RunHandle {
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Waits for the run to finish. Returns `None` if a newer run was
    /// submitted in the meantime; the stale result is dropped, not used.
    pub fn join(self) -> Option<RatingReport> {
        let report = self.thread.join().ok()?;

        if self.latest.load(Ordering::SeqCst) == self.version {
            Some(report)
        } else {
            debug!(version = self.version, "discarding stale engine run");
            None
        }
    }
}
