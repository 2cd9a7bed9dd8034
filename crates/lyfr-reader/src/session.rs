//! The reading-session context object.
//!
//! A front end holds one [`ReaderSession`] for the lifetime of an open
//! book: the completion tracker and the scroll-spy engine, initialized
//! together, rehydrated from persisted storage on construction, and torn
//! down implicitly when the session drops.

use std::time::Duration;

use crate::progress::{ProgressStore, ProgressTracker};
use crate::spy::{Generation, ScrollSpy, SpyOptions};

/// Mutable per-session reading state: progress plus scroll-spy.
pub struct ReaderSession {
    progress: ProgressTracker,
    spy: ScrollSpy,
    options: SpyOptions,
}

impl ReaderSession {
    /// Open a session over the registry's slug universe, rehydrating
    /// progress from the given store.
    pub fn open(universe: Vec<String>, store: Box<dyn ProgressStore>, options: SpyOptions) -> Self {
        Self {
            progress: ProgressTracker::load(universe, store),
            spy: ScrollSpy::new(),
            options,
        }
    }

    /// Begin spying a newly displayed chapter after the settle delay.
    ///
    /// Tracking for any previously displayed chapter is fully torn down
    /// before the new chapter's tracking begins.
    pub async fn open_chapter(&mut self, heading_ids: Vec<String>) -> Generation {
        let options = self.options;
        self.spy.attach_after_settle(heading_ids, &options).await
    }

    /// Navigate away from the current chapter.
    pub fn close_chapter(&mut self) {
        self.spy.detach();
    }

    /// The configured settle delay.
    pub fn settle(&self) -> Duration {
        self.options.settle
    }

    /// Completion tracker, read-only.
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Completion tracker, for toggles.
    pub fn progress_mut(&mut self) -> &mut ProgressTracker {
        &mut self.progress
    }

    /// Scroll-spy engine, read-only (subscribe, current anchor).
    pub fn spy(&self) -> &ScrollSpy {
        &self.spy
    }

    /// Scroll-spy engine, for deliveries.
    pub fn spy_mut(&mut self) -> &mut ScrollSpy {
        &mut self.spy
    }
}
