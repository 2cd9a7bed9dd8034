//! The scroll-spy engine.
//!
//! While a chapter is open, the engine tracks which of its headings are
//! visible inside the scroll container and publishes the *active anchor* —
//! the id of the topmost visible heading — over a `tokio::sync::watch`
//! channel.
//!
//! The engine never touches a platform API. Visibility is a capability:
//! whatever owns the real viewport (a browser bridge, a TUI pager, a test)
//! computes [`VisibilityChange`] batches — using [`ViewportBand`] for the
//! in-view rule — and delivers them to the engine. [`SimulatedViewport`]
//! is the reference implementation of that capability and what the tests
//! drive.
//!
//! Attachment is generational: [`ScrollSpy::attach`] tears down all state
//! for the previous page and bumps the generation, and a delivery stamped
//! with a stale generation is discarded. A late callback from a page being
//! navigated away from can therefore never overwrite the new page's state.
//!
//! # Example
//!
//! ```rust
//! use lyfr_reader::spy::{ScrollSpy, VisibilityChange};
//!
//! let mut spy = ScrollSpy::new();
//! let generation = spy.attach(vec!["intro".into(), "details".into()]);
//!
//! spy.deliver(
//!     generation,
//!     &[VisibilityChange::visible("details", 120.0),
//!       VisibilityChange::visible("intro", 90.0)],
//! );
//! assert_eq!(spy.active(), "intro");
//! ```

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::watch;

/// The vertical band of the scroll container in which a heading counts as
/// "in view".
///
/// Mirrors an intersection margin of `-{top_margin_px}px 0px
/// -{bottom_fraction}% 0px`: offsets above the top margin are out, and so
/// is the bottom `bottom_fraction` of the container, which biases the
/// *next* heading into view slightly early.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    /// Pixels at the top of the container excluded from the band.
    pub top_margin_px: f64,
    /// Fraction of the container height excluded at the bottom (0.0–1.0).
    pub bottom_fraction: f64,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            top_margin_px: 80.0,
            bottom_fraction: 0.70,
        }
    }
}

impl ViewportBand {
    /// Whether an offset (relative to the container top) lies in the band.
    pub fn contains(&self, container_height: f64, top: f64) -> bool {
        top >= self.top_margin_px && top <= container_height * (1.0 - self.bottom_fraction)
    }
}

/// Engine options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpyOptions {
    /// In-view rule handed to viewport adapters.
    pub band: ViewportBand,
    /// Delay before attachment, letting the page render and any hash-based
    /// auto-scroll complete.
    pub settle: Duration,
}

impl Default for SpyOptions {
    fn default() -> Self {
        Self {
            band: ViewportBand::default(),
            settle: Duration::from_millis(150),
        }
    }
}

/// One observed visibility transition or refresh for a heading.
///
/// Adapters deliver a change for every tracked heading whose state or
/// offset moved; `top` is the current offset from the container top, so the
/// engine's ordering information stays fresh while the page scrolls.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityChange {
    /// Heading anchor id.
    pub id: String,
    /// Current offset from the top of the scroll container, in pixels.
    pub top: f64,
    /// Whether the heading is now inside the viewport band.
    pub visible: bool,
}

impl VisibilityChange {
    /// A heading now visible at the given offset.
    pub fn visible(id: impl Into<String>, top: f64) -> Self {
        Self {
            id: id.into(),
            top,
            visible: true,
        }
    }

    /// A heading no longer visible.
    pub fn hidden(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            top: 0.0,
            visible: false,
        }
    }
}

/// Opaque attachment token; deliveries carry the generation they were
/// observed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// The active-anchor state machine.
pub struct ScrollSpy {
    tx: watch::Sender<String>,
    generation: u64,
    targets: Vec<String>,
    visible: HashMap<String, f64>,
}

impl ScrollSpy {
    /// Create an engine with no page attached and an empty active anchor.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self {
            tx,
            generation: 0,
            targets: Vec::new(),
            visible: HashMap::new(),
        }
    }

    /// Subscribe to active-anchor updates.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }

    /// The currently published active anchor (empty when none).
    pub fn active(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Attach a new page's headings, tearing down the previous page first.
    ///
    /// All prior visibility state is dropped and the generation advances,
    /// so in-flight deliveries for the old page are discarded on arrival.
    /// A page with no headings resets the published anchor to empty;
    /// otherwise the previous value is retained until a delivery arrives.
    pub fn attach(&mut self, heading_ids: Vec<String>) -> Generation {
        self.generation += 1;
        self.visible.clear();
        self.targets = heading_ids;
        if self.targets.is_empty() {
            self.publish(String::new());
        }
        Generation(self.generation)
    }

    /// Attach after the configured settle delay.
    pub async fn attach_after_settle(
        &mut self,
        heading_ids: Vec<String>,
        options: &SpyOptions,
    ) -> Generation {
        tokio::time::sleep(options.settle).await;
        self.attach(heading_ids)
    }

    /// Detach from the current page, invalidating outstanding deliveries.
    ///
    /// The published anchor is retained; the next attachment decides
    /// whether it resets.
    pub fn detach(&mut self) {
        self.generation += 1;
        self.targets.clear();
        self.visible.clear();
    }

    /// Consume a batch of visibility changes observed under `generation`.
    ///
    /// Stale-generation batches are ignored. Ids that are not targets of
    /// the current page are ignored. When the batch leaves no heading
    /// visible, the previous anchor is retained.
    pub fn deliver(&mut self, generation: Generation, changes: &[VisibilityChange]) {
        if generation.0 != self.generation {
            log::debug!("discarding stale visibility delivery (generation {})", generation.0);
            return;
        }

        for change in changes {
            if !self.targets.iter().any(|t| t == &change.id) {
                continue;
            }
            if change.visible {
                self.visible.insert(change.id.clone(), change.top);
            } else {
                self.visible.remove(&change.id);
            }
        }

        let topmost = self
            .visible
            .iter()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(id, _)| id.clone());

        if let Some(id) = topmost {
            self.publish(id);
        }
    }

    fn publish(&self, active: String) {
        self.tx.send_if_modified(|current| {
            if *current != active {
                *current = active;
                true
            } else {
                false
            }
        });
    }
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new()
    }
}

/// A scripted scroll container implementing the visibility capability.
///
/// Holds the absolute offset of each heading within the document and
/// computes delta-plus-refresh batches as the scroll position moves. Used
/// by the engine tests and by front ends without a native observer.
#[derive(Debug)]
pub struct SimulatedViewport {
    band: ViewportBand,
    height: f64,
    headings: Vec<(String, f64)>,
    visible_ids: Vec<String>,
}

impl SimulatedViewport {
    /// Create a viewport of the given height over headings at absolute
    /// document offsets.
    pub fn new(band: ViewportBand, height: f64, headings: Vec<(String, f64)>) -> Self {
        Self {
            band,
            height,
            headings,
            visible_ids: Vec::new(),
        }
    }

    /// Move the scroll position and report the resulting changes: every
    /// transition, plus a refresh for every heading still visible.
    pub fn scroll_to(&mut self, scroll_top: f64) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();
        let mut now_visible = Vec::new();

        for (id, offset) in &self.headings {
            let top = offset - scroll_top;
            if self.band.contains(self.height, top) {
                now_visible.push(id.clone());
                changes.push(VisibilityChange::visible(id.clone(), top));
            } else if self.visible_ids.contains(id) {
                changes.push(VisibilityChange::hidden(id.clone()));
            }
        }

        self.visible_ids = now_visible;
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // -------------------------------------------------------------------------
    // ViewportBand
    // -------------------------------------------------------------------------

    #[test]
    fn test_band_excludes_top_margin_and_bottom_fraction() {
        let band = ViewportBand::default();
        // Container of 800px: band is [80, 240]
        assert!(!band.contains(800.0, 40.0));
        assert!(band.contains(800.0, 80.0));
        assert!(band.contains(800.0, 240.0));
        assert!(!band.contains(800.0, 300.0));
    }

    // -------------------------------------------------------------------------
    // Active-anchor selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_topmost_visible_heading_wins() {
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["h1", "h2", "h3"]));

        // Only h2 and h3 visible; h2 has the smaller top offset
        spy.deliver(
            generation,
            &[
                VisibilityChange::visible("h2", 120.0),
                VisibilityChange::visible("h3", 300.0),
            ],
        );
        assert_eq!(spy.active(), "h2");
    }

    #[test]
    fn test_empty_visible_set_retains_previous() {
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["h1", "h2"]));
        spy.deliver(generation, &[VisibilityChange::visible("h1", 100.0)]);
        assert_eq!(spy.active(), "h1");

        spy.deliver(generation, &[VisibilityChange::hidden("h1")]);
        assert_eq!(spy.active(), "h1");
    }

    #[test]
    fn test_page_without_headings_resets_anchor() {
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["h1"]));
        spy.deliver(generation, &[VisibilityChange::visible("h1", 100.0)]);
        assert_eq!(spy.active(), "h1");

        spy.attach(Vec::new());
        assert_eq!(spy.active(), "");
    }

    #[test]
    fn test_unknown_targets_ignored() {
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["h1"]));
        spy.deliver(generation, &[VisibilityChange::visible("rogue", 10.0)]);
        assert_eq!(spy.active(), "");
    }

    #[test]
    fn test_refresh_updates_ordering() {
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["h1", "h2"]));
        spy.deliver(
            generation,
            &[
                VisibilityChange::visible("h1", 200.0),
                VisibilityChange::visible("h2", 230.0),
            ],
        );
        assert_eq!(spy.active(), "h1");

        // Scrolled: h1 left the band, h2 moved up
        spy.deliver(
            generation,
            &[
                VisibilityChange::hidden("h1"),
                VisibilityChange::visible("h2", 90.0),
            ],
        );
        assert_eq!(spy.active(), "h2");
    }

    // -------------------------------------------------------------------------
    // Teardown-before-setup
    // -------------------------------------------------------------------------

    #[test]
    fn test_stale_generation_delivery_discarded() {
        let mut spy = ScrollSpy::new();
        let old = spy.attach(ids(&["old-a"]));
        let _new = spy.attach(ids(&["new-a"]));

        // Late callback from the previous page
        spy.deliver(old, &[VisibilityChange::visible("old-a", 100.0)]);
        assert_eq!(spy.active(), "");
    }

    #[test]
    fn test_detach_invalidates_generation() {
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["h1"]));
        spy.detach();
        spy.deliver(generation, &[VisibilityChange::visible("h1", 100.0)]);
        assert_eq!(spy.active(), "");
    }

    // -------------------------------------------------------------------------
    // Watch-channel publication
    // -------------------------------------------------------------------------

    #[test]
    fn test_subscribers_observe_changes() {
        let mut spy = ScrollSpy::new();
        let mut rx = spy.subscribe();
        let generation = spy.attach(ids(&["h1"]));
        spy.deliver(generation, &[VisibilityChange::visible("h1", 100.0)]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "h1");
    }

    #[test]
    fn test_unchanged_anchor_not_republished() {
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["h1"]));
        spy.deliver(generation, &[VisibilityChange::visible("h1", 100.0)]);

        let mut rx = spy.subscribe();
        spy.deliver(generation, &[VisibilityChange::visible("h1", 110.0)]);
        assert!(!rx.has_changed().unwrap());
    }

    // -------------------------------------------------------------------------
    // Simulated viewport end-to-end
    // -------------------------------------------------------------------------

    #[test]
    fn test_simulated_scroll_drives_active_anchor() {
        let band = ViewportBand::default();
        let mut viewport = SimulatedViewport::new(
            band,
            800.0,
            vec![
                ("intro".to_string(), 100.0),
                ("middle".to_string(), 900.0),
                ("end".to_string(), 1700.0),
            ],
        );
        let mut spy = ScrollSpy::new();
        let generation = spy.attach(ids(&["intro", "middle", "end"]));

        // At the top: "intro" sits at offset 100, inside [80, 240]
        spy.deliver(generation, &viewport.scroll_to(0.0));
        assert_eq!(spy.active(), "intro");

        // Scroll until "middle" enters the band
        spy.deliver(generation, &viewport.scroll_to(780.0));
        assert_eq!(spy.active(), "middle");

        // Dead zone between headings retains the last anchor
        spy.deliver(generation, &viewport.scroll_to(1200.0));
        assert_eq!(spy.active(), "middle");

        // And the last heading takes over at the bottom
        spy.deliver(generation, &viewport.scroll_to(1600.0));
        assert_eq!(spy.active(), "end");
    }

    #[tokio::test]
    async fn test_attach_after_settle() {
        let mut spy = ScrollSpy::new();
        let options = SpyOptions {
            settle: Duration::from_millis(1),
            ..SpyOptions::default()
        };
        let generation = spy.attach_after_settle(ids(&["h1"]), &options).await;
        spy.deliver(generation, &[VisibilityChange::visible("h1", 100.0)]);
        assert_eq!(spy.active(), "h1");
    }
}
