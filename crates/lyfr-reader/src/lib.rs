//! Reading-session state for Lyfr.
//!
//! Two engines live here, both deliberately decoupled from any particular
//! front end:
//!
//! - [`progress`]: the per-chapter completion tracker. Write-through
//!   persistence behind the [`progress::ProgressStore`] capability; corrupt
//!   or absent storage degrades to "no prior progress", never to an error.
//! - [`spy`]: the scroll-spy engine. Consumes simulated or real visibility
//!   events for a page's headings and publishes the active anchor (the
//!   topmost visible heading id) over a `tokio::sync::watch` channel.
//!
//! [`session::ReaderSession`] bundles the two into the explicit context
//! object a front end holds while a book is open.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod progress;
pub mod session;
pub mod spy;

pub use lyfr_core::{Error, Result};
pub use progress::{JsonFileStore, MemoryStore, ProgressStore, ProgressTracker};
pub use session::ReaderSession;
pub use spy::{Generation, ScrollSpy, SimulatedViewport, SpyOptions, ViewportBand, VisibilityChange};
