//! Offline shell cache for the Lyfr reading system.
//!
//! A [`worker::ShellCacheWorker`] mirrors a running Lyfr server into a
//! local, versioned cache bucket so the book stays readable offline. Its
//! lifecycle is an explicit three-event protocol, one handler per event:
//!
//! - **install** — pre-populate the current bucket with the enumerated
//!   shell assets
//! - **activate** — delete every bucket whose name is not the current
//!   version
//! - **fetch** — network first; successful basic 200 responses are served
//!   live and cloned into the cache in the background; network failure
//!   falls back to the cached entry, then to the cached root document
//!
//! Storage and network are capabilities ([`storage::CacheStorage`],
//! [`fetch::Fetcher`]) with directory/in-memory and reqwest
//! implementations, so the protocol is testable without either a disk or
//! a server.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod fetch;
pub mod response;
pub mod storage;
pub mod worker;

pub use error::{Error, Result};
pub use fetch::{Fetcher, ReqwestFetcher};
pub use response::{CachedResponse, ResponseKind};
pub use storage::{CacheStorage, DirCacheStorage, MemoryCacheStorage};
pub use worker::{
    FetchOutcome, FetchRequest, ServedFrom, ShellCacheConfig, ShellCacheWorker, WorkerPhase,
};
