//! `dreid_engine`: the disk-backed graph traversal engine built on top of
//! `dreid`'s pure chess logic — the bucketed disk hash table, the block-FAT
//! disk queue, the traversal engine proper, and all I/O-facing ambient
//! concerns (configuration, error handling, per-worker output sinks).

pub mod config;
pub mod dht;
pub mod dq;
pub mod error;
pub mod output;
pub mod sync;
pub mod traversal;

pub use config::Config;
pub use error::{Error, Result};
pub use traversal::{PosInfo, TraversalContext};
