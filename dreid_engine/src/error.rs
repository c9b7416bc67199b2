//! Error kinds for the disk-backed engine, per spec.md §7.
//!
//! `dreid` itself (pure board logic) panics on invariant breaches the way
//! the teacher's `pleco::board::piece_locations` does for malformed piece
//! tables; this crate, which owns all I/O, surfaces failures through a
//! `thiserror`-derived enum the way the rest of the pack's engine-tier
//! crates do rather than the teacher's own panic-heavy posture, since here
//! every failure must be traceable back to a worker thread that can log and
//! terminate cleanly instead of aborting the process outright.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invariant breach: {0}")]
    Invariant(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Error {
        Error::Io { path: path.into(), source }
    }

    pub fn invariant(msg: impl Into<String>) -> Error {
        Error::Invariant(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Error {
        Error::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
