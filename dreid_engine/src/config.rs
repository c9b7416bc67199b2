//! Engine configuration, per spec.md §6's enumerated configuration surface.
//!
//! Deliberately a plain struct with a `Default` impl and an `from_env`
//! loader rather than a `clap`-derived CLI parser: command-line front-ends
//! are explicitly out of this specification's scope, so the config layer
//! only needs to be constructible from a small config loader outside the
//! core (here, environment variables), the same shape the teacher's
//! `pleco_engine::time::uci_timer` settings are fed from UCI `setoption`
//! commands rather than argv.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Tunable engine behavior. See spec.md §6.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Size of the fixed worker thread pool.
    pub thread_count: usize,
    /// Root directory under which DHT and DQ files are created.
    pub work_root: PathBuf,
    /// When `false`, castle rights are treated as always-true regardless of
    /// king/rook movement history — an engineering toggle for research runs.
    pub enforce_castling_once_moved: bool,
    /// When `false`, the 50-move counter never triggers the draw sink.
    pub enforce_50_move_rule: bool,
    /// When `false`, resolved entries spill to disk immediately instead of
    /// being cached in the in-memory `resolved` map.
    pub cache_resolved: bool,
    /// The level `N` (piece count) this run traverses.
    pub level: u8,
    /// Threshold above which new same-level successors spill to the DQ
    /// rather than the in-memory `unresolved` map.
    pub unresolved_spill_threshold: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            thread_count: 8,
            work_root: PathBuf::from("./dreid-work"),
            enforce_castling_once_moved: true,
            enforce_50_move_rule: true,
            cache_resolved: true,
            level: 32,
            unresolved_spill_threshold: 1_000_000,
        }
    }
}

impl Config {
    /// Loads overrides from `DREID_*` environment variables on top of
    /// [`Config::default`]. Missing variables keep the default value;
    /// present-but-unparseable variables are a config error.
    pub fn from_env() -> Result<Config> {
        let mut cfg = Config::default();

        if let Ok(v) = std::env::var("DREID_THREAD_COUNT") {
            cfg.thread_count = v
                .parse()
                .map_err(|_| Error::config(format!("DREID_THREAD_COUNT: invalid integer {:?}", v)))?;
        }
        if let Ok(v) = std::env::var("DREID_WORK_ROOT") {
            cfg.work_root = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DREID_ENFORCE_CASTLING_ONCE_MOVED") {
            cfg.enforce_castling_once_moved = parse_bool(&v)?;
        }
        if let Ok(v) = std::env::var("DREID_ENFORCE_50_MOVE_RULE") {
            cfg.enforce_50_move_rule = parse_bool(&v)?;
        }
        if let Ok(v) = std::env::var("DREID_CACHE_RESOLVED") {
            cfg.cache_resolved = parse_bool(&v)?;
        }
        if let Ok(v) = std::env::var("DREID_LEVEL") {
            cfg.level = v
                .parse()
                .map_err(|_| Error::config(format!("DREID_LEVEL: invalid integer {:?}", v)))?;
        }
        if let Ok(v) = std::env::var("DREID_UNRESOLVED_SPILL_THRESHOLD") {
            cfg.unresolved_spill_threshold = v
                .parse()
                .map_err(|_| Error::config(format!("DREID_UNRESOLVED_SPILL_THRESHOLD: invalid integer {:?}", v)))?;
        }

        if cfg.thread_count == 0 {
            return Err(Error::config("thread_count must be at least 1"));
        }
        Ok(cfg)
    }
}

fn parse_bool(v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::config(format!("invalid boolean {:?}", other))),
    }
}
