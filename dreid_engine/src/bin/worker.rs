//! Long-running entry point: loads configuration and a seed position,
//! drives the traversal engine to completion or until a stop signal
//! arrives, per spec.md §6 ("Control").

use dreid::{Position, PositionPacked};
use dreid_engine::traversal::{self, TraversalContext};
use dreid_engine::{Config, Error};
use std::sync::Arc;

fn main() {
    env_logger::init();

    let exit_code = match run() {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run() -> dreid_engine::Result<()> {
    let config = Config::from_env()?;
    log::info!(
        "starting dreid worker: level={} thread_count={} work_root={}",
        config.level,
        config.thread_count,
        config.work_root.display()
    );

    let seed_path = std::env::var("DREID_SEED_FILE")
        .map_err(|_| Error::config("DREID_SEED_FILE must name a 28-byte packed seed position"))?;
    let seed_bytes = std::fs::read(&seed_path).map_err(|e| Error::io(seed_path.clone(), e))?;
    if seed_bytes.len() != PositionPacked::BYTE_LEN {
        return Err(Error::config(format!(
            "seed file {} is {} bytes, expected {}",
            seed_path,
            seed_bytes.len(),
            PositionPacked::BYTE_LEN
        )));
    }
    let seed_array: [u8; PositionPacked::BYTE_LEN] = seed_bytes.try_into().unwrap();
    let seed_packed = PositionPacked::from_bytes(&seed_array);
    let seed_position = Position::unpack(&seed_packed);
    if seed_position.info.piece_count != config.level {
        return Err(Error::invariant(format!(
            "seed piece_count {} does not match configured level {}",
            seed_position.info.piece_count, config.level
        )));
    }

    std::fs::create_dir_all(&config.work_root).map_err(|e| Error::io(config.work_root.display().to_string(), e))?;
    let ctx = Arc::new(TraversalContext::new(&config.work_root, config.level, config.clone())?);
    ctx.seed(&seed_position, traversal::FIRST_ENGINE_ID - 1);

    let stop_ctx = Arc::clone(&ctx);
    ctrlc::set_handler(move || {
        log::warn!("stop signal received, draining in-flight work");
        stop_ctx.request_stop();
    })
    .map_err(|e| Error::config(format!("failed to install signal handler: {}", e)))?;

    traversal::run(ctx, &config.work_root)?;
    log::info!("traversal complete");
    Ok(())
}
