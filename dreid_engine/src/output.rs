//! Append-only, hex-encoded CSV output sinks, per spec.md §6.
//!
//! Each worker owns its own writer so that output never contends between
//! threads; filenames embed the level and a thread discriminator the way
//! the teacher's own per-thread scratch allocations (`pleco_engine`'s
//! per-thread search stacks) avoid cross-thread contention by construction
//! rather than by locking.

use crate::error::{Error, Result};
use dreid::{Move, Position, PositionPacked};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const HEADER: &str =
    "id,parent_id,game_info,population,hi,lo,move_count,move_packed,distance,fifty_counter,end_game_reason,ref_count,ref_pairs";

/// One worker's append-only CSV output file for a given sink kind
/// (`"level"` for same/next-level positions, `"draw"` for 50-move-rule
/// terminations).
pub struct PositionFileWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl PositionFileWriter {
    pub fn create(root: &Path, level: u8, kind: &str, thread_idx: usize) -> Result<PositionFileWriter> {
        let dir = root.join(level.to_string());
        std::fs::create_dir_all(&dir).map_err(|e| Error::io(dir.display().to_string(), e))?;
        let path = dir.join(format!("{}_{}.csv", kind, thread_idx));
        let is_new = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        if is_new {
            writeln!(file, "{}", HEADER).map_err(|e| Error::io(path.display().to_string(), e))?;
        }
        Ok(PositionFileWriter { writer: BufWriter::new(file), path })
    }

    /// Writes one finalized position record. `ref_list` holds any
    /// additional `(move, parent_id)` incoming edges beyond the first.
    #[allow(clippy::too_many_arguments)]
    pub fn write_record(
        &mut self,
        id: u64,
        parent_id: u64,
        packed: &PositionPacked,
        mv: Move,
        move_count: u32,
        distance: u32,
        fifty_counter: u32,
        end_game_reason: u8,
        ref_list: &[(Move, u64)],
    ) -> Result<()> {
        write!(
            self.writer,
            "{:016x},{:016x},{:08x},{:016x},{:016x},{:016x},{:x},{:04x},{:x},{:x},{:x},{:x}",
            id,
            parent_id,
            packed.game_info,
            packed.population,
            packed.hi,
            packed.lo,
            move_count,
            mv.raw(),
            distance,
            fifty_counter,
            end_game_reason,
            ref_list.len(),
        )
        .map_err(|e| self.ioerr(e))?;
        for (ref_mv, ref_parent) in ref_list {
            write!(self.writer, ",{:04x},{:016x}", ref_mv.raw(), ref_parent).map_err(|e| self.ioerr(e))?;
        }
        writeln!(self.writer).map_err(|e| self.ioerr(e))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.ioerr(e))
    }

    fn ioerr(&self, e: std::io::Error) -> Error {
        Error::io(self.path.display().to_string(), e)
    }
}

/// Re-serializes a decoded [`Position`] as its packed record, for callers
/// that only have the unpacked board (e.g. a freshly-applied child move).
pub fn pack(pos: &Position) -> PositionPacked {
    pos.pack()
}

impl Drop for PositionFileWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
