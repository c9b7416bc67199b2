//! The graph traversal engine: worker loop, deduplication, cross-reference
//! edges, and level transitions, per spec.md §4.6 and §5.
//!
//! The original's scattered global mutexes (`unresolved_mtx`, `resolved_mtx`,
//! `mtx_id`, a striped `posrefmtx`, a process-wide `stop` flag) are reified
//! into one explicit [`TraversalContext`] threaded into every worker via
//! `Arc`, per spec.md §9's own redesign note — no hidden global singletons,
//! unlike the teacher's `pleco_engine::threadpool`, which reaches for a
//! `lazy_static` global pool. Worker threads are spawned with
//! `std::thread::Builder`, the same primitive the teacher's threadpool uses,
//! but without its unsafe raw-pointer thread-local search-stack trick.

use crate::config::Config;
use crate::dht::DiskHashTable;
use crate::dq::DiskQueue;
use crate::error::{Error, Result};
use crate::output::PositionFileWriter;
use dreid::{apply_move, endgame, legal_moves, Move, Position, PositionPacked};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Per-position graph metadata, excluding its `ref_list` (see
/// [`RefListStore`] for why that lives in its own striped side-table).
#[derive(Copy, Clone, Debug)]
pub struct PosInfo {
    pub id: u64,
    pub parent_id: u64,
    pub mv: Move,
    pub move_count: u32,
    pub distance: u32,
    pub fifty_counter: u32,
    pub egr: endgame::EndGameReason,
}

/// Sentinel `parent_id` for a seed position (one with no discovering move).
pub const NO_PARENT: u64 = 0;

/// Number of mutex stripes guarding ref-list updates: spec.md §9's
/// "small fixed array of mutexes, indexed by id mod k" rather than one
/// mutex per entry, so a popular position's incoming-edge list doesn't
/// require a per-entry allocation, only contention with the ~1/K of
/// other positions that happen to share its stripe.
const REF_LIST_STRIPES: usize = 64;

/// Stores each position's additional incoming `(move, parent_id)` edges,
/// independent of whichever map (`unresolved`/`resolved`, or the DQ spill)
/// currently owns the position's core [`PosInfo`]. Decoupling the two
/// means appending a reverse edge to a popular position never contends
/// with map-wide traversal of `unresolved`/`resolved`.
pub struct RefListStore {
    shards: Vec<Mutex<HashMap<u64, Vec<(Move, u64)>>>>,
}

impl RefListStore {
    fn new() -> RefListStore {
        RefListStore {
            shards: (0..REF_LIST_STRIPES).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    fn stripe(&self, id: u64) -> &Mutex<HashMap<u64, Vec<(Move, u64)>>> {
        &self.shards[(id as usize) % REF_LIST_STRIPES]
    }

    pub fn append(&self, id: u64, mv: Move, parent_id: u64) {
        self.stripe(id).lock().unwrap().entry(id).or_default().push((mv, parent_id));
    }

    pub fn get(&self, id: u64) -> Vec<(Move, u64)> {
        self.stripe(id).lock().unwrap().get(&id).cloned().unwrap_or_default()
    }
}

/// All state one run of the traversal engine shares across worker threads.
pub struct TraversalContext {
    pub level: u8,
    pub config: Config,
    next_id: AtomicU64,
    unresolved: Mutex<HashMap<PositionPacked, PosInfo>>,
    resolved: Mutex<HashMap<PositionPacked, PosInfo>>,
    /// Write-through persistent mirror of `resolved`, keyed by the packed
    /// position's own bytes. Always written (so the graph is recoverable on
    /// restart, per spec.md §7); consulted directly for dedup lookups when
    /// `cache_resolved` is off and the in-memory map is kept empty.
    resolved_dht: DiskHashTable,
    ref_lists: RefListStore,
    spill: DiskQueue,
    stop: AtomicBool,
}

/// The first id handed out by the engine's own counter; ids below this are
/// reserved for externally supplied seeds, per spec.md §6.
pub const FIRST_ENGINE_ID: u64 = 1000;

const SPILL_RECORD_LEN: u64 = 56;
const RESOLVED_DHT_VAL_LEN: usize = 32;

impl TraversalContext {
    pub fn new(work_root: &Path, level: u8, config: Config) -> Result<TraversalContext> {
        let spill = DiskQueue::open(work_root, &format!("spill-{}", level), SPILL_RECORD_LEN, 64 * 1024 * 1024)?;
        let resolved_dht = DiskHashTable::open(
            work_root,
            level,
            "resolved",
            PositionPacked::BYTE_LEN,
            RESOLVED_DHT_VAL_LEN,
        )?;
        Ok(TraversalContext {
            level,
            config,
            next_id: AtomicU64::new(FIRST_ENGINE_ID),
            unresolved: Mutex::new(HashMap::new()),
            resolved: Mutex::new(HashMap::new()),
            resolved_dht,
            ref_lists: RefListStore::new(),
            spill,
            stop: AtomicBool::new(false),
        })
    }

    /// Registers a seed position with an externally supplied low-range id.
    pub fn seed(&self, pos: &Position, id: u64) {
        let info = PosInfo {
            id,
            parent_id: NO_PARENT,
            mv: Move::NONE,
            move_count: 0,
            distance: 0,
            fifty_counter: 0,
            egr: endgame::EndGameReason::None,
        };
        self.unresolved.lock().unwrap().insert(pos.pack(), info);
    }

    /// Cooperative shutdown: each worker finishes its current base and
    /// exits at the top of its next loop iteration.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn pop_unresolved(&self) -> Result<Option<(PositionPacked, PosInfo)>> {
        {
            let mut unresolved = self.unresolved.lock().unwrap();
            if let Some(&key) = unresolved.keys().next() {
                let info = unresolved.remove(&key).unwrap();
                self.store_resolved(key, info)?;
                return Ok(Some((key, info)));
            }
        }
        if let Some(bytes) = self.spill.pop()? {
            let (packed, info) = decode_spill_record(&bytes);
            self.store_resolved(packed, info)?;
            return Ok(Some((packed, info)));
        }
        Ok(None)
    }

    /// Claims a position as resolved as soon as it's popped, before it has
    /// been expanded, so a transposition discovered by another in-flight
    /// position's children is deduplicated instead of re-queued. Uses
    /// `insert` since the key is new here; the corrected `move_count`/`egr`
    /// is written later via [`TraversalContext::finalize_resolved`], which
    /// must use `update` instead since this provisional write already
    /// occupies the key.
    fn store_resolved(&self, packed: PositionPacked, info: PosInfo) -> Result<()> {
        self.resolved_dht.insert(&packed.to_bytes(), &encode_resolved_value(info))?;
        if self.config.cache_resolved {
            self.resolved.lock().unwrap().insert(packed, info);
        }
        Ok(())
    }

    /// Looks up a resolved position's id, checking the in-memory map first
    /// and falling back to the persistent DHT mirror (the only place the
    /// entry lives when `cache_resolved` is off).
    fn lookup_resolved_id(&self, packed: &PositionPacked) -> Result<Option<u64>> {
        if let Some(info) = self.resolved.lock().unwrap().get(packed) {
            return Ok(Some(info.id));
        }
        let mut val = [0u8; RESOLVED_DHT_VAL_LEN];
        if self.resolved_dht.search(&packed.to_bytes(), &mut val)? {
            Ok(Some(u64::from_le_bytes(val[0..8].try_into().unwrap())))
        } else {
            Ok(None)
        }
    }

    /// Inserts a brand-new same-level successor, spilling to the DQ instead
    /// of the in-memory map once `unresolved_spill_threshold` is exceeded.
    fn insert_unresolved(&self, packed: PositionPacked, info: PosInfo) -> Result<()> {
        let mut unresolved = self.unresolved.lock().unwrap();
        if unresolved.len() < self.config.unresolved_spill_threshold {
            unresolved.insert(packed, info);
            Ok(())
        } else {
            drop(unresolved);
            self.spill.push(&encode_spill_record(packed, info))
        }
    }

    /// Overwrites the provisional entry `pop_unresolved` wrote with the
    /// corrected `move_count`/`egr` once the base position has actually
    /// been expanded. Uses `update`, not `insert` — the key was already
    /// written provisionally, and `insert` is a documented no-op when the
    /// key exists, which would silently drop the correction.
    fn finalize_resolved(&self, packed: PositionPacked, info: PosInfo) -> Result<()> {
        self.resolved_dht.update(&packed.to_bytes(), &encode_resolved_value(info))?;
        if self.config.cache_resolved {
            self.resolved.lock().unwrap().insert(packed, info);
        }
        Ok(())
    }

    /// `true` once both `unresolved` and the DQ spill are empty.
    pub fn is_drained(&self) -> bool {
        self.unresolved.lock().unwrap().is_empty() && self.spill.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.lock().unwrap().len()
    }
}

fn encode_spill_record(packed: PositionPacked, info: PosInfo) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SPILL_RECORD_LEN as usize);
    buf.extend_from_slice(&packed.to_bytes());
    buf.extend_from_slice(&info.id.to_le_bytes());
    buf.extend_from_slice(&info.parent_id.to_le_bytes());
    buf.extend_from_slice(&info.mv.raw().to_le_bytes());
    buf.extend_from_slice(&info.distance.to_le_bytes());
    buf.extend_from_slice(&info.fifty_counter.to_le_bytes());
    buf.push(egr_to_u8(info.egr));
    buf.resize(SPILL_RECORD_LEN as usize, 0);
    buf
}

fn decode_spill_record(bytes: &[u8]) -> (PositionPacked, PosInfo) {
    let packed = PositionPacked::from_bytes(bytes[0..28].try_into().unwrap());
    let id = u64::from_le_bytes(bytes[28..36].try_into().unwrap());
    let parent_id = u64::from_le_bytes(bytes[36..44].try_into().unwrap());
    let mv = Move::from_raw(u16::from_le_bytes(bytes[44..46].try_into().unwrap()));
    let distance = u32::from_le_bytes(bytes[46..50].try_into().unwrap());
    let fifty_counter = u32::from_le_bytes(bytes[50..54].try_into().unwrap());
    let egr = egr_from_u8(bytes[54]);
    (packed, PosInfo { id, parent_id, mv, move_count: 0, distance, fifty_counter, egr })
}

fn encode_resolved_value(info: PosInfo) -> [u8; RESOLVED_DHT_VAL_LEN] {
    let mut buf = [0u8; RESOLVED_DHT_VAL_LEN];
    buf[0..8].copy_from_slice(&info.id.to_le_bytes());
    buf[8..16].copy_from_slice(&info.parent_id.to_le_bytes());
    buf[16..18].copy_from_slice(&info.mv.raw().to_le_bytes());
    buf[18..22].copy_from_slice(&info.distance.to_le_bytes());
    buf[22..26].copy_from_slice(&info.fifty_counter.to_le_bytes());
    buf[26] = egr_to_u8(info.egr);
    buf[27..31].copy_from_slice(&info.move_count.to_le_bytes());
    buf
}

fn decode_resolved_value(buf: &[u8; RESOLVED_DHT_VAL_LEN]) -> PosInfo {
    PosInfo {
        id: u64::from_le_bytes(buf[0..8].try_into().unwrap()),
        parent_id: u64::from_le_bytes(buf[8..16].try_into().unwrap()),
        mv: Move::from_raw(u16::from_le_bytes(buf[16..18].try_into().unwrap())),
        distance: u32::from_le_bytes(buf[18..22].try_into().unwrap()),
        fifty_counter: u32::from_le_bytes(buf[22..26].try_into().unwrap()),
        egr: egr_from_u8(buf[26]),
        move_count: u32::from_le_bytes(buf[27..31].try_into().unwrap()),
    }
}

fn egr_to_u8(egr: endgame::EndGameReason) -> u8 {
    use endgame::EndGameReason::*;
    match egr {
        None => 0,
        Checkmate => 1,
        Stalemate => 2,
        KingVsKing => 3,
        KingAndMinorVsKing => 4,
        OppositeSideBishopsSameColor => 5,
        LoneKingVsMaterial => 6,
        MinorPieceCombinationNoWin => 7,
        KingAndTwoKnightsVsNoPawns => 8,
        FiftyMoveRule => 9,
    }
}

fn egr_from_u8(b: u8) -> endgame::EndGameReason {
    use endgame::EndGameReason::*;
    match b {
        1 => Checkmate,
        2 => Stalemate,
        3 => KingVsKing,
        4 => KingAndMinorVsKing,
        5 => OppositeSideBishopsSameColor,
        6 => LoneKingVsMaterial,
        7 => MinorPieceCombinationNoWin,
        8 => KingAndTwoKnightsVsNoPawns,
        9 => FiftyMoveRule,
        _ => None,
    }
}

/// Runs one worker's traversal loop (spec.md §4.6's pseudocode) until the
/// stop flag is raised or both `unresolved` and the spill queue are empty.
pub fn run_worker(
    ctx: &TraversalContext,
    level_sink: &mut PositionFileWriter,
    draw_sink: &mut PositionFileWriter,
) -> Result<()> {
    loop {
        if ctx.stop.load(Ordering::SeqCst) {
            return Ok(());
        }
        let (base_packed, mut base_info) = match ctx.pop_unresolved()? {
            Some(entry) => entry,
            None => return Ok(()),
        };

        let base_pos = Position::unpack(&base_packed);
        if base_pos.info.piece_count != ctx.level {
            return Err(Error::invariant(format!(
                "worker popped a position with piece_count {} at level {}",
                base_pos.info.piece_count, ctx.level
            )));
        }

        let moves = legal_moves(&base_pos, ctx.config.enforce_castling_once_moved);
        if moves.is_empty() {
            let own_king_attacked =
                dreid::is_attacked(&base_pos, base_pos.king_square(base_pos.info.on_move), base_pos.info.on_move.other());
            base_info.egr = endgame::classify(&base_pos, 0, own_king_attacked);
            ctx.finalize_resolved(base_packed, base_info)?;
            continue;
        }
        base_info.move_count = moves.len() as u32;

        for mv in moves {
            process_child(ctx, &base_pos, &base_info, mv, level_sink, draw_sink)?;
        }

        ctx.finalize_resolved(base_packed, base_info)?;
    }
}

fn process_child(
    ctx: &TraversalContext,
    base_pos: &Position,
    base_info: &PosInfo,
    mv: Move,
    level_sink: &mut PositionFileWriter,
    draw_sink: &mut PositionFileWriter,
) -> Result<()> {
    let moving_piece = base_pos.piece_at(mv.src());
    let resets_fifty = moving_piece.piece_type.is_pawn() || mv.is_capture();
    let fifty_counter = if ctx.config.enforce_50_move_rule {
        if resets_fifty { 0 } else { base_info.fifty_counter + 1 }
    } else {
        0
    };

    let child_pos = apply_move(base_pos, mv);
    let child_packed = child_pos.pack();
    let child_piece_count = child_pos.info.piece_count;

    // Routes by piece-count drop alone, independent of move type — the
    // specification's own fix for the source's pawn-move-keyed routing.
    if child_piece_count < ctx.level {
        let id = ctx.next_id();
        level_sink.write_record(
            id,
            base_info.id,
            &child_packed,
            mv,
            0,
            base_info.distance + 1,
            fifty_counter,
            egr_to_u8(endgame::EndGameReason::None),
            &[],
        )?;
        return Ok(());
    }

    if child_piece_count != ctx.level {
        return Err(Error::invariant(format!(
            "child piece_count {} is neither {} nor {}",
            child_piece_count, ctx.level, ctx.level - 1
        )));
    }

    if ctx.config.enforce_50_move_rule && fifty_counter >= 50 {
        let id = ctx.next_id();
        draw_sink.write_record(
            id,
            base_info.id,
            &child_packed,
            mv,
            0,
            base_info.distance + 1,
            fifty_counter,
            egr_to_u8(endgame::EndGameReason::FiftyMoveRule),
            &[],
        )?;
        return Ok(());
    }

    // Same-level successor: deduplicate against both closed and open sets.
    if let Some(existing_id) = ctx.lookup_resolved_id(&child_packed)? {
        ctx.ref_lists.append(existing_id, mv, base_info.id);
        return Ok(());
    }
    {
        let mut unresolved = ctx.unresolved.lock().unwrap();
        if let Some(existing) = unresolved.get_mut(&child_packed) {
            ctx.ref_lists.append(existing.id, mv, base_info.id);
            return Ok(());
        }
    }
    let id = ctx.next_id();
    let info = PosInfo {
        id,
        parent_id: base_info.id,
        mv,
        move_count: 0,
        distance: base_info.distance + 1,
        fifty_counter,
        egr: endgame::EndGameReason::None,
    };
    ctx.insert_unresolved(child_packed, info)
}

/// Spawns `config.thread_count` workers and blocks until all have drained
/// `unresolved` (and the spill queue) or the stop flag is raised. Returns
/// the first worker error encountered, if any.
pub fn run(ctx: Arc<TraversalContext>, work_root: &Path) -> Result<()> {
    let mut handles = Vec::new();
    for idx in 0..ctx.config.thread_count {
        let ctx = Arc::clone(&ctx);
        let root = work_root.to_path_buf();
        let level = ctx.level;
        let handle = std::thread::Builder::new()
            .name(format!("dreid-worker-{}", idx))
            .spawn(move || -> Result<()> {
                let mut level_sink = PositionFileWriter::create(&root, level, "level", idx)?;
                let mut draw_sink = PositionFileWriter::create(&root, level, "draw", idx)?;
                run_worker(&ctx, &mut level_sink, &mut draw_sink)?;
                level_sink.flush()?;
                draw_sink.flush()?;
                Ok(())
            })
            .map_err(|e| Error::io("<thread spawn>", e))?;
        handles.push(handle);
    }

    let mut first_err = None;
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
                ctx.request_stop();
            }
            Err(_) => {
                if first_err.is_none() {
                    first_err = Some(Error::invariant("worker thread panicked"));
                }
                ctx.request_stop();
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use dreid::{CastleRights, Piece, PieceType, Side, Square};
    use tempfile::tempdir;

    fn test_config() -> Config {
        Config { thread_count: 1, ..Config::default() }
    }

    #[test]
    fn stalemate_resolves_immediately_with_no_legal_moves() {
        let dir = tempdir().unwrap();
        let ctx = TraversalContext::new(dir.path(), 3, test_config()).unwrap();

        let mut pos = Position::empty();
        pos.set(Square::A1, Piece::new(PieceType::King, Side::White));
        pos.set(Square::new(1, 2), Piece::new(PieceType::King, Side::Black)); // c2
        pos.set(Square::new(2, 1), Piece::new(PieceType::Queen, Side::Black)); // b3
        pos.info.piece_count = 3;
        pos.info.castle_rights = CastleRights::empty();
        pos.info.on_move = Side::White;
        assert!(legal_moves(&pos, true).is_empty());

        ctx.seed(&pos, 1);
        let mut level_sink = PositionFileWriter::create(dir.path(), 3, "level", 0).unwrap();
        let mut draw_sink = PositionFileWriter::create(dir.path(), 3, "draw", 0).unwrap();
        run_worker(&ctx, &mut level_sink, &mut draw_sink).unwrap();

        assert!(ctx.is_drained());
        let resolved = ctx.resolved.lock().unwrap();
        let info = resolved.get(&pos.pack()).unwrap();
        assert_eq!(info.egr, endgame::EndGameReason::Stalemate);
    }

    #[test]
    fn finalized_reason_reaches_the_persistent_dht_not_just_the_in_memory_map() {
        // With `cache_resolved` off, the only place a resolved entry lives
        // is `resolved_dht`, so this exercises `finalize_resolved`'s
        // `update` (not `insert`) path directly against the persisted
        // bytes — a stale `insert`-after-`insert` would leave `egr` at
        // `None` on disk even though this in-memory assertion would still
        // pass.
        let dir = tempdir().unwrap();
        let config = Config { thread_count: 1, cache_resolved: false, ..Config::default() };
        let ctx = TraversalContext::new(dir.path(), 3, config).unwrap();

        let mut pos = Position::empty();
        pos.set(Square::A1, Piece::new(PieceType::King, Side::White));
        pos.set(Square::new(1, 2), Piece::new(PieceType::King, Side::Black)); // c2
        pos.set(Square::new(2, 1), Piece::new(PieceType::Queen, Side::Black)); // b3
        pos.info.piece_count = 3;
        pos.info.castle_rights = CastleRights::empty();
        pos.info.on_move = Side::White;

        ctx.seed(&pos, 1);
        let mut level_sink = PositionFileWriter::create(dir.path(), 3, "level", 0).unwrap();
        let mut draw_sink = PositionFileWriter::create(dir.path(), 3, "draw", 0).unwrap();
        run_worker(&ctx, &mut level_sink, &mut draw_sink).unwrap();

        assert!(ctx.resolved.lock().unwrap().is_empty());

        let mut val = [0u8; RESOLVED_DHT_VAL_LEN];
        let found = ctx.resolved_dht.search(&pos.pack().to_bytes(), &mut val).unwrap();
        assert!(found);
        let info = decode_resolved_value(&val);
        assert_eq!(info.egr, endgame::EndGameReason::Stalemate);
    }

    #[test]
    fn checkmate_resolves_with_checkmate_reason() {
        let dir = tempdir().unwrap();
        let ctx = TraversalContext::new(dir.path(), 4, test_config()).unwrap();

        let mut pos = Position::empty();
        pos.set(Square::H1, Piece::new(PieceType::King, Side::White));
        pos.set(Square::new(1, 6), Piece::new(PieceType::Pawn, Side::White)); // g2
        pos.set(Square::new(1, 7), Piece::new(PieceType::Pawn, Side::White)); // h2
        pos.set(Square::A1, Piece::new(PieceType::Rook, Side::Black));
        pos.set(Square::E8, Piece::new(PieceType::King, Side::Black));
        pos.info.piece_count = 4;
        pos.info.castle_rights = CastleRights::empty();
        pos.info.on_move = Side::White;
        assert!(legal_moves(&pos, true).is_empty());
        assert!(dreid::is_attacked(&pos, pos.king_square(Side::White), Side::Black));

        ctx.seed(&pos, 1);
        let mut level_sink = PositionFileWriter::create(dir.path(), 4, "level", 0).unwrap();
        let mut draw_sink = PositionFileWriter::create(dir.path(), 4, "draw", 0).unwrap();
        run_worker(&ctx, &mut level_sink, &mut draw_sink).unwrap();

        let resolved = ctx.resolved.lock().unwrap();
        let info = resolved.get(&pos.pack()).unwrap();
        assert_eq!(info.egr, endgame::EndGameReason::Checkmate);
    }

    #[test]
    fn duplicate_child_appends_ref_list_instead_of_new_entry() {
        let dir = tempdir().unwrap();
        let ctx = TraversalContext::new(dir.path(), 32, test_config()).unwrap();
        let packed = Position::start_position().pack();
        let info = PosInfo {
            id: 1000,
            parent_id: 1,
            mv: Move::NONE,
            move_count: 0,
            distance: 1,
            fifty_counter: 0,
            egr: endgame::EndGameReason::None,
        };
        ctx.insert_unresolved(packed, info).unwrap();

        // A second arrival at an identical packed position, from a
        // different parent, must append to the existing entry's ref_list
        // rather than create a second entry — the dedup property of
        // spec.md §8.
        {
            let unresolved = ctx.unresolved.lock().unwrap();
            let existing = unresolved.get(&packed).unwrap();
            ctx.ref_lists.append(existing.id, Move::NONE, 2);
        }

        assert_eq!(ctx.unresolved.lock().unwrap().len(), 1);
        assert_eq!(ctx.ref_lists.get(1000).len(), 1);
        assert_eq!(ctx.ref_lists.get(1000)[0], (Move::NONE, 2));
    }

    #[test]
    fn monotonic_ids_across_successive_allocations() {
        let dir = tempdir().unwrap();
        let ctx = TraversalContext::new(dir.path(), 32, test_config()).unwrap();
        let a = ctx.next_id();
        let b = ctx.next_id();
        let c = ctx.next_id();
        assert!(a < b);
        assert!(b < c);
    }
}
