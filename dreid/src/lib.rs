//! `dreid`: chess position representation, the packed position codec, and a
//! full legal-move generator. Pure logic, no I/O — the disk-backed
//! traversal engine built on top of this crate lives in `dreid_engine`.
//!
//! Mirrors the teacher's own `pleco` / `pleco_engine` split: board
//! representation and move generation in one crate with no external
//! dependencies beyond small utility crates, search/persistence in another
//! that depends on it.

pub mod chess_move;
pub mod endgame;
pub mod movegen;
pub mod piece;
pub mod position;
pub mod square;

pub use chess_move::{Action, Move};
pub use endgame::EndGameReason;
pub use movegen::{apply_move, is_attacked, legal_moves, MoveList};
pub use piece::{Piece, PieceType, Side};
pub use position::{CastleRights, GameInfo, Position, PositionPacked};
pub use square::{Direction, Offset, Square};
