//! End-to-end scenarios from the specification's testable-properties list:
//! the standard opening, the en-passant window, and castling through an
//! attacked square.

use dreid::{
    apply_move, is_attacked, legal_moves, Action, CastleRights, Piece, PieceType, Position, Side, Square,
};

#[test]
fn standard_opening_has_exactly_twenty_moves() {
    let pos = Position::start_position();
    let packed = pos.pack();
    assert_eq!(packed.population, 0xFFFF_0000_0000_FFFFu64);
    assert_eq!(pos.info.piece_count, 32);

    let moves = legal_moves(&pos, true);
    assert_eq!(moves.len(), 20);

    let pawn_one_steps = moves
        .iter()
        .filter(|m| m.action() == Action::Move && m.src().rank() == 1 && m.target().rank() == 2)
        .count();
    let pawn_two_steps = moves
        .iter()
        .filter(|m| m.action() == Action::Move && m.src().rank() == 1 && m.target().rank() == 3)
        .count();
    let knight_moves = moves
        .iter()
        .filter(|m| {
            let piece = pos.piece_at(m.src());
            piece.piece_type == PieceType::Knight
        })
        .count();
    assert_eq!(pawn_one_steps, 8);
    assert_eq!(pawn_two_steps, 8);
    assert_eq!(knight_moves, 4);
}

#[test]
fn en_passant_emitted_once_then_window_closes() {
    // White has just played e2-e4; black has a pawn on d4.
    let mut pos = Position::empty();
    pos.set(Square::E1, Piece::new(PieceType::King, Side::White));
    pos.set(Square::E8, Piece::new(PieceType::King, Side::Black));
    pos.set(Square::new(3, 4), Piece::new(PieceType::Pawn, Side::White)); // e4
    pos.set(Square::new(3, 3), Piece::new(PieceType::Pawn, Side::Black)); // d4
    pos.info.piece_count = 4;
    pos.info.castle_rights = CastleRights::empty();
    pos.info.on_move = Side::Black;
    pos.info.en_passant_file = Some(4); // the e-file pawn just double-stepped

    let moves = legal_moves(&pos, true);
    let ep: Vec<_> = moves.iter().filter(|m| m.action() == Action::EnPassant).collect();
    assert_eq!(ep.len(), 1);
    assert_eq!(ep[0].src(), Square::new(3, 3));
    assert_eq!(ep[0].target(), Square::new(2, 4));

    // Any other black move first closes the window for the position that follows.
    let other = moves.iter().copied().find(|m| m.action() != Action::EnPassant).unwrap();
    let descendant = apply_move(&pos, other);
    assert_eq!(descendant.info.en_passant_file, None);
    let descendant_moves = legal_moves(&descendant, true);
    assert!(!descendant_moves.iter().any(|m| m.action() == Action::EnPassant));
}

#[test]
fn castling_through_attacked_square_is_excluded() {
    let mut pos = Position::empty();
    pos.set(Square::E1, Piece::new(PieceType::King, Side::White));
    pos.set(Square::H1, Piece::new(PieceType::Rook, Side::White));
    pos.set(Square::A1, Piece::new(PieceType::Rook, Side::White));
    pos.set(Square::E8, Piece::new(PieceType::King, Side::Black));
    // A black rook on f8 attacks f1, the square the king must pass through
    // to castle kingside.
    pos.set(Square::new(7, 5), Piece::new(PieceType::Rook, Side::Black));
    pos.info.piece_count = 4;
    pos.info.castle_rights = CastleRights::all();
    pos.info.on_move = Side::White;

    assert!(is_attacked(&pos, Square::new(0, 5), Side::Black)); // f1 attacked

    let moves = legal_moves(&pos, true);
    assert!(!moves.iter().any(|m| m.action() == Action::CastleKing));
    assert!(moves.iter().any(|m| m.action() == Action::CastleQueen));
}
