//! Movement rules for each kind of piece.
//!
//! The predicates here answer whether a piece could make a move on the
//! given board. They do not ask whether the move would leave the mover's
//! own king attacked. That is decided by the caller (see
//! [`evaluate_move`](crate::evaluate_move)) which passes the result in as
//! `mover_in_check`.

use bitflags::bitflags;
use tracing::trace;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    check,
    color::Color,
    path,
    role::Role,
    square::Square,
    state::GameState,
    types::Piece,
};

/// The eight one-cell steps of a king.
pub const KING_STEPS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

/// Tests whether `piece` standing on `from` may move to `to`.
///
/// If `mover_in_check` is `Some(true)` no piece may move: a king in check
/// is resolved by [`evaluate_move`](crate::evaluate_move), not here.
///
/// # Examples
///
/// ```
/// use arbiter::{rules, Board, Color, GameState, Square};
///
/// let board = Board::new();
/// let state = GameState::new();
/// let knight = Color::White.knight();
///
/// assert!(rules::can_move(&board, &state, knight, Square::G1, Square::F3, None));
/// assert!(!rules::can_move(&board, &state, knight, Square::G1, Square::E2, None));
/// assert!(!rules::can_move(&board, &state, knight, Square::G1, Square::F3, Some(true)));
/// ```
pub fn can_move(
    board: &Board,
    state: &GameState,
    piece: Piece,
    from: Square,
    to: Square,
    mover_in_check: Option<bool>,
) -> bool {
    if mover_in_check == Some(true) || from == to {
        return false;
    }

    let color = piece.color;
    match piece.role {
        Role::Pawn => {
            pawn_advance(board, color, from, to)
                || pawn_capture(board, color, from, to)
                || en_passant(state, color, from, to).is_some()
        }
        Role::Knight => knight_move(board, color, from, to),
        Role::Bishop => bishop_move(board, color, from, to),
        Role::Rook => rook_move(board, color, from, to),
        Role::Queen => queen_move(board, color, from, to),
        Role::King => {
            king_step(board, color, from, to) || castle(board, state, color, from, to).is_some()
        }
    }
}

/// Tests whether `piece` on `from` attacks `target`.
///
/// Pawns attack only diagonally forward. Kings attack only the adjacent
/// cells: castling never captures.
pub fn attacks(board: &Board, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }

    let color = piece.color;
    match piece.role {
        Role::Pawn => pawn_capture(board, color, from, target),
        Role::Knight => knight_move(board, color, from, target),
        Role::Bishop => bishop_move(board, color, from, target),
        Role::Rook => rook_move(board, color, from, target),
        Role::Queen => queen_move(board, color, from, target),
        Role::King => king_step(board, color, from, target),
    }
}

/// The destination is empty or holds an enemy piece.
#[inline]
fn is_open_to(board: &Board, color: Color, to: Square) -> bool {
    board.color_at(to) != Some(color)
}

/// Every cell strictly between `from` and `to` is empty.
#[inline]
fn is_clear(board: &Board, from: Square, to: Square) -> bool {
    path::between(from, to).all(|sq| board.is_empty_at(sq))
}

pub fn rook_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (df, dr) = from.delta(to);
    (df == 0) != (dr == 0) && is_clear(board, from, to) && is_open_to(board, color, to)
}

pub fn bishop_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (df, dr) = from.delta(to);
    df != 0 && df.abs() == dr.abs() && is_clear(board, from, to) && is_open_to(board, color, to)
}

pub fn queen_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    rook_move(board, color, from, to) || bishop_move(board, color, from, to)
}

pub fn knight_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    path::is_knight_jump(from, to) && is_open_to(board, color, to)
}

pub fn king_step(board: &Board, color: Color, from: Square, to: Square) -> bool {
    from.distance(to) == 1 && is_open_to(board, color, to)
}

/// A pawn moving straight ahead: one cell onto an empty cell, or two cells
/// from its starting rank when both cells are empty. Never a capture.
pub fn pawn_advance(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let dir = color.pawn_direction();

    let Some(front) = from.offset(0, dir) else {
        return false;
    };
    if !board.is_empty_at(front) {
        return false;
    }
    if to == front {
        return true;
    }

    from.rank() == color.pawn_rank() && from.offset(0, 2 * dir) == Some(to) && board.is_empty_at(to)
}

/// A pawn capturing diagonally forward. The target must hold an enemy
/// piece.
pub fn pawn_capture(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (df, dr) = from.delta(to);
    df.abs() == 1 && dr == color.pawn_direction() && board.color_at(to) == Some(!color)
}

/// Checks for an en passant capture and returns the cell of the captured
/// pawn.
///
/// The capturing pawn must stand on its fifth rank, `to` must be diagonally
/// ahead of it, and the previous move must have been an enemy pawn
/// advancing two cells to land beside it on the file of `to`.
pub fn en_passant(state: &GameState, color: Color, from: Square, to: Square) -> Option<Square> {
    if from.rank() != color.en_passant_rank() {
        return None;
    }

    let dir = color.pawn_direction();
    let (df, dr) = from.delta(to);
    if df.abs() != 1 || dr != dir {
        return None;
    }

    let last = state.last_moved()?;
    let beside = from.offset(df, 0)?;
    (last.piece == (!color).pawn() && last.is_double_step() && last.to == beside)
        .then_some(beside)
}

bitflags! {
    /// Reasons a castle is not allowed. Empty if it is.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct CastlingViolations: u32 {
        /// The king has moved before.
        const KING_MOVED = 1 << 0;
        /// The king is not on its starting cell.
        const KING_NOT_HOME = 1 << 1;
        /// The target is not the rook's corner or the king's castled cell.
        const BAD_TARGET = 1 << 2;
        /// The king is in check.
        const IN_CHECK = 1 << 3;
        /// There is no own rook in the corner.
        const ROOK_MISSING = 1 << 4;
        /// The rook has moved before.
        const ROOK_MOVED = 1 << 5;
        /// The king would cross or land on an attacked cell.
        const PATH_ATTACKED = 1 << 6;
        /// A piece stands between king and rook.
        const PATH_OCCUPIED = 1 << 7;
    }
}

/// The side a king move from `from` to `to` would castle toward, judged by
/// direction alone.
pub fn castling_side(from: Square, to: Square) -> Option<CastlingSide> {
    match to.file().cmp(&from.file()) {
        core::cmp::Ordering::Greater => Some(CastlingSide::KingSide),
        core::cmp::Ordering::Less => Some(CastlingSide::QueenSide),
        core::cmp::Ordering::Equal => None,
    }
}

/// Would a king of `color`, moved from `from` to `sq`, be attacked there?
fn is_unsafe(board: &Board, color: Color, from: Square, sq: Square) -> bool {
    let moved = board.with_move(from, sq, color.king());
    check::attacker(&moved, color).is_some()
}

/// Lists every castling precondition that a king move from `from` to `to`
/// violates.
///
/// A castle may target either the rook's corner (`h1`) or the king's
/// destination (`g1`).
///
/// # Examples
///
/// ```
/// use arbiter::{rules, rules::CastlingViolations, Board, Color, GameState, Square};
///
/// let board: Board = [
///     (Square::E1, Color::White.king()),
///     (Square::H1, Color::White.rook()),
///     (Square::F1, Color::White.bishop()),
/// ].into_iter().collect();
///
/// let violations = rules::castling_violations(
///     &board, &GameState::new(), Color::White, Square::E1, Square::G1);
/// assert_eq!(violations, CastlingViolations::PATH_OCCUPIED);
/// ```
pub fn castling_violations(
    board: &Board,
    state: &GameState,
    color: Color,
    from: Square,
    to: Square,
) -> CastlingViolations {
    let mut violations = CastlingViolations::empty();

    if state.king_moves(color) != 0 {
        violations |= CastlingViolations::KING_MOVED;
    }
    if from != color.king_home() {
        violations |= CastlingViolations::KING_NOT_HOME;
    }

    let Some(side) = castling_side(from, to) else {
        return violations | CastlingViolations::BAD_TARGET;
    };
    if to != side.rook_from(color) && to != side.king_to(color) {
        violations |= CastlingViolations::BAD_TARGET;
    }

    if is_unsafe(board, color, from, from) {
        violations |= CastlingViolations::IN_CHECK;
    }

    if board.piece_at(side.rook_from(color)) != Some(color.rook()) {
        violations |= CastlingViolations::ROOK_MISSING;
    }
    if state.rook_moves(color, side) != 0 {
        violations |= CastlingViolations::ROOK_MOVED;
    }

    let backrank = color.backrank();
    if side
        .king_path()
        .iter()
        .any(|&file| is_unsafe(board, color, from, Square::from_coords(file, backrank)))
    {
        violations |= CastlingViolations::PATH_ATTACKED;
    }
    if side
        .gap()
        .iter()
        .any(|&file| !board.is_empty_at(Square::from_coords(file, backrank)))
    {
        violations |= CastlingViolations::PATH_OCCUPIED;
    }

    violations
}

/// Tests a castle and returns its side if every precondition holds.
pub fn castle(
    board: &Board,
    state: &GameState,
    color: Color,
    from: Square,
    to: Square,
) -> Option<CastlingSide> {
    let violations = castling_violations(board, state, color, from, to);
    if violations.is_empty() {
        castling_side(from, to)
    } else {
        trace!(%from, %to, ?violations, "castle rejected");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LastMove;

    fn board(pieces: &[(Square, Piece)]) -> Board {
        pieces.iter().copied().collect()
    }

    #[test]
    fn test_rook_move() {
        let board = board(&[
            (Square::C3, Color::White.pawn()),
            (Square::B5, Color::Black.pawn()),
            (Square::C7, Color::Black.pawn()),
            (Square::F5, Color::White.knight()),
        ]);
        let white = Color::White;

        assert!(rook_move(&board, white, Square::A1, Square::A8));
        assert!(rook_move(&board, white, Square::H8, Square::A8));
        assert!(rook_move(&board, white, Square::A1, Square::H1));
        assert!(rook_move(&board, white, Square::C5, Square::C7));

        assert!(!rook_move(&board, white, Square::A1, Square::H8));
        assert!(!rook_move(&board, white, Square::C5, Square::C1));
        assert!(!rook_move(&board, white, Square::C5, Square::A5));
        assert!(!rook_move(&board, white, Square::C5, Square::F5));
    }

    #[test]
    fn test_bishop_move() {
        let board = board(&[
            (Square::E2, Color::White.king()),
            (Square::F7, Color::Black.knight()),
        ]);
        let white = Color::White;

        assert!(bishop_move(&board, white, Square::A1, Square::H8));
        assert!(bishop_move(&board, white, Square::H1, Square::A8));
        assert!(bishop_move(&board, white, Square::A8, Square::H1));
        assert!(bishop_move(&board, white, Square::H8, Square::A1));
        assert!(bishop_move(&board, white, Square::D5, Square::F7));

        assert!(!bishop_move(&board, white, Square::F1, Square::D3));
        assert!(!bishop_move(&board, white, Square::F1, Square::E2));
        assert!(!bishop_move(&board, white, Square::D5, Square::H5));
    }

    #[test]
    fn test_queen_move() {
        let board = Board::empty();
        assert!(queen_move(&board, Color::White, Square::A1, Square::H8));
        assert!(queen_move(&board, Color::White, Square::A1, Square::A8));
        assert!(!queen_move(&board, Color::White, Square::E4, Square::B5));
    }

    #[test]
    fn test_knight_move() {
        let board = board(&[(Square::E2, Color::White.king())]);
        assert!(knight_move(&board, Color::White, Square::G1, Square::F3));
        assert!(knight_move(&board, Color::White, Square::G8, Square::E7));
        assert!(!knight_move(&board, Color::White, Square::G1, Square::E2));
        assert!(!knight_move(&board, Color::White, Square::G1, Square::E3));
    }

    #[test]
    fn test_pawn_advance() {
        let board = board(&[
            (Square::H4, Color::Black.pawn()),
            (Square::G5, Color::White.pawn()),
        ]);

        assert!(pawn_advance(&board, Color::White, Square::A2, Square::A4));
        assert!(pawn_advance(&board, Color::Black, Square::A7, Square::A5));
        assert!(pawn_advance(&board, Color::White, Square::A2, Square::A3));
        assert!(pawn_advance(&board, Color::Black, Square::A7, Square::A6));

        assert!(!pawn_advance(&board, Color::White, Square::A3, Square::A2));
        assert!(!pawn_advance(&board, Color::White, Square::A8, Square::A7));
        assert!(!pawn_advance(&board, Color::White, Square::H3, Square::H4));
        assert!(!pawn_advance(&board, Color::Black, Square::A7, Square::A8));
        assert!(!pawn_advance(&board, Color::Black, Square::A1, Square::A2));
        assert!(!pawn_advance(&board, Color::Black, Square::G7, Square::G5));
        assert!(!pawn_advance(&board, Color::White, Square::A3, Square::A5));
    }

    #[test]
    fn test_pawn_double_step_needs_both_cells_empty() {
        let board = board(&[(Square::E3, Color::Black.knight())]);
        assert!(!pawn_advance(&board, Color::White, Square::E2, Square::E4));

        let board = board_with(Square::E4, Color::Black.knight());
        assert!(!pawn_advance(&board, Color::White, Square::E2, Square::E4));
        assert!(pawn_advance(&board, Color::White, Square::E2, Square::E3));
    }

    fn board_with(sq: Square, piece: Piece) -> Board {
        Board::empty().with(sq, Some(piece))
    }

    #[test]
    fn test_pawn_capture() {
        let board = board(&[
            (Square::G4, Color::Black.pawn()),
            (Square::B5, Color::White.pawn()),
        ]);

        assert!(pawn_capture(&board, Color::White, Square::F3, Square::G4));
        assert!(pawn_capture(&board, Color::Black, Square::C6, Square::B5));

        assert!(!pawn_capture(&board, Color::White, Square::F3, Square::E4));
        assert!(!pawn_capture(&board, Color::White, Square::A4, Square::B5));
        assert!(!pawn_capture(&board, Color::Black, Square::C6, Square::D5));
        assert!(!pawn_capture(&board, Color::Black, Square::F5, Square::G4));
        assert!(!pawn_capture(&board, Color::Black, Square::H3, Square::G4));
    }

    fn after(piece: Piece, from: Square, to: Square) -> GameState {
        let mut state = GameState::new();
        state.set_last_moved(Some(LastMove { piece, from, to }));
        state
    }

    #[test]
    fn test_en_passant() {
        let (white, black) = (Color::White, Color::Black);

        let state = after(black.pawn(), Square::F7, Square::F5);
        assert_eq!(en_passant(&state, white, Square::E5, Square::F6), Some(Square::F5));
        assert_eq!(en_passant(&state, white, Square::G5, Square::F6), Some(Square::F5));
        assert_eq!(en_passant(&state, white, Square::E4, Square::F6), None);
        assert_eq!(en_passant(&state, white, Square::E5, Square::G6), None);
        assert_eq!(en_passant(&state, white, Square::G5, Square::H6), None);
        assert_eq!(en_passant(&state, white, Square::D5, Square::F6), None);

        let state = after(black.rook(), Square::H7, Square::H5);
        assert_eq!(en_passant(&state, white, Square::G5, Square::H6), None);

        let state = after(black.pawn(), Square::F6, Square::F5);
        assert_eq!(en_passant(&state, white, Square::E5, Square::F6), None);

        let state = after(white.pawn(), Square::F2, Square::F4);
        assert_eq!(en_passant(&state, black, Square::E4, Square::F3), Some(Square::F4));

        let state = after(white.pawn(), Square::C2, Square::C4);
        assert_eq!(en_passant(&state, black, Square::D5, Square::C3), None);
        assert_eq!(en_passant(&state, black, Square::D4, Square::B3), None);
        assert_eq!(en_passant(&state, black, Square::B4, Square::A3), None);

        let state = after(white.rook(), Square::A2, Square::A4);
        assert_eq!(en_passant(&state, black, Square::B4, Square::A3), None);

        let state = after(white.pawn(), Square::C3, Square::C4);
        assert_eq!(en_passant(&state, black, Square::D4, Square::C3), None);

        // Own pawn double step.
        let state = after(white.pawn(), Square::F2, Square::F4);
        assert_eq!(en_passant(&state, white, Square::E5, Square::F6), None);
    }

    #[test]
    fn test_king_step() {
        let board = board(&[
            (Square::F2, Color::White.bishop()),
            (Square::D2, Color::Black.knight()),
        ]);
        let state = GameState::new();
        let king = Color::White.king();

        assert!(can_move(&board, &state, king, Square::E1, Square::E2, None));
        assert!(can_move(&board, &state, king, Square::E1, Square::D2, None));
        assert!(!can_move(&board, &state, king, Square::E1, Square::E2, Some(true)));
        assert!(!can_move(&board, &state, king, Square::E1, Square::F2, None));
        assert!(!can_move(&board, &state, king, Square::E1, Square::E3, None));
    }

    #[test]
    fn test_in_check_blocks_every_piece() {
        let start = Board::new();
        let state = GameState::new();

        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::G1, Square::F3),
            (Square::B1, Square::C3),
        ] {
            let piece = start.piece_at(from).expect("piece");
            assert!(can_move(&start, &state, piece, from, to, Some(false)));
            assert!(!can_move(&start, &state, piece, from, to, Some(true)));
        }

        let board = board(&[
            (Square::A1, Color::White.rook()),
            (Square::C1, Color::White.bishop()),
            (Square::D1, Color::White.queen()),
            (Square::E1, Color::White.king()),
        ]);
        for (from, to) in [
            (Square::A1, Square::A5),
            (Square::C1, Square::F4),
            (Square::D1, Square::D7),
            (Square::D1, Square::H5),
        ] {
            let piece = board.piece_at(from).expect("piece");
            assert!(can_move(&board, &state, piece, from, to, Some(false)));
            assert!(!can_move(&board, &state, piece, from, to, Some(true)));
        }
    }

    #[test]
    fn test_sliders_never_jump() {
        let board = board(&[
            (Square::D4, Color::White.queen()),
            (Square::D6, Color::Black.pawn()),
            (Square::F6, Color::White.pawn()),
        ]);
        for role in [Role::Rook, Role::Queen] {
            let piece = role.of(Color::White);
            assert!(!attacks(&board, piece, Square::D4, Square::D7));
            assert!(!attacks(&board, piece, Square::D4, Square::D8));
        }
        for role in [Role::Bishop, Role::Queen] {
            let piece = role.of(Color::White);
            assert!(!attacks(&board, piece, Square::D4, Square::G7));
        }
    }

    fn castling_board() -> Board {
        board(&[
            (Square::H1, Color::White.rook()),
            (Square::A1, Color::White.rook()),
            (Square::H8, Color::Black.rook()),
            (Square::A8, Color::Black.rook()),
            (Square::E1, Color::White.king()),
            (Square::E8, Color::Black.king()),
        ])
    }

    #[test]
    fn test_castle() {
        let board = castling_board();
        let state = GameState::new();
        let (white, black) = (Color::White, Color::Black);
        let (king_side, queen_side) = (Some(CastlingSide::KingSide), Some(CastlingSide::QueenSide));

        assert_eq!(castle(&board, &state, white, Square::E1, Square::H1), king_side);
        assert_eq!(castle(&board, &state, white, Square::E1, Square::C1), queen_side);
        assert_eq!(castle(&board, &state, black, Square::E8, Square::G8), king_side);
        assert_eq!(castle(&board, &state, black, Square::E8, Square::A8), queen_side);

        assert_eq!(castle(&board, &state, white, Square::E1, Square::B1), None);
        assert_eq!(castle(&board, &state, black, Square::E8, Square::B5), None);
        assert_eq!(castle(&board, &state, white, Square::F1, Square::H1), None);
        assert_eq!(castle(&board, &state, black, Square::F8, Square::H8), None);
    }

    #[test]
    fn test_castle_after_moves() {
        let board = castling_board();
        let (white, black) = (Color::White, Color::Black);

        let mut state = GameState::new();
        state.record_move(white.king(), Square::E1, Square::E2);
        assert_eq!(
            castling_violations(&board, &state, white, Square::E1, Square::G1),
            CastlingViolations::KING_MOVED
        );
        assert_eq!(castle(&board, &state, white, Square::E1, Square::C1), None);

        let mut state = GameState::new();
        state.record_move(black.rook(), Square::H8, Square::H7);
        assert_eq!(
            castling_violations(&board, &state, black, Square::E8, Square::H8),
            CastlingViolations::ROOK_MOVED
        );
        assert_eq!(
            castle(&board, &state, black, Square::E8, Square::A8),
            Some(CastlingSide::QueenSide)
        );
    }

    #[test]
    fn test_castle_violations() {
        let state = GameState::new();
        let (white, black) = (Color::White, Color::Black);
        let attacked = CastlingViolations::PATH_ATTACKED;
        let occupied = CastlingViolations::PATH_OCCUPIED;

        let cases = [
            (white, Square::H1, None, Square::G1, CastlingViolations::ROOK_MISSING),
            (black, Square::A8, None, Square::C8, CastlingViolations::ROOK_MISSING),
            (white, Square::C4, Some(black.bishop()), Square::H1, attacked),
            (black, Square::C5, Some(white.bishop()), Square::H8, attacked),
            (white, Square::D4, Some(black.bishop()), Square::H1, attacked),
            (white, Square::G4, Some(black.bishop()), Square::A1, attacked),
            (black, Square::F5, Some(white.bishop()), Square::A8, attacked),
            (white, Square::F1, Some(white.bishop()), Square::H1, occupied),
            (black, Square::F8, Some(black.bishop()), Square::G8, occupied),
            (white, Square::D1, Some(white.queen()), Square::A1, occupied),
            (white, Square::B1, Some(white.knight()), Square::C1, occupied),
            (white, Square::E4, Some(black.rook()), Square::G1, CastlingViolations::IN_CHECK),
        ];

        for (color, sq, occupant, to, expected) in cases {
            let board = castling_board().with(sq, occupant);
            let from = color.king_home();
            assert_eq!(
                castling_violations(&board, &state, color, from, to),
                expected,
                "{color} {sq} {to}"
            );
        }
    }
}
