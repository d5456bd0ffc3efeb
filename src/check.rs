//! Check and checkmate detection.

use tracing::trace;

use crate::{
    board::Board,
    color::Color,
    path::path_between,
    rules,
    square::Square,
    state::{CheckedKing, GameState},
};

/// Finds the first enemy piece attacking the king of `king`, scanning `a1`
/// to `h8`.
///
/// Returns `None` if there is no such king on the board.
///
/// # Examples
///
/// ```
/// use arbiter::{check, Board, Color, Square};
///
/// let board: Board = [
///     (Square::E1, Color::White.king()),
///     (Square::E7, Color::Black.rook()),
/// ].into_iter().collect();
///
/// assert_eq!(check::attacker(&board, Color::White), Some(Square::E7));
/// assert_eq!(check::attacker(&board, Color::Black), None);
/// ```
pub fn attacker(board: &Board, king: Color) -> Option<Square> {
    let target = board.king_of(king)?;
    board
        .by_color(!king)
        .find(|&(sq, piece)| rules::attacks(board, piece, sq, target))
        .map(|(sq, _)| sq)
}

/// Tests whether the king of `king` is in check.
///
/// If `memo` already names a checked king, that king is tested instead of
/// `king`. With `record` set, the memo is updated: the first attacker found
/// is stored, and a king that is no longer attacked is forgotten.
pub fn is_in_check(
    board: &Board,
    king: Color,
    memo: &mut Option<CheckedKing>,
    record: bool,
) -> bool {
    let king = match *memo {
        Some(checked) => {
            trace!(requested = %king, memoized = %checked.king, "testing memoized king");
            checked.king
        }
        None => king,
    };

    let found = attacker(board, king);
    if record {
        *memo = found.map(|attacker| CheckedKing { king, attacker });
    }
    found.is_some()
}

/// Tests whether the king of `king`, attacked from `attack_from`, is
/// checkmated.
///
/// The check is escaped if an allied piece other than the king can move to
/// a cell on the path from the attacker to the king (capturing the
/// attacker or blocking the line), or if the king can step to an adjacent
/// cell where it is not attacked.
///
/// Returns `false` if the king is missing or not in check.
///
/// # Examples
///
/// ```
/// use arbiter::{check, Board, Color, GameState, Square};
///
/// let board: Board = [
///     (Square::E1, Color::White.king()),
///     (Square::D7, Color::Black.rook()),
///     (Square::E7, Color::Black.rook()),
///     (Square::F7, Color::Black.rook()),
/// ].into_iter().collect();
///
/// let state = GameState::new();
/// assert!(check::is_checkmate(Square::E7, &board, Color::White, &state));
///
/// // A rook that can interpose breaks the mate.
/// let board = board.with(Square::H2, Some(Color::White.rook()));
/// assert!(!check::is_checkmate(Square::E7, &board, Color::White, &state));
/// ```
pub fn is_checkmate(attack_from: Square, board: &Board, king: Color, state: &GameState) -> bool {
    let Some(king_sq) = board.king_of(king) else {
        return false;
    };
    if attacker(board, king).is_none() {
        return false;
    }

    for cell in path_between(attack_from, king_sq) {
        let defender = board
            .by_color(king)
            .filter(|(_, piece)| !piece.is_king())
            .find(|&(sq, piece)| rules::can_move(board, state, piece, sq, cell, None));
        if let Some((sq, piece)) = defender {
            trace!(%piece, from = %sq, to = %cell, "check can be answered");
            return false;
        }
    }

    let king_piece = king.king();
    for (df, dr) in rules::KING_STEPS {
        let Some(to) = king_sq.offset(df, dr) else {
            continue;
        };
        if rules::king_step(board, king, king_sq, to)
            && attacker(&board.with_move(king_sq, to, king_piece), king).is_none()
        {
            trace!(from = %king_sq, %to, "king can escape");
            return false;
        }
    }

    true
}
