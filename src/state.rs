use tracing::debug;

use crate::{
    board::Board,
    castling_side::{ByCastlingSide, CastlingSide},
    check,
    color::{ByColor, Color},
    role::Role,
    square::Square,
    types::Piece,
};

/// The most recently committed move, as needed for en passant.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct LastMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

impl LastMove {
    /// Checks whether this was a pawn advancing two rows.
    pub fn is_double_step(&self) -> bool {
        let (df, dr) = self.from.delta(self.to);
        self.piece.role == Role::Pawn && df == 0 && dr == 2 * self.piece.color.pawn_direction()
    }
}

/// A king known to be in check, and the cell of the piece giving check.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct CheckedKing {
    pub king: Color,
    pub attacker: Square,
}

/// Whether the two sides must take turns.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum TurnOrder {
    /// Either side may move at any time.
    #[default]
    Free,
    /// A side may not move twice in a row.
    Alternating,
}

/// Everything besides the board that the rules depend on.
///
/// One `GameState` belongs to exactly one game. It is read by every
/// evaluation and changed only by [`GameState::commit`] after a move was
/// accepted, and by [`GameState::reset`] when a new game starts.
///
/// # Examples
///
/// ```
/// use arbiter::{CastlingSide, Color, GameState, Square};
///
/// let mut state = GameState::default();
/// assert!(state.castling_rights(Color::White, CastlingSide::KingSide));
///
/// state.record_move(Color::White.rook(), Square::H1, Square::H3);
/// assert!(!state.castling_rights(Color::White, CastlingSide::KingSide));
/// assert!(state.castling_rights(Color::White, CastlingSide::QueenSide));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct GameState {
    last_moved: Option<LastMove>,
    king_moves: ByColor<u32>,
    rook_moves: ByColor<ByCastlingSide<u32>>,
    checked_king: Option<CheckedKing>,
    en_passant: bool,
    last_side_to_move: Option<Color>,
    turn_order: TurnOrder,
}

impl GameState {
    pub fn new() -> GameState {
        GameState::default()
    }

    #[must_use]
    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> GameState {
        self.turn_order = turn_order;
        self
    }

    pub fn last_moved(&self) -> Option<LastMove> {
        self.last_moved
    }

    pub fn set_last_moved(&mut self, last_moved: Option<LastMove>) {
        self.last_moved = last_moved;
    }

    pub fn king_moves(&self, color: Color) -> u32 {
        self.king_moves[color]
    }

    pub fn rook_moves(&self, color: Color, side: CastlingSide) -> u32 {
        self.rook_moves[color][side]
    }

    /// Checks that neither the king nor the rook of `side` has moved.
    pub fn castling_rights(&self, color: Color, side: CastlingSide) -> bool {
        self.king_moves(color) == 0 && self.rook_moves(color, side) == 0
    }

    pub fn checked_king(&self) -> Option<CheckedKing> {
        self.checked_king
    }

    pub fn set_checked_king(&mut self, checked_king: Option<CheckedKing>) {
        self.checked_king = checked_king;
    }

    /// Whether the last committed move was an en passant capture.
    pub fn en_passant(&self) -> bool {
        self.en_passant
    }

    pub fn last_side_to_move(&self) -> Option<Color> {
        self.last_side_to_move
    }

    pub fn turn_order(&self) -> TurnOrder {
        self.turn_order
    }

    /// Updates the castling bookkeeping for a move of `piece`.
    ///
    /// A rook leaving a corner forfeits castling on that corner's side. The
    /// corner decides which counter is bumped. Any king move forfeits both
    /// sides for its color.
    pub fn record_move(&mut self, piece: Piece, from: Square, to: Square) {
        match piece.role {
            Role::Rook => {
                let corner = Color::ALL.into_iter().find_map(|color| {
                    CastlingSide::ALL
                        .into_iter()
                        .find(|side| side.rook_from(color) == from)
                        .map(|side| (color, side))
                });
                if let Some((color, side)) = corner {
                    self.rook_moves[color][side] += 1;
                }
            }
            Role::King => self.king_moves[piece.color] += 1,
            _ => (),
        }
        self.last_moved = Some(LastMove { piece, from, to });
    }

    /// Records an accepted move.
    ///
    /// `after` is the board once the move has been applied. The memo of
    /// which king is in check is refreshed from it.
    pub fn commit(
        &mut self,
        after: &Board,
        piece: Piece,
        from: Square,
        to: Square,
        en_passant: bool,
    ) {
        self.record_move(piece, from, to);
        self.en_passant = en_passant;
        self.last_side_to_move = Some(piece.color);
        self.refresh_check(after);
    }

    /// Records that the pawn waiting on `sq` was promoted. `after` is the
    /// board with the promoted piece in place.
    pub fn commit_promotion(&mut self, after: &Board, sq: Square) {
        debug!(%sq, "promotion committed");
        self.en_passant = false;
        self.refresh_check(after);
    }

    fn refresh_check(&mut self, after: &Board) {
        self.checked_king = Color::ALL.into_iter().find_map(|king| {
            check::attacker(after, king).map(|attacker| CheckedKing { king, attacker })
        });
        if let Some(checked) = self.checked_king {
            debug!(king = %checked.king, attacker = %checked.attacker, "king in check");
        }
    }

    /// Forgets everything about the previous game. The turn order is kept.
    pub fn reset(&mut self) {
        *self = GameState::default().with_turn_order(self.turn_order);
    }
}
