//! Deciding a single move.
//!
//! [`evaluate_move`] runs one move attempt through these stages:
//!
//! 1. A pawn left waiting on its last rank is promoted first. The request
//!    is then only the promotion choice.
//! 2. The named piece must stand on the origin cell.
//! 3. With [`TurnOrder::Alternating`](crate::TurnOrder) a side may not move
//!    twice in a row.
//! 4. The piece rules decide the move, given whether the mover's king
//!    would be in check afterwards.
//! 5. While a king is in check, only the checked side may move, and only
//!    the king itself or a piece that captures the attacker or blocks its
//!    line.
//! 6. Check and checkmate are determined on the resulting board.

use core::fmt;

use tracing::debug;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    check,
    color::Color,
    errors::{InvalidMove, InvalidMoveKind},
    path::path_between,
    role::Role,
    rules,
    square::Square,
    state::{GameState, TurnOrder},
    types::Piece,
};

/// Modifiers sent along with a move.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct MoveFlags {
    /// The sender intends a castle.
    pub castle: bool,
    /// Role for a pawn reaching its last rank.
    pub promote_to: Option<Role>,
}

/// A decoded move attempt.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub flags: MoveFlags,
}

impl MoveRequest {
    pub const fn new(piece: Piece, from: Square, to: Square) -> MoveRequest {
        MoveRequest {
            from,
            to,
            piece,
            flags: MoveFlags {
                castle: false,
                promote_to: None,
            },
        }
    }

    #[must_use]
    pub const fn with_castle(mut self) -> MoveRequest {
        self.flags.castle = true;
        self
    }

    #[must_use]
    pub const fn with_promotion(mut self, role: Role) -> MoveRequest {
        self.flags.promote_to = Some(role);
        self
    }

    /// Decodes a transport message.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if a cell or the piece is missing, a cell
    /// label is malformed, the piece code is unknown, or the promotion
    /// choice is not a knight, bishop, rook or queen.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::{errors::InvalidMoveKind, Color, MoveRequest, RawMove, Square};
    ///
    /// let raw = RawMove::new("e2", "e4", "WP");
    /// let request = MoveRequest::from_raw(&raw)?;
    /// assert_eq!(request, MoveRequest::new(Color::White.pawn(), Square::E2, Square::E4));
    ///
    /// let raw = RawMove::new("1", "a", "WQ");
    /// assert_eq!(MoveRequest::from_raw(&raw).unwrap_err().kind(), InvalidMoveKind::BadCell);
    /// # Ok::<_, arbiter::errors::InvalidMove>(())
    /// ```
    pub fn from_raw(raw: &RawMove) -> Result<MoveRequest, InvalidMove> {
        let from = Square::from_ascii(required(&raw.old_cell)?.as_bytes())?;
        let to = Square::from_ascii(required(&raw.new_cell)?.as_bytes())?;
        let piece = Piece::from_ascii(required(&raw.piece_moved)?.as_bytes())?;
        let promote_to = match raw.pawn_promoted_to.as_deref() {
            None | Some("") => None,
            Some(code) => Some(promotion_from_ascii(code.as_bytes())?),
        };

        Ok(MoveRequest {
            from,
            to,
            piece,
            flags: MoveFlags {
                castle: raw.castle,
                promote_to,
            },
        })
    }
}

fn required(field: &Option<String>) -> Result<&str, InvalidMove> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(InvalidMove::new(InvalidMoveKind::MissingField)),
    }
}

/// Accepts a role letter (`Q`) or a full piece code (`WQ`).
fn promotion_from_ascii(code: &[u8]) -> Result<Role, InvalidMove> {
    let role = match *code {
        [role] => Role::from_char(role as char),
        [color, role] if Color::from_char(color as char).is_some() => Role::from_char(role as char),
        _ => None,
    };
    role.filter(|role| role.is_promotion_target())
        .ok_or(InvalidMove::new(InvalidMoveKind::UnknownPromotion))
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.piece, self.from, self.to)?;
        if let Some(role) = self.flags.promote_to {
            write!(f, "={}", role.char())?;
        }
        Ok(())
    }
}

/// How the client produced a message.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum EventType {
    /// A piece is being dragged. The move is only probed.
    #[default]
    Drag,
    /// A piece was dropped.
    DragEnd,
    /// A cell was clicked, or a promotion choice made.
    Click,
}

impl EventType {
    pub fn from_name(name: &str) -> Option<EventType> {
        Some(match name {
            "drag" => EventType::Drag,
            "dragend" => EventType::DragEnd,
            "click" => EventType::Click,
            _ => return None,
        })
    }

    /// Events that ask for the move to be played, not only checked.
    pub const fn commits(self) -> bool {
        matches!(self, EventType::DragEnd | EventType::Click)
    }
}

/// A move message as sent by the client, before decoding.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RawMove {
    pub old_cell: Option<String>,
    pub new_cell: Option<String>,
    pub piece_moved: Option<String>,
    pub event_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub castle: bool,
    pub pawn_promoted_to: Option<String>,
}

impl RawMove {
    pub fn new(old_cell: &str, new_cell: &str, piece_moved: &str) -> RawMove {
        RawMove {
            old_cell: Some(old_cell.to_owned()),
            new_cell: Some(new_cell.to_owned()),
            piece_moved: Some(piece_moved.to_owned()),
            ..RawMove::default()
        }
    }

    /// The event, or [`EventType::Drag`] if absent or unknown.
    pub fn event(&self) -> EventType {
        self.event_type
            .as_deref()
            .and_then(EventType::from_name)
            .unwrap_or_default()
    }

    /// The target cell, if it can be decoded.
    pub fn target(&self) -> Option<Square> {
        self.new_cell
            .as_deref()
            .and_then(|label| Square::from_ascii(label.as_bytes()).ok())
    }
}

/// The verdict on a move attempt.
///
/// Every attempt gets an outcome. An illegal move is `legal: false`,
/// never an error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct MoveOutcome {
    /// Whether the move may be played.
    #[cfg_attr(feature = "serde", serde(rename = "move_valid"))]
    pub legal: bool,
    /// For a legal move: the opponent's king is in check afterwards. For a
    /// rejected move: the mover's king is, or would be, in check.
    pub check: bool,
    pub checkmate: bool,
    /// The side that delivered checkmate.
    pub winner: Option<Color>,
    /// The target cell of the request. `None` only if it could not be
    /// decoded.
    pub processed_cell: Option<Square>,
    /// The move was an en passant capture.
    pub en_passant: bool,
}

impl MoveOutcome {
    pub const fn illegal(processed_cell: Option<Square>) -> MoveOutcome {
        MoveOutcome {
            legal: false,
            check: false,
            checkmate: false,
            winner: None,
            processed_cell,
            en_passant: false,
        }
    }

    const fn rejected_in_check(processed_cell: Option<Square>) -> MoveOutcome {
        MoveOutcome {
            check: true,
            ..MoveOutcome::illegal(processed_cell)
        }
    }
}

/// A legal move's resulting position.
pub(crate) struct Successor {
    pub board: Board,
    pub state: GameState,
}

/// Evaluates a move attempt. Neither the board nor the state is changed.
///
/// # Examples
///
/// ```
/// use arbiter::{evaluate_move, Board, Color, GameState, MoveRequest, Square};
///
/// let board = Board::new();
/// let state = GameState::new();
///
/// let outcome = evaluate_move(
///     &board,
///     &MoveRequest::new(Color::White.pawn(), Square::E2, Square::E4),
///     &state,
/// );
/// assert!(outcome.legal);
/// assert!(!outcome.check);
///
/// let outcome = evaluate_move(
///     &board,
///     &MoveRequest::new(Color::White.pawn(), Square::E2, Square::D3),
///     &state,
/// );
/// assert!(!outcome.legal);
/// ```
pub fn evaluate_move(board: &Board, request: &MoveRequest, state: &GameState) -> MoveOutcome {
    resolve(board, request, state).0
}

/// Decodes and evaluates a transport message. A message that cannot be
/// decoded is an illegal move.
pub fn evaluate_raw(board: &Board, raw: &RawMove, state: &GameState) -> MoveOutcome {
    match MoveRequest::from_raw(raw) {
        Ok(request) => evaluate_move(board, &request, state),
        Err(err) => {
            debug!(%err, "undecodable move");
            MoveOutcome::illegal(raw.target())
        }
    }
}

/// Evaluates a move attempt and, if it is legal, computes the board and
/// state after it.
pub(crate) fn resolve(
    board: &Board,
    request: &MoveRequest,
    state: &GameState,
) -> (MoveOutcome, Option<Successor>) {
    if let Some(sq) = board.promotion_pending() {
        return resolve_promotion(board, sq, request, state);
    }

    let MoveRequest {
        from,
        to,
        piece,
        flags,
    } = *request;
    let color = piece.color;
    let processed_cell = Some(to);

    if board.piece_at(from) != Some(piece) {
        debug!(%request, found = ?board.piece_at(from), "piece not on its cell");
        return (MoveOutcome::illegal(processed_cell), None);
    }

    if state.turn_order() == TurnOrder::Alternating && state.last_side_to_move() == Some(color) {
        debug!(%request, "not this side's turn");
        return (MoveOutcome::illegal(processed_cell), None);
    }

    let placed = Placement::of(board, state, request);

    let mut memo = state.checked_king();
    let mover_in_check = check::is_in_check(&placed.board, color, &mut memo, false);

    if !rules::can_move(board, state, piece, from, to, Some(mover_in_check)) {
        debug!(%request, mover_in_check, "move rejected");
        return (
            MoveOutcome {
                check: mover_in_check,
                ..MoveOutcome::illegal(processed_cell)
            },
            None,
        );
    }

    if flags.castle && placed.castle.is_none() {
        debug!(%request, "not a castle");
        return (MoveOutcome::illegal(processed_cell), None);
    }

    // Which king is in check before the move, and by what.
    let mut memo = state.checked_king();
    check::is_in_check(board, Color::White, &mut memo, true);
    if memo.is_none() {
        check::is_in_check(board, Color::Black, &mut memo, true);
    }

    if let Some(checked) = memo {
        if board.color_at(checked.attacker) == Some(color) {
            debug!(%request, king = %checked.king, "opponent must answer the check");
            return (MoveOutcome::rejected_in_check(processed_cell), None);
        }

        if piece != checked.king.king() {
            let answers = board.king_of(checked.king).is_some_and(|king_sq| {
                path_between(checked.attacker, king_sq)
                    .iter()
                    .any(|&sq| sq == to || Some(sq) == placed.en_passant)
            });
            if !answers {
                debug!(%request, attacker = %checked.attacker, "move ignores the check");
                return (MoveOutcome::rejected_in_check(processed_cell), None);
            }
        }
    }

    let en_passant = placed.en_passant.is_some();
    let after = placed.board;
    let mut next = state.clone();
    next.commit(&after, piece, from, to, en_passant);

    let check = check::attacker(&after, !color).is_some();
    let mated = Color::ALL.into_iter().find(|&king| {
        check::attacker(&after, king)
            .is_some_and(|attacker| check::is_checkmate(attacker, &after, king, &next))
    });

    let outcome = MoveOutcome {
        legal: true,
        check,
        checkmate: mated.is_some(),
        winner: mated.map(|king| !king),
        processed_cell,
        en_passant,
    };
    debug!(%request, check, checkmate = outcome.checkmate, en_passant, "move accepted");

    (
        outcome,
        Some(Successor {
            board: after,
            state: next,
        }),
    )
}

/// Replaces the pawn waiting on `sq` with the requested role.
fn resolve_promotion(
    board: &Board,
    sq: Square,
    request: &MoveRequest,
    state: &GameState,
) -> (MoveOutcome, Option<Successor>) {
    let processed_cell = Some(request.to);

    let (Some(pawn), Some(role)) = (
        board.piece_at(sq),
        request.flags.promote_to.filter(|role| role.is_promotion_target()),
    ) else {
        debug!(%sq, %request, "promotion pending");
        return (MoveOutcome::illegal(processed_cell), None);
    };

    let color = pawn.color;
    let after = board.with(sq, Some(role.of(color)));
    let mut next = state.clone();
    next.commit_promotion(&after, sq);

    let opponent = !color;
    let attacker = check::attacker(&after, opponent);
    let checkmate = attacker
        .is_some_and(|attacker| check::is_checkmate(attacker, &after, opponent, &next));
    debug!(%sq, %role, check = attacker.is_some(), checkmate, "pawn promoted");

    (
        MoveOutcome {
            legal: true,
            check: attacker.is_some(),
            checkmate,
            winner: checkmate.then_some(color),
            processed_cell,
            en_passant: false,
        },
        Some(Successor { board: after, state: next }),
    )
}

/// The board a move would produce, with its special effects.
struct Placement {
    board: Board,
    /// Cell of a pawn captured en passant.
    en_passant: Option<Square>,
    castle: Option<CastlingSide>,
}

impl Placement {
    fn of(board: &Board, state: &GameState, request: &MoveRequest) -> Placement {
        let MoveRequest {
            from,
            to,
            piece,
            flags,
        } = *request;
        let color = piece.color;

        let castle = if piece.is_king() && from.distance(to) > 1 {
            rules::castling_side(from, to)
        } else {
            None
        };
        let en_passant = if piece.role == Role::Pawn && board.is_empty_at(to) {
            rules::en_passant(state, color, from, to)
        } else {
            None
        };

        let mut after = board.clone();
        after.remove_piece_at(from);
        match castle {
            Some(side) => {
                after.remove_piece_at(side.rook_from(color));
                after.set_piece_at(side.king_to(color), piece);
                after.set_piece_at(side.rook_to(color), color.rook());
            }
            None => {
                let placed = match flags.promote_to {
                    Some(role)
                        if piece.role == Role::Pawn
                            && to.rank() == color.promotion_rank()
                            && role.is_promotion_target() =>
                    {
                        role.of(color)
                    }
                    _ => piece,
                };
                after.set_piece_at(to, placed);
            }
        }
        if let Some(captured) = en_passant {
            after.remove_piece_at(captured);
        }

        Placement {
            board: after,
            en_passant,
            castle,
        }
    }
}
