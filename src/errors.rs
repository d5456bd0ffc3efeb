use core::fmt;
use std::error::Error;

pub use crate::square::ParseSquareError;

/// Error when parsing an invalid piece code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePieceError;

impl fmt::Display for ParsePieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece code")
    }
}

impl Error for ParsePieceError {}

/// Reason a transport message could not be decoded into a
/// [`MoveRequest`](crate::MoveRequest).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum InvalidMoveKind {
    /// `oldCell`, `newCell` or `pieceMoved` is absent or empty.
    MissingField,
    /// A cell label is not a column `a`-`h` followed by a row `1`-`8`.
    BadCell,
    /// The piece code does not name a known color and role.
    UnknownPiece,
    /// The promotion choice is not a knight, bishop, rook or queen.
    UnknownPromotion,
}

/// Error when decoding a move request.
///
/// The engine never hands this to callers of
/// [`evaluate_raw`](crate::evaluate_raw): a message that cannot be decoded
/// is simply an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidMove {
    kind: InvalidMoveKind,
}

impl InvalidMove {
    pub(crate) const fn new(kind: InvalidMoveKind) -> InvalidMove {
        InvalidMove { kind }
    }

    pub const fn kind(&self) -> InvalidMoveKind {
        self.kind
    }
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            InvalidMoveKind::MissingField => "missing move field",
            InvalidMoveKind::BadCell => "invalid cell label in move",
            InvalidMoveKind::UnknownPiece => "unknown piece code in move",
            InvalidMoveKind::UnknownPromotion => "invalid promotion choice",
        })
    }
}

impl Error for InvalidMove {}

impl From<ParseSquareError> for InvalidMove {
    fn from(_: ParseSquareError) -> InvalidMove {
        InvalidMove::new(InvalidMoveKind::BadCell)
    }
}

impl From<ParsePieceError> for InvalidMove {
    fn from(_: ParsePieceError) -> InvalidMove {
        InvalidMove::new(InvalidMoveKind::UnknownPiece)
    }
}
