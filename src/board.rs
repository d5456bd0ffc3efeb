use core::fmt::{self, Write as _};

use crate::{
    color::Color,
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// Piece positions on a board.
///
/// Every one of the 64 cells always has an entry: either a [`Piece`] or
/// `None` for an empty cell.
///
/// # Examples
///
/// ```
/// use arbiter::{Board, Color, Square};
///
/// let board = Board::default();
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.piece_at(Square::E4), None);
///
/// assert_eq!(board.to_string(), concat!(
///     "r h b q k b h r\n",
///     "p p p p p p p p\n",
///     ". . . . . . . .\n",
///     ". . . . . . . .\n",
///     ". . . . . . . .\n",
///     ". . . . . . . .\n",
///     "P P P P P P P P\n",
///     "R H B Q K B H R\n",
/// ));
/// ```
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        let back = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        for color in Color::ALL {
            for (file, role) in File::ALL.into_iter().zip(back) {
                board.set_piece_at(Square::from_coords(file, color.backrank()), role.of(color));
                board.set_piece_at(Square::from_coords(file, color.pawn_rank()), color.pawn());
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_none()
    }

    /// Returns a copy of the board with `sq` set to `occupant`.
    #[must_use]
    pub fn with(&self, sq: Square, occupant: Option<Piece>) -> Board {
        let mut board = self.clone();
        board.cells[sq.index()] = occupant;
        board
    }

    /// Returns a copy of the board with the occupant of `from` moved to
    /// `to`, replacing whatever stood there.
    #[must_use]
    pub fn with_move(&self, from: Square, to: Square, piece: Piece) -> Board {
        self.with(from, None).with(to, Some(piece))
    }

    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.cells[sq.index()] = Some(piece);
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Finds the first cell holding `piece`, scanning `a1`, `b1`, ...,
    /// `h8`.
    ///
    /// Used to locate kings. Callers keep at most one king per color on
    /// the board.
    pub fn find(&self, piece: Piece) -> Option<Square> {
        self.pieces()
            .find(|&(_, p)| p == piece)
            .map(|(sq, _)| sq)
    }

    #[inline]
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.find(color.king())
    }

    /// Iterates over all occupied cells, `a1` to `h8`.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the cells occupied by `color`.
    pub fn by_color(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Iterates over every cell with its occupant.
    pub fn cells(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |sq| (sq, self.piece_at(sq)))
    }

    /// Finds a pawn waiting on its promotion rank: a white pawn on rank 8
    /// (files `a` to `h`) is reported before a black pawn on rank 1.
    pub fn promotion_pending(&self) -> Option<Square> {
        Color::ALL.into_iter().find_map(|color| {
            File::ALL
                .into_iter()
                .map(|file| Square::from_coords(file, color.promotion_rank()))
                .find(|&sq| self.piece_at(sq) == Some(color.pawn()))
        })
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let sq = Square::from_coords(file, rank);
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        fmt::Display::fmt(self, f)
    }
}

impl FromIterator<(Square, Piece)> for Board {
    fn from_iter<T>(iter: T) -> Board
    where
        T: IntoIterator<Item = (Square, Piece)>,
    {
        let mut board = Board::empty();
        for (sq, piece) in iter {
            board.set_piece_at(sq, piece);
        }
        board
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap as _;

        let mut map = serializer.serialize_map(Some(64))?;
        for (sq, occupant) in self.cells() {
            match occupant {
                Some(piece) => map.serialize_entry(&sq, &piece)?,
                None => map.serialize_entry(&sq, crate::types::EMPTY)?,
            }
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Board, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BoardVisitor;

        impl<'de> serde::de::Visitor<'de> for BoardVisitor {
            type Value = Board;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map from all 64 cell labels to piece codes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Board, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut board = Board::empty();
                let mut seen = [false; 64];
                while let Some((sq, code)) = access.next_entry::<Square, String>()? {
                    let occupant = crate::types::occupant_from_ascii(code.as_bytes())
                        .map_err(serde::de::Error::custom)?;
                    board.cells[sq.index()] = occupant;
                    seen[sq.index()] = true;
                }
                if let Some(missing) = Square::all().find(|sq| !seen[sq.index()]) {
                    return Err(serde::de::Error::custom(format_args!(
                        "missing cell {missing}"
                    )));
                }
                Ok(board)
            }
        }

        deserializer.deserialize_map(BoardVisitor)
    }
}
