use core::{fmt, str::FromStr};

use crate::{color::Color, errors::ParsePieceError, role::Role};

/// A piece with [`Color`] and [`Role`].
///
/// On the wire a piece is a two-letter code: the color (`W` or `B`)
/// followed by the role letter, e.g. `WK` or `BH`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// Parses a wire piece code.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::{Color, Piece, Role};
    ///
    /// assert_eq!(Piece::from_ascii(b"BH"), Ok(Role::Knight.of(Color::Black)));
    /// assert!(Piece::from_ascii(b"WE").is_err());
    /// assert!(Piece::from_ascii(b"empty").is_err());
    /// ```
    pub fn from_ascii(code: &[u8]) -> Result<Piece, ParsePieceError> {
        match *code {
            [color, role] => match (
                Color::from_char(color as char),
                Role::from_char(role as char),
            ) {
                (Some(color), Some(role)) => Ok(role.of(color)),
                _ => Err(ParsePieceError),
            },
            _ => Err(ParsePieceError),
        }
    }

    /// Lower case for black, upper case for white, as in board diagrams.
    pub fn char(self) -> char {
        self.color
            .fold_wb(self.role.char(), self.role.char().to_ascii_lowercase())
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.role == Role::King
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Piece, ParsePieceError> {
        Piece::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.role.char())
    }
}

/// Wire code for a vacant cell.
pub const EMPTY: &str = "empty";

/// Parses the wire representation of a cell's occupant: a piece code or
/// `empty`.
///
/// # Examples
///
/// ```
/// use arbiter::{occupant_from_ascii, Color};
///
/// assert_eq!(occupant_from_ascii(b"empty"), Ok(None));
/// assert_eq!(occupant_from_ascii(b"WQ"), Ok(Some(Color::White.queen())));
/// ```
pub fn occupant_from_ascii(code: &[u8]) -> Result<Option<Piece>, ParsePieceError> {
    if code == EMPTY.as_bytes() {
        Ok(None)
    } else {
        Piece::from_ascii(code).map(Some)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Piece, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = <String as serde::Deserialize>::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_codes() {
        assert_eq!("WK".parse::<Piece>(), Ok(Color::White.king()));
        assert_eq!("BP".parse::<Piece>(), Ok(Color::Black.pawn()));
        assert_eq!(Color::Black.knight().to_string(), "BH");
        for bad in ["", "W", "WKK", "XK", "wk", "WE"] {
            assert!(bad.parse::<Piece>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_diagram_char() {
        assert_eq!(Color::White.rook().char(), 'R');
        assert_eq!(Color::Black.rook().char(), 'r');
    }
}
