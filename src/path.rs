//! Lines between cells.
//!
//! # Examples
//!
//! ```
//! use arbiter::{path_between, Square};
//!
//! // Rook on a1 checking a king on a4: the check can be answered on any
//! // of these cells.
//! let path = path_between(Square::A1, Square::A4);
//! assert_eq!(path.as_slice(), &[Square::A1, Square::A2, Square::A3]);
//!
//! // A knight's check can only be answered by capturing the knight.
//! let path = path_between(Square::G1, Square::F3);
//! assert_eq!(path.as_slice(), &[Square::G1]);
//! ```

use arrayvec::ArrayVec;

use crate::square::Square;

/// Cells from an attacker up to, but excluding, its target.
pub type Path = ArrayVec<Square, 8>;

/// Unit step from `a` toward `b` if the two cells share a rank, file or
/// diagonal.
pub fn direction(a: Square, b: Square) -> Option<(i32, i32)> {
    let (df, dr) = a.delta(b);
    if (df, dr) == (0, 0) {
        None
    } else if df == 0 || dr == 0 || df.abs() == dr.abs() {
        Some((df.signum(), dr.signum()))
    } else {
        None
    }
}

/// Checks whether `a` and `b` are a knight's jump apart.
pub fn is_knight_jump(a: Square, b: Square) -> bool {
    let (df, dr) = a.delta(b);
    matches!((df.abs(), dr.abs()), (1, 2) | (2, 1))
}

/// Iterates over the cells strictly between `a` and `b`.
///
/// Empty if the cells are adjacent or not on a common line.
pub fn between(a: Square, b: Square) -> impl Iterator<Item = Square> {
    let step = direction(a, b);
    let mut current = a;
    core::iter::from_fn(move || {
        let (df, dr) = step?;
        current = current.offset(df, dr)?;
        (current != b).then_some(current)
    })
}

/// Computes the path from `start` toward `end`, including `start` and
/// excluding `end`.
///
/// A knight's jump has no interior, so the path is just `start`. So is the
/// path between cells that do not share a line.
pub fn path_between(start: Square, end: Square) -> Path {
    let mut path = Path::new();
    path.push(start);
    if !is_knight_jump(start, end) {
        path.extend(between(start, end));
    }
    path
}
