//! A chess rules arbiter: decides whether a proposed move is legal, and
//! whether it gives check or checkmate.
//!
//! The arbiter does no I/O and owns no game. Callers pass in the [`Board`],
//! the [`MoveRequest`] and the [`GameState`], and get a [`MoveOutcome`]
//! back for every attempt, legal or not.
//!
//! # Examples
//!
//! Evaluate a move without playing it:
//!
//! ```
//! use arbiter::{evaluate_move, Board, Color, GameState, MoveRequest, Square};
//!
//! let board = Board::new();
//! let state = GameState::new();
//!
//! let e4 = MoveRequest::new(Color::White.pawn(), Square::E2, Square::E4);
//! assert!(evaluate_move(&board, &e4, &state).legal);
//! ```
//!
//! Play a game:
//!
//! ```
//! use arbiter::{Color, Game, MoveRequest, Square};
//!
//! let mut game = Game::new();
//! for (piece, from, to) in [
//!     (Color::White.pawn(), Square::F2, Square::F3),
//!     (Color::Black.pawn(), Square::E7, Square::E5),
//!     (Color::White.pawn(), Square::G2, Square::G4),
//! ] {
//!     assert!(game.play(&MoveRequest::new(piece, from, to)).legal);
//! }
//!
//! let outcome = game.play(&MoveRequest::new(Color::Black.queen(), Square::D8, Square::H4));
//! assert!(outcome.checkmate);
//! assert_eq!(outcome.winner, Some(Color::Black));
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   cells, pieces, boards and the move messages exchanged with clients.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for fuzzing.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod engine;
mod game;
mod path;
mod role;
mod square;
mod state;
mod types;

pub mod board;
pub mod check;
pub mod errors;
pub mod rules;

pub use board::Board;
pub use castling_side::{ByCastlingSide, CastlingSide};
pub use check::{is_checkmate, is_in_check};
pub use color::{ByColor, Color, ParseColorError};
pub use engine::{
    evaluate_move, evaluate_raw, EventType, MoveFlags, MoveOutcome, MoveRequest, RawMove,
};
pub use game::Game;
pub use path::{path_between, Path};
pub use role::Role;
pub use rules::CastlingViolations;
pub use square::{File, ParseSquareError, Rank, Square};
pub use state::{CheckedKing, GameState, LastMove, TurnOrder};
pub use types::{occupant_from_ascii, Piece};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
