use tracing::{debug, info};

use crate::{
    board::Board,
    engine::{self, evaluate_move, MoveOutcome, MoveRequest, RawMove, Successor},
    state::{GameState, TurnOrder},
};

/// A game in progress: the board and the state that goes with it.
///
/// Moves are applied one at a time through `&mut self`. When a move
/// delivers checkmate the game starts over from the initial position.
///
/// # Examples
///
/// ```
/// use arbiter::{Color, Game, MoveRequest, Square};
///
/// let mut game = Game::new();
///
/// let outcome = game.play(&MoveRequest::new(Color::White.pawn(), Square::E2, Square::E4));
/// assert!(outcome.legal);
/// assert_eq!(game.board().piece_at(Square::E4), Some(Color::White.pawn()));
///
/// // An illegal move leaves the game untouched.
/// let outcome = game.play(&MoveRequest::new(Color::Black.rook(), Square::A8, Square::A5));
/// assert!(!outcome.legal);
/// assert_eq!(game.board().piece_at(Square::A8), Some(Color::Black.rook()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Game {
    board: Board,
    state: GameState,
}

impl Game {
    pub fn new() -> Game {
        Game::default()
    }

    pub fn with_turn_order(turn_order: TurnOrder) -> Game {
        Game {
            board: Board::new(),
            state: GameState::new().with_turn_order(turn_order),
        }
    }

    /// Continues a game from an existing position.
    pub fn from_parts(board: Board, state: GameState) -> Game {
        Game { board, state }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Evaluates the move and applies it if it is legal.
    pub fn play(&mut self, request: &MoveRequest) -> MoveOutcome {
        let (outcome, successor) = engine::resolve(&self.board, request, &self.state);

        if let Some(Successor { board, state }) = successor {
            if outcome.checkmate {
                info!(winner = ?outcome.winner, "checkmate");
                self.reset();
            } else {
                self.board = board;
                self.state = state;
            }
        }

        outcome
    }

    /// Handles a client message. Only drops and clicks are played, drags
    /// are evaluated without changing the game.
    pub fn handle(&mut self, raw: &RawMove) -> MoveOutcome {
        let request = match MoveRequest::from_raw(raw) {
            Ok(request) => request,
            Err(err) => {
                debug!(%err, "undecodable move");
                return MoveOutcome::illegal(raw.target());
            }
        };

        if raw.event().commits() {
            self.play(&request)
        } else {
            evaluate_move(&self.board, &request, &self.state)
        }
    }

    /// Starts a new game from the initial position.
    pub fn reset(&mut self) {
        debug!("new game");
        self.board = Board::new();
        self.state.reset();
    }
}
