#![no_main]

use arbiter::{evaluate_move, Board, GameState, MoveRequest, Piece, Square, TurnOrder};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    board: Board,
    request: MoveRequest,
    last: Option<(Piece, Square, Square)>,
    alternating: bool,
}

fuzz_target!(|data: Data| {
    let turn_order = if data.alternating {
        TurnOrder::Alternating
    } else {
        TurnOrder::Free
    };
    let mut state = GameState::new().with_turn_order(turn_order);
    if let Some((piece, from, to)) = data.last {
        state.commit(&data.board, piece, from, to, false);
    }

    let board = data.board.clone();
    let before = state.clone();

    let outcome = evaluate_move(&data.board, &data.request, &state);
    assert_eq!(data.board, board);
    assert_eq!(state, before);

    assert!(outcome.legal || !outcome.checkmate);
    assert_eq!(outcome.winner.is_some(), outcome.checkmate);
    assert_eq!(outcome.processed_cell, Some(data.request.to));
});
