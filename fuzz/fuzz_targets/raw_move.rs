#![no_main]

use arbiter::{evaluate_raw, Board, GameState, MoveRequest, RawMove};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|raw: RawMove| {
    let outcome = evaluate_raw(&Board::new(), &raw, &GameState::new());
    if MoveRequest::from_raw(&raw).is_err() {
        assert!(!outcome.legal);
    }
    if outcome.legal {
        assert_eq!(outcome.processed_cell, raw.target());
    }
});
