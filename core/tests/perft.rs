use deep_chess_core::{perft, perft_detailed, positions, Board};
use test_strategy::proptest;

#[proptest(cases = 1)]
fn perft_expands_expected_number_of_nodes() {
    let board = Board::starting_position();
    assert_eq!(perft(&board, 1), 20);
    assert_eq!(perft(&board, 2), 400);
    assert_eq!(perft(&board, 3), 8902);

    let board: Board = positions::STARTING.parse()?;
    assert_eq!(perft(&board, 3), 8902);
}

#[test]
fn perft_counts_checks_and_captures() {
    let results = perft_detailed(&Board::starting_position(), 3);

    assert_eq!(results.nodes, 8902);
    assert_eq!(results.captures, 34);
    assert_eq!(results.checks, 12);
    assert_eq!(results.checkmates, 0);
}
