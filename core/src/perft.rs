use crate::board::Board;
use crate::move_gen::{classify, legal_moves, Mate};
use crate::types::Move;
use std::ops::AddAssign;

/// Perft (performance test) results at each depth.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PerftResults {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl AddAssign for PerftResults {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passants += other.en_passants;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.checkmates += other.checkmates;
    }
}

/// Counts the leaf nodes of the legal move tree to the given depth.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, board.side_to_move());

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = board.clone();
            child.commit(mv);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Node counts below each legal move of the root position.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    legal_moves(board, board.side_to_move())
        .into_iter()
        .map(|mv| {
            let mut child = board.clone();
            child.commit(mv);
            (mv, perft(&child, depth.saturating_sub(1)))
        })
        .collect()
}

/// Performs a perft test, classifying the moves made at the last ply.
pub fn perft_detailed(board: &Board, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for mv in legal_moves(board, board.side_to_move()) {
        let mut child = board.clone();
        let made = child.commit(mv);

        if depth > 1 {
            results += perft_detailed(&child, depth - 1);
            continue;
        }

        results.nodes += 1;
        results.captures += u64::from(made.is_capture());
        results.en_passants += u64::from(made.en_passant);
        results.castles += u64::from(made.castle.is_some());
        results.promotions += u64::from(made.promoted);

        if made.check {
            results.checks += 1;
            if classify(&child, child.side_to_move()) == Mate::Checkmate {
                results.checkmates += 1;
            }
        }
    }

    results
}

/// Known node counts.
pub mod expected {
    /// Starting position perft values.
    pub const STARTING_POSITION: &[(u8, u64)] = &[(1, 20), (2, 400), (3, 8902), (4, 197_281)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_state::positions;

    #[test]
    fn test_perft_starting_position() {
        let board = Board::starting_position();

        // Only test depths 1-3 to avoid timeout
        for &(depth, expected) in &expected::STARTING_POSITION[..3] {
            let result = perft(&board, depth);
            assert_eq!(
                result, expected,
                "Perft({}) failed: expected {}, got {}",
                depth, expected, result
            );
        }
    }

    #[test]
    fn test_perft_divide() {
        let board = Board::starting_position();
        let results = perft_divide(&board, 1);

        assert_eq!(results.len(), 20);
        assert_eq!(results.iter().map(|(_, n)| n).sum::<u64>(), 20);
    }

    #[test]
    fn test_perft_detailed_depth_two() {
        let board = Board::starting_position();
        let results = perft_detailed(&board, 2);

        assert_eq!(results.nodes, 400);
        assert_eq!(results.captures, 0);
        assert_eq!(results.checks, 0);
    }

    #[test]
    fn test_perft_detailed_counts_castles() {
        let board: Board = positions::CASTLING.parse().unwrap();
        let results = perft_detailed(&board, 1);

        assert_eq!(results.castles, 2);
        assert_eq!(results.nodes, perft(&board, 1));
    }

    #[test]
    fn test_perft_on_a_mated_position_is_empty() {
        let board: Board = positions::BACK_RANK_MATE.parse().unwrap();
        assert_eq!(perft(&board, 1), 0);
        assert_eq!(perft(&board, 3), 0);
    }
}
