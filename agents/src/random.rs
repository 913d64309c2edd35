use crate::Agent;
use deep_chess_core::{legal_moves, Board, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::instrument;

/// Plays a uniformly random legal move.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A random agent that always plays the same game for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            name: format!("Random(seed={})", seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    #[instrument(level = "debug", skip(self, board), fields(ply = board.ply()))]
    fn select(&mut self, board: &Board) -> Option<Move> {
        let moves = legal_moves(board, board.side_to_move());
        moves.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deep_chess_core::positions;

    #[test]
    fn test_random_moves_are_legal() {
        let board = Board::starting_position();
        let legal = legal_moves(&board, board.side_to_move());
        let mut agent = RandomAgent::new();

        for _ in 0..128 {
            let mv = agent.select(&board).unwrap();
            assert!(legal.contains(&mv), "{mv} is not legal");
        }
    }

    #[test]
    fn test_seeded_agents_agree() {
        let board = Board::starting_position();
        let mut a = RandomAgent::with_seed(7);
        let mut b = RandomAgent::with_seed(7);

        for _ in 0..16 {
            assert_eq!(a.select(&board), b.select(&board));
        }
    }

    #[test]
    fn test_no_move_when_mated() {
        let board: Board = positions::BACK_RANK_MATE.parse().unwrap();
        assert_eq!(RandomAgent::new().select(&board), None);
    }
}
