use crate::{search::search, Agent};
use deep_chess_core::{Board, Move};
use tracing::instrument;

/// Depth used when none is configured.
pub const DEFAULT_DEPTH: u8 = 2;

/// Plays the move with the best worst-case evaluation at a fixed depth.
pub struct MinimaxAgent {
    name: String,
    depth: u8,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            depth,
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    #[instrument(level = "debug", skip(self, board), fields(ply = board.ply(), depth = self.depth))]
    fn select(&mut self, board: &Board) -> Option<Move> {
        search(board, self.depth).best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
