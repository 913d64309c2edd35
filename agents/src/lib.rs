pub mod config;
pub mod evaluation;
pub mod minimax;
pub mod random;
pub mod search;

use deep_chess_core::{Board, Move};

/// Core trait for chess agents
pub trait Agent {
    /// Picks a legal move for the side to move, or `None` if it has none.
    fn select(&mut self, board: &Board) -> Option<Move>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use config::{AgentConfig, ParseAgentConfigError};
pub use evaluation::*;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::*;
