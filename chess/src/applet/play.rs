use super::load_board;
use crate::{
    game::{Game, Seat},
    log::GameLog,
};
use anyhow::Error as Anyhow;
use clap::Parser;
use deep_chess_core::Color;
use std::io;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Plays a game on the terminal.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// Who plays White: `human` or an agent such as `minimax(depth: 3)`.
    #[clap(short, long, default_value = "human")]
    white: Seat,

    /// Who plays Black: `human` or an agent such as `random(seed: 7)`.
    #[clap(short, long, default_value = "minimax(depth: 2)")]
    black: Seat,

    /// Board state file to resume from instead of the starting position.
    #[clap(short, long)]
    state: Option<PathBuf>,

    /// File the move log is appended to when the game ends.
    #[clap(short, long)]
    log: Option<PathBuf>,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            white: Seat::Human,
            black: Seat::Agent(Default::default()),
            state: None,
            log: None,
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let board = load_board(self.state.as_deref())?;
        let mut game = Game::new(board, self.white, self.black, GameLog::new(self.log));

        let outcome = game.run(&mut io::stdin().lock(), &mut io::stdout().lock())?;

        let board = game.board();
        info!(
            ?outcome,
            plies = board.ply(),
            white = board.player(Color::White).score(),
            black = board.player(Color::Black).score(),
            "game over"
        );

        Ok(())
    }
}
