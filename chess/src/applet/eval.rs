use super::load_board;
use crate::view::draw_board;
use anyhow::Error as Anyhow;
use clap::Parser;
use deep_chess_agents::{evaluate, minimax::DEFAULT_DEPTH, search};
use deep_chess_core::SquareSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::instrument;

/// Evaluates a position and shows the move the minimax agent would play.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Eval {
    /// Board state file to evaluate instead of the starting position.
    #[clap(short, long)]
    state: Option<PathBuf>,

    /// How many plies the search looks ahead.
    #[clap(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,
}

impl Eval {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let board = load_board(self.state.as_deref())?;
        let side = board.side_to_move();

        let mut stdout = io::stdout().lock();
        draw_board(&mut stdout, &board, None, SquareSet::EMPTY)?;

        let score = evaluate(&board, side);
        writeln!(stdout, "Evaluation: {:.2} (from {}'s perspective)", score, side)?;

        let start = Instant::now();
        let result = search(&board, self.depth);
        let elapsed = start.elapsed();

        match result.best_move {
            Some(mv) => {
                writeln!(stdout, "\nBest move: {}", mv)?;
                writeln!(stdout, "Score: {:.2}", result.score)?;
                writeln!(stdout, "Depth: {}", result.depth)?;
                writeln!(stdout, "Nodes: {}", result.nodes)?;
                writeln!(stdout, "Time: {:.2}s", elapsed.as_secs_f64())?;
            }
            None => writeln!(stdout, "No legal moves available")?,
        }

        Ok(())
    }
}
