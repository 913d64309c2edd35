use super::load_board;
use anyhow::Error as Anyhow;
use clap::Parser;
use deep_chess_core::{perft, perft_detailed, perft_divide};
use std::path::PathBuf;
use std::time::Instant;
use tracing::instrument;

/// Counts the nodes of the legal move tree.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// How many plies deep to count.
    depth: u8,

    /// Board state file to start from instead of the starting position.
    #[clap(short, long)]
    state: Option<PathBuf>,

    /// Show the node count below each root move.
    #[clap(short, long)]
    divide: bool,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let board = load_board(self.state.as_deref())?;

        println!("Running perft({})...", self.depth);

        if self.divide {
            let results = perft_divide(&board, self.depth);
            let mut total = 0;

            for (mv, count) in &results {
                println!("{}: {}", mv, count);
                total += count;
            }

            println!("\nTotal: {}", total);
        } else if self.depth <= 3 {
            let results = perft_detailed(&board, self.depth);

            println!("Nodes: {}", results.nodes);
            println!("Captures: {}", results.captures);
            println!("En passants: {}", results.en_passants);
            println!("Castles: {}", results.castles);
            println!("Promotions: {}", results.promotions);
            println!("Checks: {}", results.checks);
            println!("Checkmates: {}", results.checkmates);
        } else {
            let start = Instant::now();
            let nodes = perft(&board, self.depth);
            let elapsed = start.elapsed();

            println!("Nodes: {}", nodes);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
        }

        Ok(())
    }
}
