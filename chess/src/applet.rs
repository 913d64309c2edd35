use anyhow::{Context, Error as Anyhow};
use clap::Subcommand;
use deep_chess_core::Board;
use derive_more::From;
use std::path::Path;

mod eval;
mod perft;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Perft(perft::Perft),
    Eval(eval::Eval),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => a.execute(),
            Applet::Perft(a) => a.execute(),
            Applet::Eval(a) => a.execute(),
        }
    }
}

/// Reads the board state from a file, or sets up a new game.
fn load_board(path: Option<&Path>) -> Result<Board, Anyhow> {
    match path {
        Some(path) => Board::load(path)
            .with_context(|| format!("failed to load board state from `{}`", path.display())),
        None => Ok(Board::starting_position()),
    }
}
