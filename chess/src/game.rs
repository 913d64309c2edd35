use crate::{log::GameLog, view::draw_board};
use anyhow::{Context, Error as Anyhow};
use deep_chess_agents::{Agent, AgentConfig, ParseAgentConfigError};
use deep_chess_core::{
    legal_destinations, Board, Color, Move, MoveResult, Outcome, Square, SquareSet,
};
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// Who makes the moves for one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seat {
    Human,
    Agent(AgentConfig),
}

impl FromStr for Seat {
    type Err = ParseAgentConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "human" => Ok(Seat::Human),
            config => Ok(Seat::Agent(config.parse()?)),
        }
    }
}

enum Controller {
    Human,
    Agent(Box<dyn Agent>),
}

impl From<Seat> for Controller {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::Human => Controller::Human,
            Seat::Agent(config) => Controller::Agent(config.build()),
        }
    }
}

const HELP: &str = "\
Commands:
  e2e4        move the piece on e2 to e4
  moves e2    show where the piece on e2 can go
  save <file> write the board state to a file
  quit        leave the game
  help        show this message";

/// A game between two seats, played on a terminal.
pub struct Game {
    board: Board,
    controllers: [Controller; 2],
    log: GameLog,
    last: Option<MoveResult>,
}

impl Game {
    pub fn new(board: Board, white: Seat, black: Seat, log: GameLog) -> Self {
        Game {
            board,
            controllers: [white.into(), black.into()],
            log,
            last: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// Plays until the game ends or a human quits, returning the outcome if there is one.
    ///
    /// The moves played so far are written to the game log even if the game fails.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<Outcome>, Anyhow> {
        let played = self.play_out(input, out);
        let flushed = self.log.flush().context("failed to write the game log");

        let outcome = played?;
        flushed?;
        Ok(outcome)
    }

    fn play_out<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<Outcome>, Anyhow> {
        let mut highlight = SquareSet::EMPTY;

        loop {
            draw_board(out, &self.board, self.last.as_ref(), highlight)?;
            highlight = SquareSet::EMPTY;

            if let Some(outcome) = self.board.outcome() {
                writeln!(out, "{}", outcome)?;
                info!(%outcome);
                self.log.record(outcome.to_string());
                return Ok(Some(outcome));
            }

            let side = self.board.side_to_move();
            let controller = match side {
                Color::White => &mut self.controllers[0],
                Color::Black => &mut self.controllers[1],
            };

            let mv = match controller {
                Controller::Agent(agent) => {
                    let mv = agent
                        .select(&self.board)
                        .with_context(|| format!("{} found no move for {}", agent.name(), side))?;
                    writeln!(out, "{} plays {}", agent.name(), mv)?;
                    mv
                }

                Controller::Human => {
                    write!(out, "{} to move> ", side)?;
                    out.flush()?;

                    let mut line = String::new();
                    if input.read_line(&mut line)? == 0 {
                        return Ok(None);
                    }

                    match Command::parse(&line) {
                        Some(Command::Play(mv)) => mv,
                        Some(Command::Moves(square)) => {
                            highlight = destinations(&self.board, square);
                            if highlight.is_empty() {
                                writeln!(out, "No moves from {}", square)?;
                            }
                            continue;
                        }
                        Some(Command::Save(path)) => {
                            match self.board.save(Path::new(path)) {
                                Ok(()) => writeln!(out, "Saved to {}", path)?,
                                Err(e) => writeln!(out, "Could not save: {}", e)?,
                            }
                            continue;
                        }
                        Some(Command::Quit) => return Ok(None),
                        Some(Command::Help) | None => {
                            writeln!(out, "{}", HELP)?;
                            continue;
                        }
                    }
                }
            };

            match self.board.play(mv) {
                Some(result) => {
                    info!(line = %result.log_line());
                    self.log.record(result.log_line());
                    self.last = Some(result);
                }

                None => {
                    warn!(%mv, "rejected illegal move");
                    writeln!(out, "Illegal move: {}", mv)?;
                    if matches!(controller, Controller::Agent(_)) {
                        anyhow::bail!("agent played the illegal move {}", mv);
                    }
                }
            }
        }
    }
}

/// Destinations of the side to move's piece on a square.
fn destinations(board: &Board, square: Square) -> SquareSet {
    match board.id_at(square) {
        Some(id) if board.is_color(square, board.side_to_move()) => legal_destinations(board, id),
        _ => SquareSet::EMPTY,
    }
}

/// A line typed by a human player.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Play(Move),
    Moves(Square),
    Save(&'a str),
    Quit,
    Help,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let mut words = line.split_whitespace();

        let command = match (words.next()?, words.next()) {
            ("quit", None) => Command::Quit,
            ("help", None) => Command::Help,
            ("moves", Some(square)) => Command::Moves(square.parse().ok()?),
            ("save", Some(path)) => Command::Save(path),
            (mv, None) => Command::Play(mv.parse().ok()?),
            _ => return None,
        };

        match words.next() {
            None => Some(command),
            Some(_) => None,
        }
    }
}
