//! The persisted board state: eight lines of two-character piece codes
//! (rank 8 first, files a to h, `||` for an empty square) followed by the ply counter.
use crate::board::Board;
use crate::piece;
use crate::types::{Color, File, Kind, Rank, Square};
use derive_more::{Display, Error};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::{fs, io};
use tracing::{debug, instrument};

/// Marker for an empty square.
const EMPTY: &str = "||";

/// The reason why loading or saving a board state failed.
#[derive(Debug, Display, Error)]
pub enum BoardStateError {
    #[display(fmt = "expected 9 lines, got {}", found)]
    LineCount { found: usize },
    #[display(fmt = "rank {} has {} characters, expected 16", rank, len)]
    LineLength { rank: char, len: usize },
    #[display(fmt = "unknown piece code `{}` on {}", code, square)]
    UnknownPiece { code: String, square: Square },
    #[display(fmt = "invalid ply counter `{}`", text)]
    InvalidPly { text: String },
    #[display(fmt = "expected exactly one {} king, found {}", color, count)]
    KingCount { color: Color, count: usize },
    #[display(fmt = "failed to access board state: {}", _0)]
    Io(io::Error),
}

impl From<io::Error> for BoardStateError {
    fn from(e: io::Error) -> Self {
        BoardStateError::Io(e)
    }
}

impl FromStr for Board {
    type Err = BoardStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();

        if lines.len() != 9 {
            return Err(BoardStateError::LineCount { found: lines.len() });
        }

        let mut board = Board::empty();

        // Lines run from rank 8 down to rank 1
        for (line, rank) in lines[..8].iter().zip((0..8).rev().filter_map(Rank::new)) {
            if line.len() != 16 || !line.is_ascii() {
                return Err(BoardStateError::LineLength {
                    rank: rank.to_char(),
                    len: line.chars().count(),
                });
            }

            for file in (0..8).filter_map(File::new) {
                let square = Square::new(file, rank);
                let start = file.index() as usize * 2;
                let code = &line[start..start + 2];

                if code == EMPTY {
                    continue;
                }

                match piece::from_code(code) {
                    Some((kind, color)) => {
                        board.place(kind, color, square);
                    }
                    None => {
                        return Err(BoardStateError::UnknownPiece {
                            code: code.to_string(),
                            square,
                        })
                    }
                }
            }
        }

        let text = lines[8].trim();
        let ply = text.parse::<u32>().map_err(|_| BoardStateError::InvalidPly {
            text: text.to_string(),
        })?;
        board.set_ply(ply);

        for color in Color::ALL {
            let count = board.pieces(color).filter(|(_, p)| p.kind == Kind::King).count();
            if count != 1 {
                return Err(BoardStateError::KingCount { color, count });
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev().filter_map(Rank::new) {
            for file in (0..8).filter_map(File::new) {
                let code = self.piece_at(Square::new(file, rank)).map_or(EMPTY, |p| p.code());
                f.write_str(code)?;
            }

            writeln!(f)?;
        }

        write!(f, "{}", self.ply())
    }
}

impl Board {
    /// Loads a persisted board state from a file.
    #[instrument(level = "debug", err)]
    pub fn load(path: &Path) -> Result<Self, BoardStateError> {
        let board: Board = fs::read_to_string(path)?.parse()?;
        debug!(ply = board.ply(), "loaded board state");
        Ok(board)
    }

    /// Writes the board state to a file, replacing it if it exists.
    #[instrument(level = "debug", skip(self), err)]
    pub fn save(&self, path: &Path) -> Result<(), BoardStateError> {
        fs::write(path, format!("{self}\n"))?;
        Ok(())
    }
}

/// Literal board states for setup and testing.
pub mod positions {
    /// Starting position, White to move.
    pub const STARTING: &str = "\
BRBNBBBQBKBBBNBR
BPBPBPBPBPBPBPBP
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||||||
WPWPWPWPWPWPWPWP
WRWNWBWQWKWBWNWR
0";

    /// Black king on g8 behind its own pawns, mated by the rook on e8.
    pub const BACK_RANK_MATE: &str = "\
||||||||WR||BK||
||||||||||BPBPBP
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||WK||
1";

    /// Black king on a8 with no moves and not in check.
    pub const STALEMATE: &str = "\
BK||||||||||||||
||||WQ||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||WK||||||
1";

    /// Kings and rooks on their home squares with nothing between them.
    pub const CASTLING: &str = "\
BR||||||BK||||BR
BPBPBPBPBPBPBPBP
||||||||||||||||
||||||||||||||||
||||||||||||||||
||||||||||||||||
WPWPWPWPWPWPWPWP
WR||||||WK||||WR
0";
}
