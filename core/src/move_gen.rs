use crate::board::Board;
use crate::piece::{Piece, PieceId};
use crate::types::{Castle, Color, Kind, Move, Square, SquareSet};
use derive_more::Display;

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const STRAIGHT_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Distinguishes top-level generation from generation nested inside another
/// rule, such as computing what the opponent covers.
///
/// Castling is only considered at the top, since it needs the opponent's coverage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Depth {
    Top,
    Nested,
}

/// Squares a piece could move to following its geometry alone.
///
/// Neither king exposure nor the color of the destination's occupant is
/// considered; see [`legal_destinations`] for that.
pub fn pseudo_legal(board: &Board, id: PieceId, depth: Depth) -> SquareSet {
    let mut moves = SquareSet::EMPTY;

    let Some(piece) = board.piece(id) else {
        return moves;
    };

    match piece.kind {
        Kind::King => {
            generate_steps(piece.square, &KING_DELTAS, &mut moves);
            if depth == Depth::Top {
                generate_castling(board, piece, &mut moves);
            }
        }
        Kind::Queen => {
            generate_sliding(board, piece.square, &DIAGONAL_DIRS, &mut moves);
            generate_sliding(board, piece.square, &STRAIGHT_DIRS, &mut moves);
        }
        Kind::Rook => generate_sliding(board, piece.square, &STRAIGHT_DIRS, &mut moves),
        Kind::Bishop => generate_sliding(board, piece.square, &DIAGONAL_DIRS, &mut moves),
        Kind::Knight => generate_steps(piece.square, &KNIGHT_DELTAS, &mut moves),
        Kind::Pawn => generate_pawn(board, piece, &mut moves),
    }

    moves
}

/// Every square the given side's pieces attack, regardless of legality.
pub fn coverage(board: &Board, color: Color) -> SquareSet {
    board
        .player(color)
        .owned()
        .fold(SquareSet::EMPTY, |covered, id| {
            covered.union(pseudo_legal(board, id, Depth::Nested))
        })
}

/// Returns true if the given side's king is attacked.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    coverage(board, color.opponent()).contains(board.king_square(color))
}

/// Checks whether moving a piece to `to` keeps its own king out of the opponent's coverage.
///
/// The move is tried on a scratch copy of the board, so `board` is never touched.
pub fn is_safe(board: &Board, id: PieceId, to: Square) -> bool {
    let Some(piece) = board.piece(id) else {
        return false;
    };

    let color = piece.color;
    match board.piece_at(to) {
        Some(target) if target.color == color => return false,
        // Kings are never captured, the game ends before that.
        Some(target) if target.kind == Kind::King => return false,
        _ => {}
    }

    let mut scratch = board.clone();
    scratch.remove_at(to);
    scratch.relocate(id, to);

    let king = scratch.king_square(color);
    !coverage(&scratch, color.opponent()).contains(king)
}

/// Squares a piece can actually move to.
pub fn legal_destinations(board: &Board, id: PieceId) -> SquareSet {
    pseudo_legal(board, id, Depth::Top)
        .iter()
        .filter(|&to| is_safe(board, id, to))
        .collect()
}

/// All moves the given side can make, grouped by piece in id order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces(color)
        .flat_map(|(id, piece)| {
            legal_destinations(board, id)
                .iter()
                .map(move |to| Move::new(piece.square, to))
        })
        .collect()
}

/// Union of the destinations of all of a side's pieces.
pub fn legal_targets(board: &Board, color: Color) -> SquareSet {
    board
        .player(color)
        .owned()
        .fold(SquareSet::EMPTY, |targets, id| {
            targets.union(legal_destinations(board, id))
        })
}

/// Whether a side is mated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mate {
    NoMate,
    Stalemate,
    Checkmate,
}

/// Classifies the given side's position by whether it has any move left.
pub fn classify(board: &Board, color: Color) -> Mate {
    let can_move = board.player(color).owned().any(|id| {
        pseudo_legal(board, id, Depth::Top)
            .iter()
            .any(|to| is_safe(board, id, to))
    });

    if can_move {
        Mate::NoMate
    } else if is_in_check(board, color) {
        Mate::Checkmate
    } else {
        Mate::Stalemate
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum Outcome {
    #[display(fmt = "{} wins by checkmate!", winner)]
    Checkmate { winner: Color },
    #[display(fmt = "It's a tie by stalemate!")]
    Stalemate,
}

impl Board {
    /// The outcome of the game if the side to move has no move left.
    pub fn outcome(&self) -> Option<Outcome> {
        let side = self.side_to_move();
        match classify(self, side) {
            Mate::NoMate => None,
            Mate::Stalemate => Some(Outcome::Stalemate),
            Mate::Checkmate => Some(Outcome::Checkmate {
                winner: side.opponent(),
            }),
        }
    }
}

/// Adds every in-bounds square one step away along each delta.
fn generate_steps(from: Square, deltas: &[(i8, i8)], moves: &mut SquareSet) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            moves.insert(to);
        }
    }
}

/// Generates sliding moves along each direction, stopping at the first occupied square.
fn generate_sliding(board: &Board, from: Square, directions: &[(i8, i8)], moves: &mut SquareSet) {
    for &(df, dr) in directions {
        let mut current = from;

        while let Some(to) = current.offset(df, dr) {
            moves.insert(to);
            if !board.is_empty(to) {
                break; // Can't move past any piece
            }
            current = to;
        }
    }
}

fn generate_pawn(board: &Board, pawn: &Piece, moves: &mut SquareSet) {
    let direction = pawn.color.pawn_direction();
    let from = pawn.square;

    // Single push, then double push from the starting rank
    if let Some(one) = from.offset(0, direction) {
        if board.is_empty(one) {
            moves.insert(one);

            if from.rank() == pawn.color.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * direction) {
                    if board.is_empty(two) {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(diagonal) = from.offset(df, direction) else {
            continue;
        };

        if !board.is_empty(diagonal) {
            moves.insert(diagonal);
        }

        // En passant
        let passed = from
            .offset(df, 0)
            .and_then(|beside| board.piece_at(beside))
            .map_or(false, |p| {
                p.kind == Kind::Pawn && p.color != pawn.color && p.just_double_moved
            });

        if passed {
            moves.insert(diagonal);
        }
    }
}

fn generate_castling(board: &Board, king: &Piece, moves: &mut SquareSet) {
    if king.has_moved {
        return;
    }

    let mut threats = None;

    for castle in Castle::ALL {
        let direction = castle.direction();
        let rook_offset = castle.rook_offset();

        let rook_ready = king
            .square
            .offset(rook_offset, 0)
            .and_then(|s| board.piece_at(s))
            .map_or(false, |rook| {
                rook.kind == Kind::Rook && rook.color == king.color && !rook.has_moved
            });

        if !rook_ready {
            continue;
        }

        let clear = (1..rook_offset.abs())
            .filter_map(|step| king.square.offset(step * direction, 0))
            .all(|s| board.is_empty(s));

        if !clear {
            continue;
        }

        // From the king's square up to the square next to the rook
        let covered = *threats.get_or_insert_with(|| coverage(board, king.color.opponent()));
        let safe = (0..rook_offset.abs())
            .filter_map(|step| king.square.offset(step * direction, 0))
            .all(|s| !covered.contains(s));

        if safe {
            if let Some(to) = king.square.offset(2 * direction, 0) {
                moves.insert(to);
            }
        }
    }
}
