//! Applying a chosen move to the board, including the special rules.
use crate::board::Board;
use crate::move_gen::{is_in_check, legal_destinations};
use crate::piece::Piece;
use crate::types::{Castle, Color, Kind, Move};
use std::fmt;
use tracing::debug;

/// Everything that happened when a move was committed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MoveResult {
    pub mv: Move,
    /// Kind of the moving piece before any promotion.
    pub kind: Kind,
    pub color: Color,
    /// Ply counter at the time the move was made.
    pub ply: u32,
    /// Kind of the captured piece as it stood on the board.
    pub captured: Option<Kind>,
    pub castle: Option<Castle>,
    pub en_passant: bool,
    pub promoted: bool,
    /// Whether the move left the opponent's king attacked.
    pub check: bool,
}

impl MoveResult {
    /// Whether a piece was taken off the board.
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Short move notation, e.g. `pe2->e4`, `nc3-x-pd5`, `pe5-/-d6` or `O-O`.
    pub fn notation(&self) -> String {
        let Move { from, to } = self.mv;
        let letter = self.kind.letter();

        let mut text = match (self.castle, self.captured) {
            (Some(castle), _) => castle.to_string(),
            (None, Some(_)) if self.en_passant => format!("{letter}{from}-/-{to}"),
            (None, Some(captured)) => format!("{letter}{from}-x-{}{to}", captured.letter()),
            (None, None) => format!("{letter}{from}->{to}"),
        };

        if self.check {
            text.push('+');
        }

        text
    }

    /// The line recorded in the game log for this move.
    pub fn log_line(&self) -> String {
        format!("Turn {}, {}: {}", self.ply + 1, self.color, self.notation())
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log_line())
    }
}

impl Board {
    /// Plays a move for the side to move if it is legal.
    ///
    /// Returns `None` and leaves the board untouched otherwise.
    pub fn play(&mut self, mv: Move) -> Option<MoveResult> {
        let id = self.id_at(mv.from)?;

        if self.piece(id)?.color != self.side_to_move() {
            return None;
        }

        if !legal_destinations(self, id).contains(mv.to) {
            return None;
        }

        Some(self.commit(mv))
    }

    /// Commits a move already known to be legal.
    ///
    /// Panics if there is no piece on the origin square.
    pub fn commit(&mut self, mv: Move) -> MoveResult {
        let Some(id) = self.id_at(mv.from) else {
            panic!("no piece to move on {}", mv.from);
        };

        let (kind, color) = {
            let piece = self.piece_mut(id);
            (piece.kind, piece.color)
        };

        let mut result = MoveResult {
            mv,
            kind,
            color,
            ply: self.ply(),
            captured: None,
            castle: None,
            en_passant: false,
            promoted: false,
            check: false,
        };

        // Castling moves the rook next to the king's landing square
        if kind == Kind::King {
            result.castle = Castle::from_king_move(mv.from, mv.to);

            if let Some(castle) = result.castle {
                let rook = mv
                    .from
                    .offset(castle.rook_offset(), 0)
                    .and_then(|s| self.id_at(s));
                let landing = mv.from.offset(castle.direction(), 0);

                if let (Some(rook), Some(landing)) = (rook, landing) {
                    self.relocate(rook, landing);
                    self.piece_mut(rook).has_moved = true;
                }
            }
        }

        if let Some((_, taken)) = self.remove_at(mv.to) {
            result.captured = Some(taken.kind);
            self.tally(color, &taken);
        } else if kind == Kind::Pawn && mv.from.file() != mv.to.file() {
            // A diagonal step onto an empty square can only take en passant
            let passed = mv.to.offset(0, -color.pawn_direction()).filter(|&behind| {
                self.piece_at(behind).map_or(false, |p| {
                    p.kind == Kind::Pawn && p.color != color && p.just_double_moved
                })
            });

            if let Some((_, taken)) = passed.and_then(|behind| self.remove_at(behind)) {
                result.captured = Some(taken.kind);
                result.en_passant = true;
                self.tally(color, &taken);
            }
        }

        // The en passant window closes after one ply
        let opponents: Vec<_> = self.player(color.opponent()).owned().collect();
        for other in opponents {
            self.piece_mut(other).just_double_moved = false;
        }

        self.relocate(id, mv.to);

        let promotion_rank = color.promotion_rank();
        let piece = self.piece_mut(id);
        piece.has_moved = true;

        if kind == Kind::Pawn {
            let advance = mv.to.rank().index().abs_diff(mv.from.rank().index());
            piece.just_double_moved = advance == 2;

            if mv.to.rank() == promotion_rank {
                piece.kind = Kind::Queen;
                piece.promoted = true;
                result.promoted = true;
            }
        }

        result.check = is_in_check(self, color.opponent());
        self.set_ply(self.ply() + 1);

        debug!(ply = result.ply, notation = %result.notation(), "committed move");
        result
    }

    /// Records a captured piece for the capturing side, promoted pieces counting as pawns.
    fn tally(&mut self, capturer: Color, taken: &Piece) {
        let kind = if taken.promoted { Kind::Pawn } else { taken.kind };
        self.player_mut(capturer).captures_mut().record(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_state::positions;
    use crate::types::Square;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn play_all(board: &mut Board, moves: &[&str]) -> Vec<MoveResult> {
        moves
            .iter()
            .map(|m| board.play(mv(m)).unwrap_or_else(|| panic!("{m} was rejected")))
            .collect()
    }

    #[test]
    fn test_quiet_move() {
        let mut board = Board::starting_position();
        let result = board.play(mv("g1f3")).unwrap();

        assert_eq!(result.notation(), "ng1->f3");
        assert_eq!(result.log_line(), "Turn 1, White: ng1->f3");
        assert_eq!(board.ply(), 1);
        assert_eq!(board.side_to_move(), Color::Black);
        assert!(board.piece_at(sq("f3")).unwrap().has_moved());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_wrong_side_and_illegal_moves_are_rejected() {
        let mut board = Board::starting_position();
        let before = board.clone();

        assert!(board.play(mv("e7e5")).is_none());
        assert!(board.play(mv("e2e5")).is_none());
        assert!(board.play(mv("d1d3")).is_none());
        assert!(board.play(mv("e4e5")).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_is_tallied() {
        let mut board = Board::starting_position();
        let results = play_all(&mut board, &["e2e4", "d7d5", "e4d5"]);

        let capture = results[2];
        assert_eq!(capture.captured, Some(Kind::Pawn));
        assert_eq!(capture.notation(), "pe4-x-pd5");
        assert_eq!(capture.log_line(), "Turn 3, White: pe4-x-pd5");
        assert_eq!(board.player(Color::White).captures().pawns, 1);
        assert_eq!(board.player(Color::White).score(), 1);
        assert_eq!(board.pieces(Color::Black).count(), 15);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_double_step_sets_the_en_passant_flag() {
        let mut board = Board::starting_position();
        play_all(&mut board, &["e2e4"]);
        assert!(board.piece_at(sq("e4")).unwrap().just_double_moved());

        play_all(&mut board, &["g8f6", "e4e5"]);
        assert!(!board.piece_at(sq("e5")).unwrap().just_double_moved());
    }

    #[test]
    fn test_en_passant_capture() {
        let mut board = Board::starting_position();
        let results = play_all(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);

        let capture = results[4];
        assert!(capture.en_passant);
        assert_eq!(capture.captured, Some(Kind::Pawn));
        assert_eq!(capture.notation(), "pe5-/-d6");
        assert!(board.is_empty(sq("d5")));
        assert_eq!(board.piece_at(sq("d6")).unwrap().color, Color::White);
        assert_eq!(board.player(Color::White).captures().pawns, 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_en_passant_expires_after_one_ply() {
        let mut board = Board::starting_position();
        play_all(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);

        assert!(board.play(mv("e5d6")).is_none());
    }

    #[test]
    fn test_kingside_castling_moves_the_rook() {
        let mut board: Board = positions::CASTLING.parse().unwrap();
        let result = board.play(mv("e1g1")).unwrap();

        assert_eq!(result.castle, Some(Castle::Kingside));
        assert_eq!(result.notation(), "O-O");
        assert_eq!(board.piece_at(sq("g1")).unwrap().kind, Kind::King);
        assert_eq!(board.piece_at(sq("f1")).unwrap().kind, Kind::Rook);
        assert!(board.piece_at(sq("f1")).unwrap().has_moved());
        assert!(board.is_empty(sq("h1")));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_queenside_castling_moves_the_rook() {
        let mut board: Board = positions::CASTLING.parse().unwrap();
        play_all(&mut board, &["a2a3"]);
        let result = board.play(mv("e8c8")).unwrap();

        assert_eq!(result.castle, Some(Castle::Queenside));
        assert_eq!(result.log_line(), "Turn 2, Black: O-O-O");
        assert_eq!(board.piece_at(sq("c8")).unwrap().kind, Kind::King);
        assert_eq!(board.piece_at(sq("d8")).unwrap().kind, Kind::Rook);
        assert!(board.is_empty(sq("a8")));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_promotion_to_queen() {
        let mut board = Board::empty();
        board.place(Kind::King, Color::White, sq("a1"));
        board.place(Kind::King, Color::Black, sq("h1"));
        board.place(Kind::Pawn, Color::White, sq("b7"));

        let result = board.play(mv("b7b8")).unwrap();
        let queen = board.piece_at(sq("b8")).unwrap();

        assert!(result.promoted);
        assert_eq!(result.notation(), "pb7->b8");
        assert_eq!((queen.kind, queen.color), (Kind::Queen, Color::White));
        assert!(queen.is_promoted());
    }

    #[test]
    fn test_black_promotes_to_a_black_queen() {
        let mut board = Board::empty();
        board.place(Kind::King, Color::White, sq("h8"));
        board.place(Kind::King, Color::Black, sq("h3"));
        board.place(Kind::Pawn, Color::Black, sq("b2"));
        board.set_ply(1);

        let result = board.play(mv("b2b1")).unwrap();
        let queen = board.piece_at(sq("b1")).unwrap();

        assert!(result.promoted);
        assert_eq!(result.kind, Kind::Pawn);
        assert_eq!(result.notation(), "pb2->b1");
        assert_eq!(result.log_line(), "Turn 2, Black: pb2->b1");
        assert_eq!((queen.kind, queen.color), (Kind::Queen, Color::Black));
        assert!(queen.is_promoted());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_promoted_piece_is_tallied_as_a_pawn() {
        let mut board = Board::empty();
        board.place(Kind::King, Color::White, sq("a1"));
        board.place(Kind::King, Color::Black, sq("h1"));
        board.place(Kind::Pawn, Color::White, sq("b7"));
        board.place(Kind::Rook, Color::Black, sq("h8"));

        play_all(&mut board, &["b7b8"]);
        let result = board.play(mv("h8b8")).unwrap();

        assert_eq!(result.captured, Some(Kind::Queen));
        assert_eq!(result.notation(), "rh8-x-qb8");
        assert_eq!(board.player(Color::Black).captures().pawns, 1);
        assert_eq!(board.player(Color::Black).captures().queens, 0);
    }

    #[test]
    fn test_check_is_annotated() {
        let mut board = Board::starting_position();
        let results = play_all(&mut board, &["e2e4", "f7f6", "d1h5"]);

        assert!(results[2].check);
        assert_eq!(results[2].log_line(), "Turn 3, White: qd1->h5+");
    }

    #[test]
    fn test_fools_mate_ends_the_game() {
        let mut board = Board::starting_position();
        let results = play_all(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        assert!(results[3].check);
        assert_eq!(
            board.outcome().map(|o| o.to_string()),
            Some("Black wins by checkmate!".to_string())
        );
    }

    #[test]
    #[should_panic]
    fn test_committing_from_an_empty_square_panics() {
        Board::starting_position().commit(mv("e4e5"));
    }
}
