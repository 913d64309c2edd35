use deep_chess_core::{classify, coverage, Board, Color, Kind, Mate, SquareSet};

/// Material each piece is worth to its owner.
fn material(kind: Kind) -> f64 {
    match kind {
        Kind::King => 0.0,
        Kind::Queen => 90.0,
        Kind::Rook => 50.0,
        Kind::Knight => 30.0,
        Kind::Bishop => 32.0,
        Kind::Pawn => 10.0,
    }
}

/// Bonus for covering one's own piece.
fn protection(kind: Kind) -> f64 {
    0.5 * match kind {
        Kind::King | Kind::Queen => 0.0,
        Kind::Rook => 50.0,
        Kind::Knight => 30.0,
        Kind::Bishop => 32.0,
        Kind::Pawn => 15.0,
    }
}

/// Bonus for attacking an enemy piece its owner also covers.
fn defended_attack(kind: Kind) -> f64 {
    0.2 * match kind {
        Kind::King => 30.0,
        Kind::Queen => 270.0,
        Kind::Rook => 50.0,
        Kind::Knight => 30.0,
        Kind::Bishop => 32.0,
        Kind::Pawn => 10.0,
    }
}

/// Bonus for attacking an enemy piece left uncovered.
fn hanging_attack(kind: Kind) -> f64 {
    0.8 * match kind {
        Kind::King => 7.5,
        Kind::Queen => 90.0,
        Kind::Rook => 50.0,
        Kind::Knight => 30.0,
        Kind::Bishop => 32.0,
        Kind::Pawn => 10.0,
    }
}

const EMPTY_SQUARE_BONUS: f64 = 0.15;
const CENTER_BONUS: f64 = 2.0;
const PAWN_ADVANCE_BONUS: f64 = 1.5;

/// Scores a position from the given side's point of view.
///
/// Positive values favor `perspective`; a win is `+inf` and a loss `-inf`.
/// The score is symmetric: swapping the perspective negates it.
pub fn evaluate(board: &Board, perspective: Color) -> f64 {
    let opponent = perspective.opponent();

    match classify(board, opponent) {
        Mate::Checkmate => return f64::INFINITY,
        Mate::Stalemate => return 0.0,
        Mate::NoMate => {}
    }

    match classify(board, perspective) {
        Mate::Checkmate => return f64::NEG_INFINITY,
        Mate::Stalemate => return 0.0,
        Mate::NoMate => {}
    }

    let covered = [coverage(board, Color::White), coverage(board, Color::Black)];
    let covered_by = |color: Color| match color {
        Color::White => covered[0],
        Color::Black => covered[1],
    };

    evaluate_color(board, perspective, covered_by(perspective), covered_by(opponent))
        - evaluate_color(board, opponent, covered_by(opponent), covered_by(perspective))
}

/// Evaluates all factors for a single color.
fn evaluate_color(board: &Board, color: Color, mine: SquareSet, theirs: SquareSet) -> f64 {
    evaluate_control(board, color, mine, theirs) + evaluate_pieces(board, color)
}

/// Rewards covered squares: empty ones, own pieces and enemy pieces.
fn evaluate_control(board: &Board, color: Color, mine: SquareSet, theirs: SquareSet) -> f64 {
    mine.iter()
        .map(|square| match board.piece_at(square) {
            None => EMPTY_SQUARE_BONUS,
            Some(piece) if piece.color == color => protection(piece.kind),
            Some(piece) if theirs.contains(square) => defended_attack(piece.kind),
            Some(piece) => hanging_attack(piece.kind),
        })
        .sum()
}

/// Material, central placement and pawn advancement.
fn evaluate_pieces(board: &Board, color: Color) -> f64 {
    board
        .pieces(color)
        .map(|(_, piece)| {
            let square = piece.square();
            let (file, rank) = (square.file().index(), square.rank().index());

            let mut score = material(piece.kind);

            if (2..=5).contains(&file) && (2..=5).contains(&rank) {
                score += CENTER_BONUS;
            }

            if piece.kind == Kind::Pawn {
                let start = color.pawn_rank().index();
                score += f64::from(rank.abs_diff(start)) * PAWN_ADVANCE_BONUS;
            }

            score
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deep_chess_core::{positions, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::starting_position();

        assert!(evaluate(&board, Color::White).abs() < 1e-9);
        assert!(evaluate(&board, Color::Black).abs() < 1e-9);
    }

    #[test]
    fn test_checkmate_is_infinite() {
        let board: Board = positions::BACK_RANK_MATE.parse().unwrap();

        assert_eq!(evaluate(&board, Color::White), f64::INFINITY);
        assert_eq!(evaluate(&board, Color::Black), f64::NEG_INFINITY);
    }

    #[test]
    fn test_stalemate_is_zero() {
        let board: Board = positions::STALEMATE.parse().unwrap();

        assert_eq!(evaluate(&board, Color::White), 0.0);
        assert_eq!(evaluate(&board, Color::Black), 0.0);
    }

    #[test]
    fn test_black_delivering_mate_is_infinite() {
        let mut board = Board::starting_position();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            board.play(mv.parse().unwrap()).unwrap();
        }

        assert_eq!(evaluate(&board, Color::Black), f64::INFINITY);
        assert_eq!(evaluate(&board, Color::White), f64::NEG_INFINITY);
    }

    #[test]
    fn test_stalemated_white_is_zero() {
        let mut board = Board::empty();
        board.place(Kind::King, Color::White, sq("a1"));
        board.place(Kind::Queen, Color::Black, sq("b3"));
        board.place(Kind::King, Color::Black, sq("h8"));

        assert_eq!(classify(&board, Color::White), Mate::Stalemate);
        assert_eq!(evaluate(&board, Color::White), 0.0);
        assert_eq!(evaluate(&board, Color::Black), 0.0);
    }

    #[test]
    fn test_evaluation_is_symmetric() {
        let mut board = Board::starting_position();
        for mv in ["e2e4", "d7d5", "e4d5", "d8d5", "b1c3"] {
            board.play(mv.parse().unwrap()).unwrap();
        }

        let white = evaluate(&board, Color::White);
        let black = evaluate(&board, Color::Black);
        assert!((white + black).abs() < 1e-9, "{white} vs {black}");
    }

    #[test]
    fn test_extra_material_is_favorable() {
        let mut board = Board::empty();
        board.place(Kind::King, Color::White, sq("a1"));
        board.place(Kind::King, Color::Black, sq("h8"));
        board.place(Kind::Rook, Color::White, sq("d4"));

        assert!(evaluate(&board, Color::White) > 40.0);
        assert!(evaluate(&board, Color::Black) < -40.0);
    }

    #[test]
    fn test_pawn_advancement_and_center() {
        let mut board = Board::empty();
        board.place(Kind::King, Color::White, sq("a1"));
        board.place(Kind::King, Color::Black, sq("h8"));
        board.place(Kind::Pawn, Color::White, sq("d5"));
        board.place(Kind::Pawn, Color::Black, sq("h6"));

        // Pawn value, center bonus and three ranks of advancement
        assert_eq!(evaluate_pieces(&board, Color::White), 10.0 + 2.0 + 3.0 * 1.5);
        assert_eq!(evaluate_pieces(&board, Color::Black), 10.0 + 1.5);
    }

    #[test]
    fn test_hanging_pieces_score_more_than_defended_ones() {
        assert!(hanging_attack(Kind::Rook) > defended_attack(Kind::Rook));
        assert!((defended_attack(Kind::King) - hanging_attack(Kind::King)).abs() < 1e-9);
    }
}
