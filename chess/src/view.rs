use deep_chess_core::{Board, Color, Kind, MoveResult, Square, SquareSet};
use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

fn symbol(kind: Kind, color: Color) -> char {
    match (kind, color) {
        (Kind::King, Color::White) => '♔',
        (Kind::Queen, Color::White) => '♕',
        (Kind::Rook, Color::White) => '♖',
        (Kind::Bishop, Color::White) => '♗',
        (Kind::Knight, Color::White) => '♘',
        (Kind::Pawn, Color::White) => '♙',
        (Kind::King, Color::Black) => '♚',
        (Kind::Queen, Color::Black) => '♛',
        (Kind::Rook, Color::Black) => '♜',
        (Kind::Bishop, Color::Black) => '♝',
        (Kind::Knight, Color::Black) => '♞',
        (Kind::Pawn, Color::Black) => '♟',
    }
}

/// Draws the board, marking the last move and any highlighted destinations.
pub fn draw_board<W: Write>(
    out: &mut W,
    board: &Board,
    last: Option<&MoveResult>,
    highlight: SquareSet,
) -> io::Result<()> {
    writeln!(out, "\n   a b c d e f g h")?;
    writeln!(out, " ┌─────────────────┐")?;

    for rank in (0..8).rev() {
        write!(out, "{}│ ", rank + 1)?;

        for file in 0..8 {
            let Some(square) = Square::from_coords(file, rank) else {
                continue;
            };

            let is_last = last.map_or(false, |r| r.mv.from == square || r.mv.to == square);

            let background = if highlight.contains(square) {
                TermColor::Blue
            } else if is_last {
                TermColor::Green
            } else if (file + rank) % 2 == 0 {
                TermColor::DarkGrey
            } else {
                TermColor::Black
            };

            queue!(out, SetBackgroundColor(background))?;

            match board.piece_at(square) {
                Some(piece) => {
                    let foreground = match piece.color {
                        Color::White => TermColor::White,
                        Color::Black => TermColor::Magenta,
                    };

                    let cell = format!("{} ", symbol(piece.kind, piece.color));
                    queue!(out, SetForegroundColor(foreground), Print(cell))?;
                }
                None => queue!(out, Print("  "))?,
            }

            queue!(out, ResetColor)?;
        }

        writeln!(out, "│{}", rank + 1)?;
    }

    writeln!(out, " └─────────────────┘")?;
    writeln!(out, "   a b c d e f g h\n")?;

    for color in Color::ALL {
        writeln!(out, "{}: {} points", color, board.player(color).score())?;
    }

    writeln!(out, "Turn {}, {} to move", board.ply() + 1, board.side_to_move())?;

    if let Some(result) = last {
        writeln!(out, "Last move: {}", result.notation())?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_lists_every_piece() {
        let board = Board::starting_position();
        let mut out = Vec::new();

        draw_board(&mut out, &board, None, SquareSet::EMPTY).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches('♟').count(), 8);
        assert_eq!(text.matches('♔').count(), 1);
        assert!(text.contains("Turn 1, White to move"));
    }

    #[test]
    fn test_last_move_is_shown() {
        let mut board = Board::starting_position();
        let result = board.play("e2e4".parse().unwrap()).unwrap();
        let mut out = Vec::new();

        draw_board(&mut out, &board, Some(&result), SquareSet::EMPTY).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Last move: pe2->e4"));
        assert!(text.contains("Turn 2, Black to move"));
    }
}
