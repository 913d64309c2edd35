//! Board representation: a square grid of piece handles backed by a piece arena.
use crate::piece::{Piece, PieceId};
use crate::player::Player;
use crate::types::*;

/// Pieces on the back rank at the start of a game, from the a-file to the h-file.
const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

/// An 8x8 board, the pieces on it and the two players owning them.
///
/// Every piece's square and the occupant of that square always agree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// 64 squares, indexed by Square::index()
    squares: [Option<PieceId>; 64],
    /// Piece arena, indexed by PieceId; captured pieces leave a hole
    pieces: Vec<Option<Piece>>,
    players: [Player; 2],
    ply: u32,
}

impl Board {
    /// Creates an empty board with White to move.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            pieces: Vec::with_capacity(32),
            players: [Player::new(Color::White), Player::new(Color::Black)],
            ply: 0,
        }
    }

    /// Creates the standard starting position.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for color in Color::ALL {
            for (file, &kind) in (0..8).zip(BACK_RANK.iter()) {
                if let Some(file) = File::new(file) {
                    board.place(kind, color, Square::new(file, color.back_rank()));
                }
            }

            for file in (0..8).filter_map(File::new) {
                board.place(Kind::Pawn, color, Square::new(file, color.pawn_rank()));
            }
        }

        board
    }

    /// Puts a new, unmoved piece on an empty square and hands it to its owner.
    ///
    /// Panics if the square is already occupied, or if the board has already handed out
    /// 256 piece ids.
    pub fn place(&mut self, kind: Kind, color: Color, square: Square) -> PieceId {
        assert!(self.is_empty(square), "square {square} is already occupied");

        let id = match u8::try_from(self.pieces.len()) {
            Ok(index) => PieceId(index),
            Err(_) => panic!("a board holds at most {} pieces", u8::MAX as usize + 1),
        };
        self.pieces.push(Some(Piece::new(kind, color, square)));
        self.squares[square.index() as usize] = Some(id);
        self.players[color.index()].adopt(id, kind);
        id
    }

    /// Number of plies played so far.
    pub const fn ply(&self) -> u32 {
        self.ply
    }

    pub fn set_ply(&mut self, ply: u32) {
        self.ply = ply;
    }

    /// The side to move: White on even plies, Black on odd ones.
    pub const fn side_to_move(&self) -> Color {
        Color::on_ply(self.ply)
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    /// Gets a piece by its id, if it is still on the board.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())?.as_ref()
    }

    /// Gets the id of the piece on the given square.
    pub fn id_at(&self, square: Square) -> Option<PieceId> {
        self.squares[square.index() as usize]
    }

    /// Gets the piece on the given square.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.id_at(square).and_then(|id| self.piece(id))
    }

    /// Returns true if the given square is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        self.id_at(square).is_none()
    }

    /// Returns true if the given square holds a piece of the given color.
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).map_or(false, |p| p.color == color)
    }

    /// The pieces a player owns, in id order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.player(color)
            .owned()
            .filter_map(move |id| Some((id, self.piece(id)?)))
    }

    /// Finds the king square for the given color.
    ///
    /// Panics if the king is gone, which can only happen on a corrupt board.
    pub fn king_square(&self, color: Color) -> Square {
        match self.player(color).king().and_then(|id| self.piece(id)) {
            Some(king) => king.square,
            None => panic!("no king found for {color}"),
        }
    }

    /// Checks that pieces, squares and owners all agree with each other.
    pub fn is_consistent(&self) -> bool {
        let squares_agree = Square::all().all(|square| match self.id_at(square) {
            None => true,
            Some(id) => self.piece(id).map_or(false, |p| p.square == square),
        });

        let pieces_agree = self.pieces.iter().enumerate().all(|(i, slot)| match slot {
            None => Color::ALL.iter().all(|&c| !self.player(c).owns(PieceId(i as u8))),
            Some(p) => {
                self.id_at(p.square) == Some(PieceId(i as u8))
                    && self.player(p.color).owns(PieceId(i as u8))
            }
        });

        let kings_agree = Color::ALL.iter().all(|&color| {
            let kings = self.pieces(color).filter(|(_, p)| p.kind == Kind::King).count();
            let king = self.player(color).king().and_then(|id| self.piece(id));
            kings <= 1 && (kings == 0 || king.map_or(false, |k| k.kind == Kind::King))
        });

        let players_agree = Color::ALL.iter().all(|&color| {
            let player = self.player(color);
            player.color() == color
                && player.owned().all(|id| self.piece(id).map_or(false, |p| p.color == color))
        });

        squares_agree && pieces_agree && kings_agree && players_agree
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        match self.pieces.get_mut(id.index()).and_then(Option::as_mut) {
            Some(piece) => piece,
            None => panic!("piece {id} is not on the board"),
        }
    }

    pub(crate) fn player_mut(&mut self, color: Color) -> &mut Player {
        &mut self.players[color.index()]
    }

    /// Moves a piece onto an empty square, keeping both sides of the link in sync.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        debug_assert!(self.is_empty(to), "relocating {id} onto occupied {to}");

        let piece = self.piece_mut(id);
        let from = piece.square;
        piece.square = to;

        self.squares[from.index() as usize] = None;
        self.squares[to.index() as usize] = Some(id);
    }

    /// Takes the occupant of a square off the board and away from its owner.
    pub(crate) fn remove_at(&mut self, square: Square) -> Option<(PieceId, Piece)> {
        let id = self.squares[square.index() as usize].take()?;
        let piece = self.pieces.get_mut(id.index())?.take()?;
        self.players[piece.color.index()].release(id);
        Some((id, piece))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = Board::starting_position();

        let a1 = board.piece_at(sq("a1")).unwrap();
        assert_eq!((a1.kind, a1.color), (Kind::Rook, Color::White));

        let e8 = board.piece_at(sq("e8")).unwrap();
        assert_eq!((e8.kind, e8.color), (Kind::King, Color::Black));

        assert!(board.is_empty(sq("d5")));
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        assert_eq!(board.king_square(Color::White), sq("e1"));
        assert_eq!(board.king_square(Color::Black), sq("e8"));
        assert_eq!(board.side_to_move(), Color::White);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_relocate_keeps_links_in_sync() {
        let mut board = Board::starting_position();
        let id = board.id_at(sq("e2")).unwrap();

        board.relocate(id, sq("e4"));

        assert!(board.is_empty(sq("e2")));
        assert_eq!(board.id_at(sq("e4")), Some(id));
        assert_eq!(board.piece(id).unwrap().square(), sq("e4"));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_remove_releases_piece_from_owner() {
        let mut board = Board::starting_position();
        let (id, piece) = board.remove_at(sq("d8")).unwrap();

        assert_eq!(piece.kind, Kind::Queen);
        assert!(board.piece(id).is_none());
        assert!(!board.player(Color::Black).owns(id));
        assert_eq!(board.pieces(Color::Black).count(), 15);
        assert!(board.remove_at(sq("d8")).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_side_to_move_follows_ply_parity() {
        let mut board = Board::empty();
        assert_eq!(board.side_to_move(), Color::White);
        board.set_ply(7);
        assert_eq!(board.side_to_move(), Color::Black);
        board.set_ply(12);
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    #[should_panic]
    fn test_missing_king_is_fatal() {
        Board::empty().king_square(Color::White);
    }

    #[test]
    fn test_piece_ids_are_never_reused() {
        let mut board = Board::empty();
        for _ in 0..=u8::MAX {
            let id = board.place(Kind::Pawn, Color::White, sq("e4"));
            assert_eq!(board.remove_at(sq("e4")).map(|(removed, _)| removed), Some(id));
        }

        assert!(board.is_consistent());
        assert_eq!(board.pieces.len(), 256);
    }

    #[test]
    #[should_panic(expected = "at most 256 pieces")]
    fn test_placing_past_the_last_id_is_fatal() {
        let mut board = Board::empty();
        for _ in 0..=u8::MAX {
            board.place(Kind::Pawn, Color::White, sq("e4"));
            board.remove_at(sq("e4"));
        }

        board.place(Kind::Pawn, Color::White, sq("e4"));
    }
}
