use crate::types::{Color, Kind, Square};
use derive_more::Display;

/// Stable handle of a piece inside a [`Board`](crate::Board).
///
/// Ids are handed out once at setup and never reused within a game.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[display(fmt = "#{}", _0)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single chess unit standing on the board.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub kind: Kind,
    pub color: Color,
    pub(crate) square: Square,
    pub(crate) has_moved: bool,
    pub(crate) just_double_moved: bool,
    pub(crate) promoted: bool,
}

impl Piece {
    pub(crate) const fn new(kind: Kind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
            just_double_moved: false,
            promoted: false,
        }
    }

    /// The square this piece stands on.
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Whether this piece has moved since setup.
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Whether this pawn advanced two ranks on its side's last ply.
    pub const fn just_double_moved(&self) -> bool {
        self.just_double_moved
    }

    /// Whether this piece started the game as a pawn and was promoted.
    pub const fn is_promoted(&self) -> bool {
        self.promoted
    }

    /// The two-character code used by the persisted board state, e.g. `WQ`.
    pub const fn code(&self) -> &'static str {
        code(self.kind, self.color)
    }
}

pub(crate) const fn code(kind: Kind, color: Color) -> &'static str {
    match (kind, color) {
        (Kind::King, Color::White) => "WK",
        (Kind::King, Color::Black) => "BK",
        (Kind::Queen, Color::White) => "WQ",
        (Kind::Queen, Color::Black) => "BQ",
        (Kind::Rook, Color::White) => "WR",
        (Kind::Rook, Color::Black) => "BR",
        (Kind::Knight, Color::White) => "WN",
        (Kind::Knight, Color::Black) => "BN",
        (Kind::Bishop, Color::White) => "WB",
        (Kind::Bishop, Color::Black) => "BB",
        (Kind::Pawn, Color::White) => "WP",
        (Kind::Pawn, Color::Black) => "BP",
    }
}

pub(crate) fn from_code(code: &str) -> Option<(Kind, Color)> {
    let color = match code.as_bytes().first()? {
        b'W' => Color::White,
        b'B' => Color::Black,
        _ => return None,
    };

    let kind = match code.get(1..)? {
        "K" => Kind::King,
        "Q" => Kind::Queen,
        "R" => Kind::Rook,
        "N" => Kind::Knight,
        "B" => Kind::Bishop,
        "P" => Kind::Pawn,
        _ => return None,
    };

    Some((kind, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn piece_codes_can_be_decoded(k: Kind, c: Color) {
        assert_eq!(from_code(code(k, c)), Some((k, c)));
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(from_code("||"), None);
        assert_eq!(from_code("WX"), None);
        assert_eq!(from_code("RK"), None);
        assert_eq!(from_code("W"), None);
        assert_eq!(from_code("WKK"), None);
    }
}
