use crate::piece::PieceId;
use crate::types::{Color, Kind};
use std::collections::BTreeSet;

/// Tally of captured enemy pieces, one bucket per capturable kind.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Captures {
    pub queens: u32,
    pub rooks: u32,
    pub knights: u32,
    pub bishops: u32,
    pub pawns: u32,
}

impl Captures {
    /// Counts one captured piece of the given kind.
    ///
    /// Kings are never captured; a king here means the board is corrupt.
    pub fn record(&mut self, kind: Kind) {
        match kind {
            Kind::Queen => self.queens += 1,
            Kind::Rook => self.rooks += 1,
            Kind::Knight => self.knights += 1,
            Kind::Bishop => self.bishops += 1,
            Kind::Pawn => self.pawns += 1,
            Kind::King => panic!("a king can never be captured"),
        }
    }

    /// Number of captured pieces of the given kind.
    pub const fn count(&self, kind: Kind) -> u32 {
        match kind {
            Kind::Queen => self.queens,
            Kind::Rook => self.rooks,
            Kind::Knight => self.knights,
            Kind::Bishop => self.bishops,
            Kind::Pawn => self.pawns,
            Kind::King => 0,
        }
    }

    /// Material won, in classic pawn units.
    pub const fn score(&self) -> u32 {
        self.queens * 9 + self.rooks * 5 + (self.knights + self.bishops) * 3 + self.pawns
    }
}

/// One side of the game: the pieces it owns and what it has captured.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Player {
    color: Color,
    owned: BTreeSet<PieceId>,
    king: Option<PieceId>,
    captures: Captures,
}

impl Player {
    pub(crate) fn new(color: Color) -> Self {
        Self {
            color,
            owned: BTreeSet::new(),
            king: None,
            captures: Captures::default(),
        }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// The pieces this player currently owns, in id order.
    pub fn owned(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.owned.iter().copied()
    }

    pub fn owns(&self, id: PieceId) -> bool {
        self.owned.contains(&id)
    }

    /// The player's king, set once during setup.
    pub const fn king(&self) -> Option<PieceId> {
        self.king
    }

    pub const fn captures(&self) -> &Captures {
        &self.captures
    }

    /// Cumulative material score derived from the capture tally.
    pub const fn score(&self) -> u32 {
        self.captures.score()
    }

    pub(crate) fn adopt(&mut self, id: PieceId, kind: Kind) {
        self.owned.insert(id);
        if kind == Kind::King {
            self.king = Some(id);
        }
    }

    pub(crate) fn release(&mut self, id: PieceId) {
        self.owned.remove(&id);
    }

    pub(crate) fn captures_mut(&mut self) -> &mut Captures {
        &mut self.captures
    }
}
