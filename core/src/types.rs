use derive_more::{Display, Error};
use std::fmt;
use std::ops::Not;
use std::str::FromStr;

/// Represents one of the two players in chess.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Color {
    #[display(fmt = "White")]
    White,
    #[display(fmt = "Black")]
    Black,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the starting rank for pawns of this color.
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::SECOND,
            Color::Black => Rank::SEVENTH,
        }
    }

    /// Returns the promotion rank for pawns of this color.
    pub const fn promotion_rank(self) -> Rank {
        match self {
            Color::White => Rank::EIGHTH,
            Color::Black => Rank::FIRST,
        }
    }

    /// Returns the back rank where this color's king and rooks start.
    pub const fn back_rank(self) -> Rank {
        match self {
            Color::White => Rank::FIRST,
            Color::Black => Rank::EIGHTH,
        }
    }

    /// Returns the direction pawns of this color move.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The side that moves on the given ply.
    pub const fn on_ply(ply: u32) -> Self {
        if ply % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

/// The six kinds of chess pieces.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Kind {
    #[display(fmt = "king")]
    King,
    #[display(fmt = "queen")]
    Queen,
    #[display(fmt = "rook")]
    Rook,
    #[display(fmt = "knight")]
    Knight,
    #[display(fmt = "bishop")]
    Bishop,
    #[display(fmt = "pawn")]
    Pawn,
}

impl Kind {
    /// The letter used for this kind in move notation.
    pub const fn letter(self) -> char {
        match self {
            Kind::King => 'k',
            Kind::Queen => 'q',
            Kind::Rook => 'r',
            Kind::Knight => 'n',
            Kind::Bishop => 'b',
            Kind::Pawn => 'p',
        }
    }
}

/// A file on the chess board (a-h).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct File(#[cfg_attr(test, strategy(0u8..8))] u8);

impl File {
    /// Creates a new file from index (0-7).
    /// Returns None if index is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(File(index))
        } else {
            None
        }
    }

    /// Creates a file from a character ('a'-'h').
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Returns the file as a character ('a'-'h').
    pub const fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Returns the file index (0-7).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file `delta` steps away, if it is on the board.
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new_file = self.0 as i8 + delta;
        if new_file >= 0 && new_file < 8 {
            Some(File(new_file as u8))
        } else {
            None
        }
    }
}

/// A rank on the chess board (1-8).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Rank(#[cfg_attr(test, strategy(0u8..8))] u8);

impl Rank {
    pub const FIRST: Rank = Rank(0);
    pub const SECOND: Rank = Rank(1);
    pub const SEVENTH: Rank = Rank(6);
    pub const EIGHTH: Rank = Rank(7);

    /// Creates a new rank from index (0-7).
    /// Returns None if index is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Rank(index))
        } else {
            None
        }
    }

    /// Creates a rank from a digit ('1'-'8').
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Rank(c as u8 - b'1')),
            _ => None,
        }
    }

    /// Returns the rank as a character ('1'-'8').
    pub const fn to_char(self) -> char {
        (b'1' + self.0) as char
    }

    /// Returns the rank index (0-7).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the rank `delta` steps away, if it is on the board.
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new_rank = self.0 as i8 + delta;
        if new_rank >= 0 && new_rank < 8 {
            Some(Rank(new_rank as u8))
        } else {
            None
        }
    }
}

/// A square on the chess board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square(#[cfg_attr(test, strategy(0u8..64))] u8);

impl Square {
    /// Creates a new square from file and rank.
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.0 * 8 + file.0)
    }

    /// Creates a square from raw (file, rank) coordinates, dropping anything off the board.
    pub const fn from_coords(file: i8, rank: i8) -> Option<Self> {
        if file >= 0 && file < 8 && rank >= 0 && rank < 8 {
            Some(Square(rank as u8 * 8 + file as u8))
        } else {
            None
        }
    }

    /// Iterates over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Returns the file of this square.
    pub const fn file(self) -> File {
        File(self.0 % 8)
    }

    /// Returns the rank of this square.
    pub const fn rank(self) -> Rank {
        Rank(self.0 / 8)
    }

    /// Returns the square index (0-63).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The square `df` files and `dr` ranks away, if it is on the board.
    pub const fn offset(self, df: i8, dr: i8) -> Option<Self> {
        Square::from_coords(self.file().0 as i8 + df, self.rank().0 as i8 + dr)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

/// The reason why parsing a [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse square")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => {
                let file = File::from_char(f).ok_or(ParseSquareError)?;
                let rank = Rank::from_char(r).ok_or(ParseSquareError)?;
                Ok(Square::new(file, rank))
            }
            _ => Err(ParseSquareError),
        }
    }
}

/// A set of squares packed into a 64-bit integer.
/// Iteration is always in ascending square order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// An empty set.
    pub const EMPTY: Self = SquareSet(0);

    /// Returns true if the given square is in the set.
    pub const fn contains(self, square: Square) -> bool {
        (self.0 & (1u64 << square.0)) != 0
    }

    /// Adds a square to the set.
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.0;
    }

    /// Returns the number of squares in the set.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if no squares are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of two sets.
    pub const fn union(self, other: Self) -> Self {
        SquareSet(self.0 | other.0)
    }

    /// Returns an iterator over the squares in the set.
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter { bits: self.0 }
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the squares of a [`SquareSet`].
pub struct SquareSetIter {
    bits: u64,
}

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let index = self.bits.trailing_zeros() as u8;
            self.bits &= self.bits - 1; // Clear lowest set bit
            Some(Square(index))
        }
    }
}

/// The two wings a king can castle towards.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum Castle {
    #[display(fmt = "O-O")]
    Kingside,
    #[display(fmt = "O-O-O")]
    Queenside,
}

impl Castle {
    pub const ALL: [Castle; 2] = [Castle::Kingside, Castle::Queenside];

    /// File direction from the king towards the rook.
    pub const fn direction(self) -> i8 {
        match self {
            Castle::Kingside => 1,
            Castle::Queenside => -1,
        }
    }

    /// Signed file distance from the king to the rook it castles with.
    pub const fn rook_offset(self) -> i8 {
        match self {
            Castle::Kingside => 3,
            Castle::Queenside => -4,
        }
    }

    /// The wing a king move castles towards, if it spans exactly two files.
    pub const fn from_king_move(from: Square, to: Square) -> Option<Self> {
        if from.rank().0 != to.rank().0 {
            return None;
        }

        match to.file().0 as i8 - from.file().0 as i8 {
            2 => Some(Castle::Kingside),
            -2 => Some(Castle::Queenside),
            _ => None,
        }
    }
}

/// A move from one square to another.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a move.
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// The reason why parsing a [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse move")]
pub struct ParseMoveError;

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || s.len() != 4 {
            return Err(ParseMoveError);
        }

        let from = s[..2].parse().map_err(|_| ParseMoveError)?;
        let to = s[2..].parse().map_err(|_| ParseMoveError)?;
        Ok(Move::new(from, to))
    }
}
