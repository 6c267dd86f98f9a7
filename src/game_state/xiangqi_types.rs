//! Core value types shared by the board, the move generator and the notation
//! decoder.
//!
//! Squares use `(row, col)` with row 0 on Black's back rank and row 9 on Red's
//! back rank. Everything here is `Copy` except [`Move`], which keeps the text
//! it was decoded from.

use std::fmt;

use crate::game_state::xiangqi_rules::{BOARD_COLS, BOARD_ROWS};

/// Side owning a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Red, Player::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// Row delta of one step toward the opponent.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Player::Red => -1,
            Player::Black => 1,
        }
    }

    /// Row of this player's back rank.
    #[inline]
    pub const fn back_rank(self) -> i8 {
        match self {
            Player::Red => BOARD_ROWS - 1,
            Player::Black => 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "red"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// Piece kind; colour lives separately on [`Player`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::General,
        PieceType::Advisor,
        PieceType::Elephant,
        PieceType::Horse,
        PieceType::Chariot,
        PieceType::Cannon,
        PieceType::Soldier,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceType::General => 0,
            PieceType::Advisor => 1,
            PieceType::Elephant => 2,
            PieceType::Horse => 3,
            PieceType::Chariot => 4,
            PieceType::Cannon => 5,
            PieceType::Soldier => 6,
        }
    }

    /// Pieces whose advance/retreat magnitude counts steps rather than naming
    /// a target road.
    #[inline]
    pub const fn moves_in_steps(self) -> bool {
        matches!(
            self,
            PieceType::General | PieceType::Chariot | PieceType::Cannon | PieceType::Soldier
        )
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::General => "general",
            PieceType::Advisor => "advisor",
            PieceType::Elephant => "elephant",
            PieceType::Horse => "horse",
            PieceType::Chariot => "chariot",
            PieceType::Cannon => "cannon",
            PieceType::Soldier => "soldier",
        };
        write!(f, "{name}")
    }
}

/// A point on the 10x9 board. Only the checked constructors build one, so a
/// `Square` is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    #[inline]
    pub fn new(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_ROWS).contains(&row) && (0..BOARD_COLS).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        let cols = BOARD_COLS as usize;
        if index >= cols * BOARD_ROWS as usize {
            return None;
        }
        Self::new((index / cols) as i8, (index % cols) as i8)
    }

    #[inline]
    pub const fn row(self) -> i8 {
        self.row as i8
    }

    #[inline]
    pub const fn col(self) -> i8 {
        self.col as i8
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_COLS as usize + self.col as usize
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::new(self.row() + d_row, self.col() + d_col)
    }

    /// Iterate every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).filter_map(move |col| Square::new(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A piece found on the board together with where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub owner: Player,
    pub square: Square,
}

/// Direction verb of a road-notation move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Advance,
    Retreat,
    Traverse,
}

/// Explicit multi-piece qualifier (前 / 中 / 后).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionQualifier {
    Front,
    Middle,
    Rear,
}

/// A fully resolved move, the sole output of the decode pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece_type: PieceType,
    pub owner: Player,
    pub from: Square,
    pub to: Square,
    pub verb: Verb,
    pub raw_text: String,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {} ({})",
            self.owner, self.piece_type, self.from, self.to, self.raw_text
        )
    }
}
