//! Canonical Xiangqi rule constants and board-region predicates.
//!
//! Holds the starting-position FEN and the palace / river geometry consulted
//! by the per-piece move generators.

use crate::game_state::xiangqi_types::{Player, Square};

pub const BOARD_ROWS: i8 = 10;
pub const BOARD_COLS: i8 = 9;
pub const BOARD_SQUARES: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// Standard opening position. The first rank is row 0 (Black's back rank).
pub const STARTING_POSITION_FEN: &str =
    "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

#[inline]
pub fn in_palace(square: Square, owner: Player) -> bool {
    let rows = match owner {
        Player::Red => 7..=9,
        Player::Black => 0..=2,
    };
    rows.contains(&square.row()) && (3..=5).contains(&square.col())
}

/// True when `square` lies on `owner`'s side of the river.
#[inline]
pub fn on_own_side(square: Square, owner: Player) -> bool {
    match owner {
        Player::Red => square.row() >= 5,
        Player::Black => square.row() <= 4,
    }
}

#[cfg(test)]
mod tests {
    use super::{in_palace, on_own_side};
    use crate::game_state::xiangqi_types::{Player, Square};

    #[test]
    fn palace_and_river_geometry() {
        let red_general = Square::new(9, 4).expect("on board");
        let black_general = Square::new(0, 4).expect("on board");
        assert!(in_palace(red_general, Player::Red));
        assert!(!in_palace(red_general, Player::Black));
        assert!(in_palace(black_general, Player::Black));
        assert!(!in_palace(Square::new(8, 2).expect("on board"), Player::Red));

        assert!(on_own_side(Square::new(5, 0).expect("on board"), Player::Red));
        assert!(!on_own_side(Square::new(4, 0).expect("on board"), Player::Red));
        assert!(on_own_side(Square::new(4, 0).expect("on board"), Player::Black));
    }
}
