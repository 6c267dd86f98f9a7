//! Soldier destinations: one step forward, plus sideways steps once across
//! the river.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::on_own_side;
use crate::game_state::xiangqi_types::{Player, Square};
use crate::move_generation::legal_move_shared::push_unless_own;

pub fn generate_soldier_destinations(
    board: &BoardState,
    from: Square,
    owner: Player,
    out: &mut Vec<Square>,
) {
    if let Some(to) = from.offset(owner.forward(), 0) {
        push_unless_own(board, owner, to, out);
    }
    if !on_own_side(from, owner) {
        for d_col in [-1, 1] {
            if let Some(to) = from.offset(0, d_col) {
                push_unless_own(board, owner, to, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_soldier_destinations;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::{Player, Square};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn soldier_moves_forward_before_river() {
        let board = BoardState::new_empty();
        let mut out = Vec::new();
        generate_soldier_destinations(&board, sq(6, 4), Player::Red, &mut out);
        assert_eq!(out, vec![sq(5, 4)]);

        out.clear();
        generate_soldier_destinations(&board, sq(3, 4), Player::Black, &mut out);
        assert_eq!(out, vec![sq(4, 4)]);
    }

    #[test]
    fn crossed_soldier_gains_sideways_steps() {
        let board = BoardState::new_empty();
        let mut out = Vec::new();
        generate_soldier_destinations(&board, sq(4, 4), Player::Red, &mut out);
        assert_eq!(out, vec![sq(3, 4), sq(4, 3), sq(4, 5)]);

        out.clear();
        generate_soldier_destinations(&board, sq(0, 0), Player::Red, &mut out);
        assert_eq!(out, vec![sq(0, 1)]);
    }
}
