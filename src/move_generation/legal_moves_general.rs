//! General destinations: one orthogonal step inside the palace.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::in_palace;
use crate::game_state::xiangqi_types::{Player, Square};
use crate::move_generation::legal_move_shared::{push_unless_own, ORTHOGONAL};

pub fn generate_general_destinations(
    board: &BoardState,
    from: Square,
    owner: Player,
    out: &mut Vec<Square>,
) {
    for (d_row, d_col) in ORTHOGONAL {
        if let Some(to) = from.offset(d_row, d_col) {
            if in_palace(to, owner) {
                push_unless_own(board, owner, to, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_general_destinations;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::{Player, Square};

    #[test]
    fn opening_general_can_only_step_forward() {
        let board = BoardState::standard_opening();
        let mut out = Vec::new();
        let from = Square::new(9, 4).expect("on board");
        generate_general_destinations(&board, from, Player::Red, &mut out);
        assert_eq!(out, vec![Square::new(8, 4).expect("on board")]);
    }

    #[test]
    fn general_stays_inside_palace() {
        let board = BoardState::new_empty();
        let mut out = Vec::new();
        let corner = Square::new(2, 3).expect("on board");
        generate_general_destinations(&board, corner, Player::Black, &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|sq| sq.row() <= 2 && (3..=5).contains(&sq.col())));
    }
}
