//! Advisor destinations: one diagonal step inside the palace.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::in_palace;
use crate::game_state::xiangqi_types::{Player, Square};
use crate::move_generation::legal_move_shared::{push_unless_own, DIAGONAL};

pub fn generate_advisor_destinations(
    board: &BoardState,
    from: Square,
    owner: Player,
    out: &mut Vec<Square>,
) {
    for (d_row, d_col) in DIAGONAL {
        if let Some(to) = from.offset(d_row, d_col) {
            if in_palace(to, owner) {
                push_unless_own(board, owner, to, out);
            }
        }
    }
}
