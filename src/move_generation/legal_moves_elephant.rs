//! Elephant destinations: two diagonal steps, blocked by an occupied eye,
//! never across the river.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::on_own_side;
use crate::game_state::xiangqi_types::{Player, Square};
use crate::move_generation::legal_move_shared::{push_unless_own, DIAGONAL};

pub fn generate_elephant_destinations(
    board: &BoardState,
    from: Square,
    owner: Player,
    out: &mut Vec<Square>,
) {
    for (d_row, d_col) in DIAGONAL {
        let Some(eye) = from.offset(d_row, d_col) else {
            continue;
        };
        if board.is_occupied(eye) {
            continue;
        }
        if let Some(to) = from.offset(2 * d_row, 2 * d_col) {
            if on_own_side(to, owner) {
                push_unless_own(board, owner, to, out);
            }
        }
    }
}

/// The eye square between `from` and a two-step diagonal `to`.
#[inline]
pub fn elephant_eye(from: Square, to: Square) -> Option<Square> {
    let d_row = to.row() - from.row();
    let d_col = to.col() - from.col();
    if d_row.abs() != 2 || d_col.abs() != 2 {
        return None;
    }
    from.offset(d_row / 2, d_col / 2)
}
