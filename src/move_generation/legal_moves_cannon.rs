//! Cannon destinations: orthogonal slides over empty squares, captures only
//! by jumping exactly one screen.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Player, Square};
use crate::move_generation::legal_move_shared::{own_piece_on, ORTHOGONAL};

pub fn generate_cannon_destinations(
    board: &BoardState,
    from: Square,
    owner: Player,
    out: &mut Vec<Square>,
) {
    for (d_row, d_col) in ORTHOGONAL {
        let mut current = from;
        let mut screened = false;
        while let Some(to) = current.offset(d_row, d_col) {
            current = to;
            if !screened {
                if board.is_occupied(to) {
                    screened = true;
                } else {
                    out.push(to);
                }
            } else if board.is_occupied(to) {
                if !own_piece_on(board, owner, to) {
                    out.push(to);
                }
                break;
            }
        }
    }
}
