//! Horse destinations: the eight "day-shape" jumps, each vetoed by an
//! occupied leg square.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Player, Square};
use crate::move_generation::legal_move_shared::push_unless_own;

/// (jump, leg) offsets as (row, col).
const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((2, -1), (1, 0)),
    ((2, 1), (1, 0)),
    ((-1, -2), (0, -1)),
    ((1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((1, 2), (0, 1)),
];

pub fn generate_horse_destinations(
    board: &BoardState,
    from: Square,
    owner: Player,
    out: &mut Vec<Square>,
) {
    for ((d_row, d_col), (leg_row, leg_col)) in HORSE_JUMPS {
        let Some(leg) = from.offset(leg_row, leg_col) else {
            continue;
        };
        if board.is_occupied(leg) {
            continue;
        }
        if let Some(to) = from.offset(d_row, d_col) {
            push_unless_own(board, owner, to, out);
        }
    }
}

/// The leg square for a jump from `from` to `to`, if the two form a horse
/// move at all.
pub fn horse_leg(from: Square, to: Square) -> Option<Square> {
    let d_row = to.row() - from.row();
    let d_col = to.col() - from.col();
    match (d_row.abs(), d_col.abs()) {
        (2, 1) => from.offset(d_row / 2, 0),
        (1, 2) => from.offset(0, d_col / 2),
        _ => None,
    }
}
