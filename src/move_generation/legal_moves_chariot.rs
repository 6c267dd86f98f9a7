//! Chariot destinations: orthogonal slides up to and including the first
//! enemy piece.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Player, Square};
use crate::move_generation::legal_move_shared::{own_piece_on, ORTHOGONAL};

pub fn generate_chariot_destinations(
    board: &BoardState,
    from: Square,
    owner: Player,
    out: &mut Vec<Square>,
) {
    for (d_row, d_col) in ORTHOGONAL {
        let mut current = from;
        while let Some(to) = current.offset(d_row, d_col) {
            if board.is_occupied(to) {
                if !own_piece_on(board, owner, to) {
                    out.push(to);
                }
                break;
            }
            out.push(to);
            current = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_chariot_destinations;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::{Player, Square};

    #[test]
    fn open_board_chariot_covers_row_and_column() {
        let board = BoardState::new_empty();
        let mut out = Vec::new();
        let from = Square::new(4, 4).expect("on board");
        generate_chariot_destinations(&board, from, Player::Red, &mut out);
        assert_eq!(out.len(), 9 + 8);
    }

    #[test]
    fn opening_chariot_stops_before_own_soldier() {
        let board = BoardState::standard_opening();
        let mut out = Vec::new();
        let from = Square::new(9, 0).expect("on board");
        generate_chariot_destinations(&board, from, Player::Red, &mut out);
        out.sort();
        assert_eq!(
            out,
            vec![
                Square::new(7, 0).expect("on board"),
                Square::new(8, 0).expect("on board")
            ]
        );
    }
}
