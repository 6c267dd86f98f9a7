use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Player, Square};

pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// True when `square` holds a piece owned by `owner`.
#[inline]
pub fn own_piece_on(board: &BoardState, owner: Player, square: Square) -> bool {
    matches!(board.get(square), Some((_, o)) if o == owner)
}

/// Push `to` unless it holds one of `owner`'s pieces.
#[inline]
pub fn push_unless_own(board: &BoardState, owner: Player, to: Square, out: &mut Vec<Square>) {
    if !own_piece_on(board, owner, to) {
        out.push(to);
    }
}

/// Number of occupied squares strictly between `a` and `b` when they share a
/// row or column; `None` when they are not aligned.
pub fn pieces_between(board: &BoardState, a: Square, b: Square) -> Option<usize> {
    if a == b || (a.row() != b.row() && a.col() != b.col()) {
        return None;
    }

    let step_r = (b.row() - a.row()).signum();
    let step_c = (b.col() - a.col()).signum();
    let mut count = 0;
    let mut current = a.offset(step_r, step_c)?;
    while current != b {
        if board.is_occupied(current) {
            count += 1;
        }
        current = current.offset(step_r, step_c)?;
    }
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::pieces_between;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::Square;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn counts_pieces_on_rows_and_columns() {
        let board = BoardState::standard_opening();
        // Red cannon (7,1) to black horse (0,1): black cannon at (2,1) only.
        assert_eq!(pieces_between(&board, sq(7, 1), sq(0, 1)), Some(1));
        // Along Red's back rank from chariot to chariot.
        assert_eq!(pieces_between(&board, sq(9, 0), sq(9, 8)), Some(7));
        assert_eq!(pieces_between(&board, sq(5, 0), sq(4, 0)), Some(0));
        assert_eq!(pieces_between(&board, sq(9, 0), sq(8, 1)), None);
        assert_eq!(pieces_between(&board, sq(9, 0), sq(9, 0)), None);
    }
}
