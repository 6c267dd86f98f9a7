use crate::game_state::board_state::{facing_generals_column, BoardState};
use crate::game_state::xiangqi_types::{PieceType, Player, Square};
use crate::move_generation::legal_move_generator::{generate_destinations, legal_moves};

#[inline]
pub fn general_square(board: &BoardState, player: Player) -> Option<Square> {
    board.find_general(player)
}

/// True when any opposing piece can reach `player`'s general. A board with
/// no general for `player` is never in check.
pub fn is_in_check(player: Player, board: &BoardState) -> bool {
    let Some(general) = general_square(board, player) else {
        return false;
    };
    is_square_attacked(board, general, player.opposite())
}

pub fn is_square_attacked(board: &BoardState, square: Square, attacker: Player) -> bool {
    let mut scratch = Vec::with_capacity(17);
    board.pieces_of(attacker).any(|piece| {
        scratch.clear();
        generate_destinations(piece.piece_type, attacker, piece.square, board, &mut scratch);
        scratch.contains(&square)
    })
}

pub fn attackers_to_square(
    board: &BoardState,
    square: Square,
    attacker: Player,
) -> Vec<(Square, PieceType)> {
    let mut scratch = Vec::with_capacity(17);
    let mut attackers = Vec::new();
    for piece in board.pieces_of(attacker) {
        scratch.clear();
        generate_destinations(piece.piece_type, attacker, piece.square, board, &mut scratch);
        if scratch.contains(&square) {
            attackers.push((piece.square, piece.piece_type));
        }
    }
    attackers
}

/// In check with no move that escapes it. Trial moves are applied to board
/// copies, so `board` is never modified.
pub fn is_checkmate(player: Player, board: &BoardState) -> bool {
    is_in_check(player, board) && legal_moves(player, board).is_empty()
}

/// Both generals on one column with nothing between them: an illegal
/// position the move applier must reject.
#[inline]
pub fn facing_generals(board: &BoardState) -> bool {
    facing_generals_column(board).is_some()
}

#[cfg(test)]
mod tests {
    use super::{attackers_to_square, facing_generals, is_checkmate, is_in_check};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::{PieceType, Player, Square};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn opening_is_quiet() {
        let board = BoardState::standard_opening();
        assert!(!is_in_check(Player::Red, &board));
        assert!(!is_in_check(Player::Black, &board));
        assert!(!facing_generals(&board));
    }

    #[test]
    fn generals_on_open_file_face_each_other() {
        let board = BoardState::new_empty()
            .with_piece(sq(9, 4), PieceType::General, Player::Red)
            .with_piece(sq(0, 4), PieceType::General, Player::Black);
        assert!(facing_generals(&board));

        let screened = board.with_piece(sq(4, 4), PieceType::Soldier, Player::Red);
        assert!(!facing_generals(&screened));
    }

    #[test]
    fn cannon_check_needs_a_screen() {
        let base = BoardState::new_empty()
            .with_piece(sq(0, 4), PieceType::General, Player::Black)
            .with_piece(sq(9, 3), PieceType::General, Player::Red)
            .with_piece(sq(5, 4), PieceType::Cannon, Player::Red);
        assert!(!is_in_check(Player::Black, &base));

        let screened = base.with_piece(sq(2, 4), PieceType::Horse, Player::Black);
        assert!(is_in_check(Player::Black, &screened));
        assert_eq!(
            attackers_to_square(&screened, sq(0, 4), Player::Red),
            vec![(sq(5, 4), PieceType::Cannon)]
        );
    }

    #[test]
    fn double_chariot_mate() {
        // Black general trapped on its back rank by two chariots.
        let board = BoardState::new_empty()
            .with_piece(sq(0, 4), PieceType::General, Player::Black)
            .with_piece(sq(9, 3), PieceType::General, Player::Red)
            .with_piece(sq(0, 0), PieceType::Chariot, Player::Red)
            .with_piece(sq(1, 8), PieceType::Chariot, Player::Red);
        assert!(is_in_check(Player::Black, &board));
        assert!(is_checkmate(Player::Black, &board));
        assert!(!is_checkmate(Player::Red, &board));
    }

    #[test]
    fn check_with_escape_is_not_mate() {
        let board = BoardState::new_empty()
            .with_piece(sq(0, 4), PieceType::General, Player::Black)
            .with_piece(sq(9, 3), PieceType::General, Player::Red)
            .with_piece(sq(0, 0), PieceType::Chariot, Player::Red);
        let before = board;
        assert!(is_in_check(Player::Black, &board));
        assert!(!is_checkmate(Player::Black, &board));
        assert_eq!(board, before);
    }
}
