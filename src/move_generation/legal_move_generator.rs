//! Legal destination enumeration.
//!
//! `legal_destinations` applies every per-piece shape rule (blocking, screen,
//! leg, eye, palace, river, own-piece) and is what check detection and the
//! heuristic disambiguator consume. `legal_moves` additionally filters moves
//! that leave the mover's general attacked or facing the other general.

use std::collections::BTreeSet;

use crate::game_state::board_state::{facing_generals_column, BoardState};
use crate::game_state::xiangqi_types::{Piece, PieceType, Player, Square};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_moves_advisor::generate_advisor_destinations;
use crate::move_generation::legal_moves_cannon::generate_cannon_destinations;
use crate::move_generation::legal_moves_chariot::generate_chariot_destinations;
use crate::move_generation::legal_moves_elephant::generate_elephant_destinations;
use crate::move_generation::legal_moves_general::generate_general_destinations;
use crate::move_generation::legal_moves_horse::generate_horse_destinations;
use crate::move_generation::legal_moves_soldier::generate_soldier_destinations;

/// Push rule-legal destinations for one piece into `out`.
pub fn generate_destinations(
    piece_type: PieceType,
    owner: Player,
    from: Square,
    board: &BoardState,
    out: &mut Vec<Square>,
) {
    match piece_type {
        PieceType::General => generate_general_destinations(board, from, owner, out),
        PieceType::Advisor => generate_advisor_destinations(board, from, owner, out),
        PieceType::Elephant => generate_elephant_destinations(board, from, owner, out),
        PieceType::Horse => generate_horse_destinations(board, from, owner, out),
        PieceType::Chariot => generate_chariot_destinations(board, from, owner, out),
        PieceType::Cannon => generate_cannon_destinations(board, from, owner, out),
        PieceType::Soldier => generate_soldier_destinations(board, from, owner, out),
    }
}

pub fn legal_destinations(
    piece_type: PieceType,
    owner: Player,
    square: Square,
    board: &BoardState,
) -> BTreeSet<Square> {
    let mut out = Vec::with_capacity(17);
    generate_destinations(piece_type, owner, square, board, &mut out);
    out.into_iter().collect()
}

#[inline]
pub fn is_rule_legal(piece: &Piece, to: Square, board: &BoardState) -> bool {
    let mut out = Vec::with_capacity(17);
    generate_destinations(piece.piece_type, piece.owner, piece.square, board, &mut out);
    out.contains(&to)
}

/// Every move `player` may make without exposing their general.
pub fn legal_moves(player: Player, board: &BoardState) -> Vec<(Square, Square)> {
    let mut moves = Vec::with_capacity(64);
    let mut scratch = Vec::with_capacity(17);

    for piece in board.pieces_of(player) {
        scratch.clear();
        generate_destinations(piece.piece_type, player, piece.square, board, &mut scratch);
        for &to in &scratch {
            let next = board.with_move_unchecked(piece.square, to);
            if is_in_check(player, &next) || facing_generals_column(&next).is_some() {
                continue;
            }
            moves.push((piece.square, to));
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::{legal_destinations, legal_moves};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::{PieceType, Player, Square};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn opening_position_has_forty_four_moves_each() {
        let board = BoardState::standard_opening();
        assert_eq!(legal_moves(Player::Red, &board).len(), 44);
        assert_eq!(legal_moves(Player::Black, &board).len(), 44);
    }

    #[test]
    fn destinations_never_leave_the_board() {
        let board = BoardState::standard_opening();
        for piece in board.pieces() {
            for to in legal_destinations(piece.piece_type, piece.owner, piece.square, &board) {
                assert!((0..=9).contains(&to.row()));
                assert!((0..=8).contains(&to.col()));
            }
        }
    }

    #[test]
    fn pinned_chariot_may_not_leave_the_file() {
        let board = BoardState::new_empty()
            .with_piece(sq(9, 4), PieceType::General, Player::Red)
            .with_piece(sq(5, 4), PieceType::Chariot, Player::Red)
            .with_piece(sq(0, 4), PieceType::Chariot, Player::Black)
            .with_piece(sq(0, 3), PieceType::General, Player::Black);
        let chariot_moves: Vec<_> = legal_moves(Player::Red, &board)
            .into_iter()
            .filter(|(from, _)| *from == sq(5, 4))
            .collect();
        assert!(!chariot_moves.is_empty());
        assert!(chariot_moves.iter().all(|(_, to)| to.col() == 4));
    }
}
