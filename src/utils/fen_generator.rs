//! BoardState-to-FEN generator, the inverse of `fen_parser`.

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::{BOARD_COLS, BOARD_ROWS};
use crate::game_state::xiangqi_types::{PieceType, Player, Square};

pub fn generate_fen(board: &BoardState, side_to_move: Player) -> String {
    let mut ranks = Vec::<String>::with_capacity(BOARD_ROWS as usize);

    for row in 0..BOARD_ROWS {
        let mut rank = String::new();
        let mut empty = 0;
        for col in 0..BOARD_COLS {
            match Square::new(row, col).and_then(|square| board.get(square)) {
                Some((piece_type, owner)) => {
                    if empty > 0 {
                        rank.push_str(&empty.to_string());
                        empty = 0;
                    }
                    rank.push(piece_to_fen_char(piece_type, owner));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            rank.push_str(&empty.to_string());
        }
        ranks.push(rank);
    }

    let side = match side_to_move {
        Player::Red => 'w',
        Player::Black => 'b',
    };
    format!("{} {side}", ranks.join("/"))
}

fn piece_to_fen_char(piece_type: PieceType, owner: Player) -> char {
    let ch = match piece_type {
        PieceType::General => 'k',
        PieceType::Advisor => 'a',
        PieceType::Elephant => 'b',
        PieceType::Horse => 'n',
        PieceType::Chariot => 'r',
        PieceType::Cannon => 'c',
        PieceType::Soldier => 'p',
    };
    match owner {
        Player::Red => ch.to_ascii_uppercase(),
        Player::Black => ch,
    }
}
