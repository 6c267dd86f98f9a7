//! Xiangqi FEN-to-BoardState parser.
//!
//! The first rank of the layout is row 0 (Black's back rank). Uppercase
//! letters are Red, lowercase Black. Both the `n`/`b` and `h`/`e` letter sets
//! are accepted for horse and elephant.

use crate::errors::FenError;
use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::{BOARD_COLS, BOARD_ROWS};
use crate::game_state::xiangqi_types::{PieceType, Player, Square};

/// Parse a board layout plus optional side-to-move field. A missing side
/// field means Red to move.
pub fn parse_fen(fen: &str) -> Result<(BoardState, Player), FenError> {
    let mut parts = fen.split_whitespace();
    let board_part = parts.next().unwrap_or_default();
    let side = match parts.next() {
        None => Player::Red,
        Some(field) => parse_side_to_move(field)?,
    };

    Ok((parse_board(board_part)?, side))
}

fn parse_board(board_part: &str) -> Result<BoardState, FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != BOARD_ROWS as usize {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let mut board = BoardState::new_empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=9).contains(&empty_count) {
                    return Err(FenError::PieceChar { ch });
                }
                col += empty_count as usize;
                if col > BOARD_COLS as usize {
                    return Err(FenError::FileCount { rank: row });
                }
                continue;
            }

            let (piece_type, owner) = piece_from_fen_char(ch).ok_or(FenError::PieceChar { ch })?;
            let square = Square::new(row as i8, col as i8)
                .filter(|_| col < BOARD_COLS as usize)
                .ok_or(FenError::FileCount { rank: row })?;
            board.set(square, Some((piece_type, owner)));
            col += 1;
        }

        if col != BOARD_COLS as usize {
            return Err(FenError::FileCount { rank: row });
        }
    }

    Ok(board)
}

fn parse_side_to_move(field: &str) -> Result<Player, FenError> {
    match field {
        "w" | "r" => Ok(Player::Red),
        "b" => Ok(Player::Black),
        _ => Err(FenError::SideToMove {
            field: field.to_owned(),
        }),
    }
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<(PieceType, Player)> {
    let owner = if ch.is_ascii_uppercase() {
        Player::Red
    } else if ch.is_ascii_lowercase() {
        Player::Black
    } else {
        return None;
    };

    let piece_type = match ch.to_ascii_lowercase() {
        'k' => PieceType::General,
        'a' => PieceType::Advisor,
        'b' | 'e' => PieceType::Elephant,
        'n' | 'h' => PieceType::Horse,
        'r' => PieceType::Chariot,
        'c' => PieceType::Cannon,
        'p' => PieceType::Soldier,
        _ => return None,
    };

    Some((piece_type, owner))
}
