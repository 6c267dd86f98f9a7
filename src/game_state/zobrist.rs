//! Zobrist hashing for board fingerprints.
//!
//! Keys come from a fixed-seed `StdRng` so fingerprints are stable within a
//! process, which is all the decode cache needs.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::BOARD_SQUARES;
use crate::game_state::xiangqi_types::{PieceType, Player, Square};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; BOARD_SQUARES]; 7]; 2],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut piece_square = [[[0u64; BOARD_SQUARES]; 7]; 2];
    for owner in &mut piece_square {
        for piece in owner {
            for key in piece {
                *key = rng.random::<u64>();
            }
        }
    }
    ZobristTables { piece_square }
}

#[inline]
pub fn piece_square_key(owner: Player, piece_type: PieceType, square: Square) -> u64 {
    tables().piece_square[owner.index()][piece_type.index()][square.index()]
}

pub fn board_key(board: &BoardState) -> u64 {
    board.pieces().fold(0u64, |key, piece| {
        key ^ piece_square_key(piece.owner, piece.piece_type, piece.square)
    })
}
