//! Perft node counting over fully legal moves.
//!
//! Used to validate the move generator against published Xiangqi counts
//! (start position: 44, 1920, 79666, ...).

use std::panic;
use std::thread;

use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::Player;
use crate::move_generation::legal_move_checks::{is_checkmate, is_in_check};
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(board: &BoardState, side_to_move: Player, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }
    let mut total = PerftCounts::default();
    perft_recurse(board, side_to_move, depth, &mut total);
    total
}

/// Same counts as [`perft`], with each root move searched on its own thread.
pub fn perft_parallel(board: &BoardState, side_to_move: Player, depth: u8) -> PerftCounts {
    if depth <= 1 {
        return perft(board, side_to_move, depth);
    }

    let root_moves = legal_moves(side_to_move, board);
    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|&(from, to)| {
                let next = board.with_move_unchecked(from, to);
                scope.spawn(move || perft(&next, side_to_move.opposite(), depth - 1))
            })
            .collect();
        merge_joined(handles.into_iter().map(|handle| handle.join()))
    })
}

/// Sum worker results. A panicked worker's panic is re-raised on the caller
/// so a partial total is never returned.
fn merge_joined(results: impl Iterator<Item = thread::Result<PerftCounts>>) -> PerftCounts {
    let mut total = PerftCounts::default();
    for result in results {
        match result {
            Ok(local) => total.merge(local),
            Err(payload) => panic::resume_unwind(payload),
        }
    }
    total
}

fn perft_recurse(board: &BoardState, side: Player, depth: u8, counts: &mut PerftCounts) {
    for (from, to) in legal_moves(side, board) {
        let next = board.with_move_unchecked(from, to);
        if depth == 1 {
            counts.nodes += 1;
            if board.is_occupied(to) {
                counts.captures += 1;
            }
            let opponent = side.opposite();
            if is_in_check(opponent, &next) {
                counts.checks += 1;
                if is_checkmate(opponent, &next) {
                    counts.checkmates += 1;
                }
            }
        } else {
            perft_recurse(&next, side.opposite(), depth - 1, counts);
        }
    }
}
