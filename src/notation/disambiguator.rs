//! Picks the physical piece a notation token refers to.
//!
//! Two paths: an explicit 前/中/后 qualifier orders candidates by how far
//! they have advanced, and a bare road holding several matching pieces falls
//! back to "first structurally legal, else first" in board order.

use std::collections::BTreeMap;

use crate::errors::{DecodeError, DecodeResult};
use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Piece, Player, PositionQualifier};
use crate::move_generation::destination::compute_destination;
use crate::move_generation::legal_move_generator::is_rule_legal;
use crate::notation::grammar::NotationToken;

/// Sort key that puts `owner`'s most advanced piece first: 前 names the piece
/// nearest the opponent (Red: smallest row, Black: largest row).
#[inline]
fn forwardness_key(piece: &Piece, owner: Player) -> i32 {
    -i32::from(owner.forward()) * i32::from(piece.square.row())
}

/// Narrow candidates to the single column holding two or more of them.
/// `Err` carries the number of columns that do when there is more than one.
fn stacked_column(candidates: &[Piece]) -> Result<Vec<Piece>, usize> {
    let mut by_column: BTreeMap<i8, Vec<Piece>> = BTreeMap::new();
    for piece in candidates {
        by_column.entry(piece.square.col()).or_default().push(*piece);
    }
    let mut stacked: Vec<Vec<Piece>> = by_column.into_values().filter(|v| v.len() >= 2).collect();
    match stacked.len() {
        0 => Ok(candidates.to_vec()),
        1 => Ok(stacked.remove(0)),
        n => Err(n),
    }
}

pub fn select_by_qualifier(
    candidates: &[Piece],
    token: &NotationToken,
    owner: Player,
    qualifier: PositionQualifier,
) -> DecodeResult<Piece> {
    let ambiguous = |count: usize| DecodeError::AmbiguousReference {
        piece_type: token.piece_type,
        owner,
        candidates: count,
        text: String::new(),
    };

    match candidates {
        [] => return Err(ambiguous(0)),
        [only] => return Ok(*only),
        _ => {}
    }

    let mut pool = stacked_column(candidates).map_err(|_| ambiguous(candidates.len()))?;
    pool.sort_by_key(|piece| forwardness_key(piece, owner));

    let last = pool.len() - 1;
    let (index, neighbours): (usize, &[usize]) = match qualifier {
        PositionQualifier::Front => (0, &[1]),
        PositionQualifier::Rear => (last, &[last - 1]),
        PositionQualifier::Middle if pool.len() == 3 => (1, &[0, 2]),
        PositionQualifier::Middle => return Err(ambiguous(pool.len())),
    };

    let chosen = pool[index];
    let tied = neighbours
        .iter()
        .any(|&n| pool[n].square.row() == chosen.square.row());
    if tied {
        return Err(ambiguous(pool.len()));
    }
    Ok(chosen)
}

/// First candidate whose stated move is structurally legal, else the first
/// candidate so validation can report the exact failure.
pub fn select_heuristic(
    candidates: &[Piece],
    token: &NotationToken,
    board: &BoardState,
) -> Option<Piece> {
    candidates
        .iter()
        .find(|piece| {
            compute_destination(piece.square, piece.owner, piece.piece_type, token.verb, token.magnitude)
                .is_ok_and(|to| is_rule_legal(piece, to, board))
        })
        .or_else(|| candidates.first())
        .copied()
}
