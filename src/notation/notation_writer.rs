//! Writes moves back to road notation.
//!
//! Red is written with Chinese numerals and Black with Arabic digits. Pieces
//! sharing a road with a piece of the same type are named with 前/中/后; the
//! road is kept in that form only when another road also holds a stack.

use std::collections::BTreeMap;

use crate::errors::WriteError;
use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Move, Player, PositionQualifier, Square, Verb};
use crate::notation::glyphs::{numeral_glyph, piece_glyph, qualifier_glyph, verb_glyph};
use crate::notation::road_coordinates::column_to_road;

fn numeral(value: u8, owner: Player, from: Square, to: Square) -> Result<char, WriteError> {
    numeral_glyph(value, owner).ok_or(WriteError::NullMove { from, to })
}

fn road_of(owner: Player, square: Square) -> u8 {
    // Columns of an on-board square are always 0..=8.
    column_to_road(owner, i32::from(square.col())).unwrap_or_default()
}

/// Canonical notation for moving the piece on `from` to `to`.
pub fn write_notation(board: &BoardState, from: Square, to: Square) -> Result<String, WriteError> {
    let piece = board
        .piece_at(from)
        .ok_or(WriteError::EmptySource { square: from })?;
    let owner = piece.owner;
    if from == to {
        return Err(WriteError::NullMove { from, to });
    }

    let row_delta = to.row() - from.row();
    let verb = match row_delta.signum() {
        0 => Verb::Traverse,
        s if s == owner.forward() => Verb::Advance,
        _ => Verb::Retreat,
    };
    let magnitude = if piece.piece_type.moves_in_steps() && verb != Verb::Traverse {
        row_delta.unsigned_abs()
    } else {
        road_of(owner, to)
    };

    let mut columns: BTreeMap<i8, Vec<Square>> = BTreeMap::new();
    for other in board.pieces_of_type(piece.piece_type, owner) {
        columns.entry(other.square.col()).or_default().push(other.square);
    }
    let stacks = columns.values().filter(|v| v.len() >= 2).count();
    let mut same_road = columns.remove(&from.col()).unwrap_or_default();

    let mut text = String::new();
    if same_road.len() >= 2 {
        same_road.sort_by_key(|sq| -i32::from(owner.forward()) * i32::from(sq.row()));
        let index = same_road.iter().position(|&sq| sq == from).unwrap_or_default();
        let qualifier = match (index, same_road.len()) {
            (0, _) => PositionQualifier::Front,
            (i, n) if i == n - 1 => PositionQualifier::Rear,
            (1, 3) => PositionQualifier::Middle,
            (_, n) => {
                return Err(WriteError::Unnameable {
                    square: from,
                    stacked: n,
                })
            }
        };
        text.push(qualifier_glyph(qualifier));
        text.push(piece_glyph(piece.piece_type, owner));
        if stacks > 1 {
            text.push(numeral(road_of(owner, from), owner, from, to)?);
        }
    } else {
        text.push(piece_glyph(piece.piece_type, owner));
        text.push(numeral(road_of(owner, from), owner, from, to)?);
    }
    text.push(verb_glyph(verb));
    text.push(numeral(magnitude, owner, from, to)?);
    Ok(text)
}

/// Notation for an already decoded move, written against the board it was
/// decoded on.
#[inline]
pub fn write_move(board: &BoardState, mv: &Move) -> Result<String, WriteError> {
    write_notation(board, mv.from, mv.to)
}
