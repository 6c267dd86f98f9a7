//! Replays a list of notation strings from a starting board.
//!
//! Players alternate starting with `first`. After each move the replay
//! records whether the side to move next is in check or checkmated.

use thiserror::Error;

use crate::errors::{BoardError, DecodeError};
use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Move, Player};
use crate::move_generation::legal_move_checks::{is_checkmate, is_in_check};
use crate::notation::notation_decoder::NotationDecoder;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("move {ply} ({text:?}) failed to decode: {source}")]
    Decode {
        ply: usize,
        text: String,
        #[source]
        source: DecodeError,
    },

    #[error("move {ply} ({text:?}) cannot be applied: {source}")]
    Apply {
        ply: usize,
        text: String,
        #[source]
        source: BoardError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub mv: Move,
    pub board_after: BoardState,
    /// The opponent of the mover is in check after the move.
    pub gives_check: bool,
    pub checkmate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub steps: Vec<ReplayStep>,
    pub final_board: BoardState,
    pub side_to_move: Player,
}

impl Replay {
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.steps.last().is_some_and(|step| step.checkmate)
    }
}

/// Decode and apply `moves` in order. Stops at the first move that fails.
pub fn replay_moves<S: AsRef<str>>(
    decoder: &NotationDecoder,
    start: &BoardState,
    first: Player,
    moves: &[S],
) -> Result<Replay, ReplayError> {
    let mut board = *start;
    let mut player = first;
    let mut steps = Vec::with_capacity(moves.len());

    for (ply, text) in moves.iter().enumerate() {
        let text = text.as_ref();
        let mv = decoder
            .decode(text, player, &board)
            .map_err(|source| ReplayError::Decode {
                ply,
                text: text.to_owned(),
                source,
            })?;
        board = board.apply_move(&mv).map_err(|source| ReplayError::Apply {
            ply,
            text: text.to_owned(),
            source,
        })?;

        let opponent = player.opposite();
        let gives_check = is_in_check(opponent, &board);
        steps.push(ReplayStep {
            mv,
            board_after: board,
            gives_check,
            checkmate: gives_check && is_checkmate(opponent, &board),
        });
        player = opponent;
    }

    Ok(Replay {
        steps,
        final_board: board,
        side_to_move: player,
    })
}
