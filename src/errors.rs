//! Error types for decoding, board application and FEN handling.
//!
//! Every decode error carries the original notation text plus the structured
//! context (road, piece type, column delta, offending square) a caller needs
//! to render a precise message or attempt its own repair.

use thiserror::Error;

use crate::game_state::xiangqi_types::{PieceType, Player, Square};

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Piece-specific shape rule that rejected a move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementRule {
    #[error("elephant must shift exactly two columns")]
    ElephantColumnDelta,
    #[error("advisor and general may shift at most one column")]
    PalaceColumnDelta,
    #[error("horse must shift one or two columns")]
    HorseColumnDelta,
    #[error("piece cannot move sideways")]
    TraverseNotAllowed,
    #[error("piece cannot move straight along its column")]
    StraightNotAllowed,
    #[error("move does not change the square")]
    NullMove,
    #[error("path is blocked")]
    PathBlocked,
    #[error("cannon capture needs exactly one screen")]
    CannonScreen,
    #[error("horse leg is blocked")]
    HorseLeg,
    #[error("elephant eye is blocked")]
    ElephantEye,
    #[error("destination holds an own piece")]
    OwnPiece,
    #[error("destination leaves the palace")]
    OutsidePalace,
    #[error("elephant cannot cross the river")]
    CrossesRiver,
    #[error("soldier cannot move that way")]
    SoldierDirection,
    #[error("destination is not reachable")]
    Unreachable,
}

/// Fieldless mirror of [`DecodeError`] used to key recovery strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedNotation,
    InvalidRoad,
    InvalidColumn,
    PieceNotFound,
    InvalidMovement,
    OutOfBounds,
    AmbiguousReference,
    RecoveryExhausted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed notation: {text:?}")]
    MalformedNotation { text: String },

    #[error("invalid road {road} (must be 1-9) in {text:?}")]
    InvalidRoad { road: i32, text: String },

    #[error("invalid column {column} (must be 0-8) in {text:?}")]
    InvalidColumn { column: i32, text: String },

    #[error("no {owner} {piece_type} found{} in {text:?}", road_suffix(.road))]
    PieceNotFound {
        piece_type: PieceType,
        owner: Player,
        road: Option<u8>,
        text: String,
    },

    #[error("invalid {piece_type} movement from {from} (column delta {column_delta}): {rule} in {text:?}")]
    InvalidMovement {
        piece_type: PieceType,
        from: Square,
        column_delta: i8,
        rule: MovementRule,
        text: String,
    },

    #[error("destination ({row},{col}) is off the board in {text:?}")]
    OutOfBounds { row: i8, col: i8, text: String },

    #[error("ambiguous reference to {owner} {piece_type} ({candidates} candidates) in {text:?}")]
    AmbiguousReference {
        piece_type: PieceType,
        owner: Player,
        candidates: usize,
        text: String,
    },

    #[error("{original} (after {attempted} recovery strategies)")]
    RecoveryExhausted {
        original: Box<DecodeError>,
        attempted: usize,
    },
}

fn road_suffix(road: &Option<u8>) -> String {
    road.map(|r| format!(" on road {r}")).unwrap_or_default()
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MalformedNotation { .. } => ErrorKind::MalformedNotation,
            DecodeError::InvalidRoad { .. } => ErrorKind::InvalidRoad,
            DecodeError::InvalidColumn { .. } => ErrorKind::InvalidColumn,
            DecodeError::PieceNotFound { .. } => ErrorKind::PieceNotFound,
            DecodeError::InvalidMovement { .. } => ErrorKind::InvalidMovement,
            DecodeError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            DecodeError::AmbiguousReference { .. } => ErrorKind::AmbiguousReference,
            DecodeError::RecoveryExhausted { .. } => ErrorKind::RecoveryExhausted,
        }
    }

    /// Text the error was raised for; empty when raised below the decoder.
    pub fn text(&self) -> &str {
        match self {
            DecodeError::MalformedNotation { text }
            | DecodeError::InvalidRoad { text, .. }
            | DecodeError::InvalidColumn { text, .. }
            | DecodeError::PieceNotFound { text, .. }
            | DecodeError::InvalidMovement { text, .. }
            | DecodeError::OutOfBounds { text, .. }
            | DecodeError::AmbiguousReference { text, .. } => text,
            DecodeError::RecoveryExhausted { original, .. } => original.text(),
        }
    }

    /// Fill in the notation text on errors raised by context-free layers
    /// (coordinates, move generation) that never see it.
    pub fn with_text(mut self, raw: &str) -> Self {
        match &mut self {
            DecodeError::MalformedNotation { text }
            | DecodeError::InvalidRoad { text, .. }
            | DecodeError::InvalidColumn { text, .. }
            | DecodeError::PieceNotFound { text, .. }
            | DecodeError::InvalidMovement { text, .. }
            | DecodeError::OutOfBounds { text, .. }
            | DecodeError::AmbiguousReference { text, .. } => {
                if text.is_empty() {
                    raw.clone_into(text);
                }
            }
            DecodeError::RecoveryExhausted { .. } => {}
        }
        self
    }
}

/// Errors raised when applying a move to a board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece on {square}")]
    EmptySource { square: Square },

    #[error("piece on {square} does not match the move")]
    SourceMismatch { square: Square },

    #[error("{square} holds an own piece")]
    OwnPieceCaptured { square: Square },

    #[error("generals face each other on column {col}")]
    FacingGenerals { col: i8 },
}

/// Errors raised when writing a move back to road notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("no piece on {square}")]
    EmptySource { square: Square },

    #[error("{square} is one of {stacked} same pieces on its road; front/middle/rear cannot name it")]
    Unnameable { square: Square, stacked: usize },

    #[error("{from} -> {to} is not a single notation step")]
    NullMove { from: Square, to: Square },
}

/// Errors raised while reading a FEN board description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("board layout must contain 10 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} does not sum to 9 files")]
    FileCount { rank: usize },

    #[error("invalid piece character {ch:?}")]
    PieceChar { ch: char },

    #[error("invalid side-to-move field {field:?}")]
    SideToMove { field: String },
}
