//! Crate root module declarations for the Xiangqi road-notation engine.
//!
//! This file exposes the subsystems (game state, move generation, notation
//! decoding and recovery, and utility helpers) so benches, tests and callers
//! can import stable module paths. The most common entry points are
//! re-exported at the crate root.

pub mod errors;

pub mod game_state {
    pub mod board_state;
    pub mod xiangqi_rules;
    pub mod xiangqi_types;
    pub mod zobrist;
}

pub mod move_generation {
    pub mod destination;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_advisor;
    pub mod legal_moves_cannon;
    pub mod legal_moves_chariot;
    pub mod legal_moves_elephant;
    pub mod legal_moves_general;
    pub mod legal_moves_horse;
    pub mod legal_moves_soldier;
    pub mod perft;
}

pub mod notation {
    pub mod decode_cache;
    pub mod decoder_config;
    pub mod disambiguator;
    pub mod error_recovery;
    pub mod glyphs;
    pub mod grammar;
    pub mod notation_decoder;
    pub mod notation_writer;
    pub mod road_coordinates;
}

pub mod utils {
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod move_sequence;
}

pub use errors::{BoardError, DecodeError, DecodeResult, ErrorKind, MovementRule};
pub use game_state::board_state::BoardState;
pub use game_state::xiangqi_types::{Move, Piece, PieceType, Player, PositionQualifier, Square, Verb};
pub use move_generation::legal_move_checks::{facing_generals, is_checkmate, is_in_check};
pub use move_generation::legal_move_generator::legal_destinations;
pub use notation::decoder_config::DecoderConfig;
pub use notation::notation_decoder::{decode, NotationDecoder};
