//! Road-notation decode pipeline.
//!
//! normalise -> classify -> select piece -> compute destination -> validate.
//! Recovery wraps the pipeline at depth 0 and re-enters it at depth 1, where
//! it never recovers again.

use tracing::debug;

use crate::errors::{DecodeError, DecodeResult};
use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Move, Piece, Player};
use crate::move_generation::destination::{compute_destination, validate_destination};
use crate::notation::decode_cache::{CacheKey, CacheStats, DecodeCache};
use crate::notation::decoder_config::DecoderConfig;
use crate::notation::disambiguator::{select_by_qualifier, select_heuristic};
use crate::notation::error_recovery::{is_recoverable, recover};
use crate::notation::glyphs::normalize_glyphs;
use crate::notation::grammar::{classify, GrammarShape, NotationToken};
use crate::notation::road_coordinates::road_to_column;

/// Deepest level at which recovery may still run.
pub const MAX_RECOVERY_DEPTH: u8 = 1;

/// Decode with recovery and no memoisation.
pub fn decode(text: &str, player: Player, board: &BoardState) -> DecodeResult<Move> {
    decode_at_depth(text, player, board, 0, true)
}

/// Run the pipeline once, then recovery if `depth` allows it.
pub fn decode_at_depth(
    text: &str,
    player: Player,
    board: &BoardState,
    depth: u8,
    recovery: bool,
) -> DecodeResult<Move> {
    match decode_strict(text, player, board) {
        Ok(mv) => Ok(mv),
        Err(err) if recovery && depth < MAX_RECOVERY_DEPTH && is_recoverable(&err) => {
            debug!(%text, %player, error = %err, "starting notation recovery");
            recover(text, player, board, err, depth + 1)
        }
        Err(err) => Err(err),
    }
}

/// Single pass with no recovery.
pub fn decode_strict(text: &str, player: Player, board: &BoardState) -> DecodeResult<Move> {
    let normalized = normalize_glyphs(text);
    let token = classify(&normalized).map_err(|_| DecodeError::MalformedNotation {
        text: text.to_owned(),
    })?;
    resolve_token(&token, player, board, text)
}

/// Turn a classified token into a validated move.
pub fn resolve_token(
    token: &NotationToken,
    player: Player,
    board: &BoardState,
    text: &str,
) -> DecodeResult<Move> {
    let piece = select_piece(token, player, board).map_err(|e| e.with_text(text))?;
    build_move(&piece, token, board, text)
}

pub(crate) fn build_move(
    piece: &Piece,
    token: &NotationToken,
    board: &BoardState,
    text: &str,
) -> DecodeResult<Move> {
    let to = compute_destination(piece.square, piece.owner, piece.piece_type, token.verb, token.magnitude)
        .map_err(|e| e.with_text(text))?;
    validate_destination(piece, to, board).map_err(|e| e.with_text(text))?;
    Ok(Move {
        piece_type: piece.piece_type,
        owner: piece.owner,
        from: piece.square,
        to,
        verb: token.verb,
        raw_text: text.to_owned(),
    })
}

fn select_piece(token: &NotationToken, player: Player, board: &BoardState) -> DecodeResult<Piece> {
    let mut candidates = board.pieces_of_type(token.piece_type, player);

    if let Some(road) = token.road {
        let col = road_to_column(player, i32::from(road))?;
        candidates.retain(|p| p.square.col() == col);
    }
    if candidates.is_empty() {
        return Err(DecodeError::PieceNotFound {
            piece_type: token.piece_type,
            owner: player,
            road: token.road,
            text: String::new(),
        });
    }

    match (token.shape, token.position_qualifier) {
        (GrammarShape::QualifiedPieceRoad | GrammarShape::Qualified, Some(qualifier)) => {
            select_by_qualifier(&candidates, token, player, qualifier)
        }
        _ => match candidates.as_slice() {
            [only] => Ok(*only),
            _ => select_heuristic(&candidates, token, board).ok_or(DecodeError::PieceNotFound {
                piece_type: token.piece_type,
                owner: player,
                road: token.road,
                text: String::new(),
            }),
        },
    }
}

/// Decoder instance carrying configuration and a shared memoisation cache.
/// `Send + Sync`; callers on several threads may share one instance.
#[derive(Debug)]
pub struct NotationDecoder {
    config: DecoderConfig,
    cache: DecodeCache,
}

impl Default for NotationDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl NotationDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            cache: DecodeCache::new(config.normalized_capacity()),
        }
    }

    #[inline]
    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    pub fn decode(&self, text: &str, player: Player, board: &BoardState) -> DecodeResult<Move> {
        let key = CacheKey {
            normalized_text: normalize_glyphs(text),
            player,
            fingerprint: board.fingerprint(),
        };
        if let Some(mut mv) = self.cache.get(&key) {
            text.clone_into(&mut mv.raw_text);
            return Ok(mv);
        }

        let mv = decode_at_depth(text, player, board, 0, self.config.recovery)?;
        self.cache.insert(key, mv.clone());
        Ok(mv)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
