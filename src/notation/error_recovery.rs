//! Bounded repair pipeline for notation that fails to decode.
//!
//! Four strategies run in a fixed order, each at most once. Every re-decode
//! goes through `decode_at_depth` one level deeper, and that level never
//! starts a second recovery pass.

use tracing::{debug, trace};

use crate::errors::{DecodeError, DecodeResult, ErrorKind};
use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_types::{Move, Player, Verb};
use crate::notation::glyphs::{
    canonical_char, normalize_glyphs, qualifier_glyph, verb_glyph, ROAD_MARKER,
};
use crate::notation::grammar::{classify, lex_char, Lexeme};
use crate::notation::notation_decoder::{build_move, decode_at_depth};
use crate::notation::road_coordinates::{MAX_ROAD, MIN_ROAD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Strip whitespace, punctuation and annotation marks.
    Scrub,
    /// Ignore the stated road and try every piece of the named type.
    DropRoad,
    /// Keep only recognisable glyphs; the last numeral is the magnitude.
    LooseGrammar,
    /// Repair keyed by the kind of the original failure.
    KindRepair,
}

impl RecoveryStrategy {
    pub const ALL: [RecoveryStrategy; 4] = [
        RecoveryStrategy::Scrub,
        RecoveryStrategy::DropRoad,
        RecoveryStrategy::LooseGrammar,
        RecoveryStrategy::KindRepair,
    ];
}

pub const STRATEGY_COUNT: usize = RecoveryStrategy::ALL.len();

pub fn is_recoverable(err: &DecodeError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::MalformedNotation
            | ErrorKind::InvalidRoad
            | ErrorKind::InvalidColumn
            | ErrorKind::PieceNotFound
            | ErrorKind::OutOfBounds
    )
}

/// Try each strategy in order. A movement-rule violation from a re-decode
/// ends recovery immediately; otherwise the original error is reported.
pub fn recover(
    text: &str,
    player: Player,
    board: &BoardState,
    original: DecodeError,
    depth: u8,
) -> DecodeResult<Move> {
    for strategy in RecoveryStrategy::ALL {
        let Some(attempt) = run_strategy(strategy, text, player, board, &original, depth) else {
            trace!(?strategy, %text, "recovery strategy not applicable");
            continue;
        };
        match attempt {
            Ok(mut mv) => {
                debug!(?strategy, %text, from = %mv.from, to = %mv.to, "notation recovered");
                text.clone_into(&mut mv.raw_text);
                return Ok(mv);
            }
            Err(err @ DecodeError::InvalidMovement { .. }) => {
                debug!(?strategy, %text, error = %err, "recovery hit a movement rule");
                return Err(err);
            }
            Err(err) => trace!(?strategy, %text, error = %err, "recovery strategy failed"),
        }
    }

    debug!(%text, error = %original, "recovery exhausted");
    Err(DecodeError::RecoveryExhausted {
        original: Box::new(original),
        attempted: STRATEGY_COUNT,
    })
}

fn run_strategy(
    strategy: RecoveryStrategy,
    text: &str,
    player: Player,
    board: &BoardState,
    original: &DecodeError,
    depth: u8,
) -> Option<DecodeResult<Move>> {
    let scrubbed = scrub(text);
    match strategy {
        RecoveryStrategy::Scrub => {
            (scrubbed != normalize_glyphs(text)).then(|| redecode(&scrubbed, player, board, depth))
        }
        RecoveryStrategy::DropRoad => drop_road(&scrubbed, text, player, board),
        RecoveryStrategy::LooseGrammar => {
            let rebuilt = loose_rebuild(&scrubbed)?;
            (rebuilt != scrubbed).then(|| redecode(&rebuilt, player, board, depth))
        }
        RecoveryStrategy::KindRepair => first_settled(
            kind_repairs(&scrubbed, original)?
                .iter()
                .map(|candidate| redecode(candidate, player, board, depth)),
        ),
    }
}

#[inline]
fn redecode(text: &str, player: Player, board: &BoardState, depth: u8) -> DecodeResult<Move> {
    decode_at_depth(text, player, board, depth, true)
}

/// First success or movement-rule violation, else the last failure.
fn first_settled(attempts: impl Iterator<Item = DecodeResult<Move>>) -> Option<DecodeResult<Move>> {
    let mut last = None;
    for attempt in attempts {
        match attempt {
            Ok(_) | Err(DecodeError::InvalidMovement { .. }) => return Some(attempt),
            Err(_) => last = Some(attempt),
        }
    }
    last
}

fn is_annotation(ch: char) -> bool {
    ch.is_whitespace()
        || ch.is_ascii_punctuation()
        || "，。、；：！？（）【】《》「」“”‘’…·～".contains(ch)
}

pub fn scrub(text: &str) -> String {
    text.chars()
        .filter(|&ch| !is_annotation(ch))
        .map(canonical_char)
        .collect()
}

fn drop_road(
    scrubbed: &str,
    text: &str,
    player: Player,
    board: &BoardState,
) -> Option<DecodeResult<Move>> {
    let token = classify(scrubbed).ok()?;
    token.road?;
    board
        .pieces_of_type(token.piece_type, player)
        .iter()
        .find_map(|piece| build_move(piece, &token, board, text).ok())
        .map(Ok)
}

fn numeral_text(value: u8) -> String {
    match value {
        0..=9 => char::from(b'0' + value).to_string(),
        _ => "十".to_owned(),
    }
}

fn render(lexemes: &[Lexeme]) -> String {
    lexemes
        .iter()
        .map(|lexeme| match *lexeme {
            Lexeme::Piece { glyph, .. } => glyph.to_string(),
            Lexeme::Numeral(value) => numeral_text(value),
            Lexeme::Verb(verb) => verb_glyph(verb).to_string(),
            Lexeme::Qualifier(qualifier) => qualifier_glyph(qualifier).to_string(),
            Lexeme::RoadMarker => ROAD_MARKER.to_string(),
        })
        .collect()
}

fn loose_lexemes(scrubbed: &str) -> Vec<Lexeme> {
    scrubbed.chars().filter_map(lex_char).collect()
}

/// `[qualifier] piece [road] verb magnitude` from whatever glyphs survive.
fn loose_rebuild(scrubbed: &str) -> Option<String> {
    let lexemes = loose_lexemes(scrubbed);
    let piece_at = lexemes
        .iter()
        .position(|l| matches!(l, Lexeme::Piece { .. }))?;
    let verb_at = piece_at
        + lexemes[piece_at..]
            .iter()
            .position(|l| matches!(l, Lexeme::Verb(_)))?;
    let magnitude = lexemes[verb_at..]
        .iter()
        .rev()
        .find(|l| matches!(l, Lexeme::Numeral(_)))?;
    let qualifier = lexemes[..piece_at]
        .iter()
        .find(|l| matches!(l, Lexeme::Qualifier(_)));
    let road = lexemes[piece_at..verb_at]
        .iter()
        .find(|l| matches!(l, Lexeme::Numeral(_)));
    if qualifier.is_none() && road.is_none() {
        return None;
    }

    let rebuilt: Vec<Lexeme> = qualifier
        .into_iter()
        .chain(std::iter::once(&lexemes[piece_at]))
        .chain(road)
        .chain([&lexemes[verb_at], magnitude])
        .copied()
        .collect();
    Some(render(&rebuilt))
}

/// Replacement texts for the original failure, nearest repair first.
fn kind_repairs(scrubbed: &str, original: &DecodeError) -> Option<Vec<String>> {
    let lexemes = loose_lexemes(scrubbed);
    match original {
        DecodeError::InvalidRoad { road, .. } => {
            let bad = u8::try_from(*road).ok()?;
            let at = lexemes.iter().position(|l| *l == Lexeme::Numeral(bad))?;
            let nearest = if *road < MIN_ROAD {
                [MIN_ROAD, MIN_ROAD + 1]
            } else {
                [MAX_ROAD, MAX_ROAD - 1]
            };
            Some(
                nearest
                    .iter()
                    .map(|&fix| replace_numeral(&lexemes, at, fix as u8))
                    .collect(),
            )
        }
        DecodeError::OutOfBounds { .. } => {
            let stepper = lexemes.iter().any(
                |l| matches!(l, Lexeme::Piece { piece_type, .. } if piece_type.moves_in_steps()),
            );
            let verb = lexemes.iter().find_map(|l| match l {
                Lexeme::Verb(v) => Some(*v),
                _ => None,
            })?;
            if !stepper || verb == Verb::Traverse {
                return None;
            }
            let at = lexemes
                .iter()
                .rposition(|l| matches!(l, Lexeme::Numeral(_)))?;
            let Lexeme::Numeral(magnitude) = lexemes[at] else {
                return None;
            };
            Some(
                (1..magnitude)
                    .rev()
                    .map(|smaller| replace_numeral(&lexemes, at, smaller))
                    .collect(),
            )
        }
        _ => None,
    }
}

fn replace_numeral(lexemes: &[Lexeme], at: usize, value: u8) -> String {
    let mut patched = lexemes.to_vec();
    patched[at] = Lexeme::Numeral(value);
    render(&patched)
}

#[cfg(test)]
mod tests {
    use super::{is_recoverable, scrub};
    use crate::errors::{DecodeError, MovementRule};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::{PieceType, Player, Square};
    use crate::notation::notation_decoder::{decode, decode_at_depth};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).expect("test square should be on board")
    }

    fn kings_only() -> BoardState {
        BoardState::new_empty()
            .with_piece(sq(9, 4), PieceType::General, Player::Red)
            .with_piece(sq(0, 3), PieceType::General, Player::Black)
    }

    #[test]
    fn scrub_strips_marks_and_variants() {
        assert_eq!(scrub(" 炮二 平五！"), "炮二平五");
        assert_eq!(scrub("俥一進一?!"), "车一进一");
    }

    #[test]
    fn whitespace_and_marks_are_repaired() {
        let board = BoardState::standard_opening();
        let mv = decode("炮二 平五！", Player::Red, &board).expect("scrubbed decode");
        assert_eq!((mv.from, mv.to), (sq(7, 7), sq(7, 4)));
        assert_eq!(mv.raw_text, "炮二 平五！");
    }

    #[test]
    fn missing_road_piece_falls_back_to_any_legal_piece() {
        let board = BoardState::standard_opening();
        // No cannon on road 3; the first cannon in board order that can
        // reach road 5 is used.
        let mv = decode("炮三平五", Player::Red, &board).expect("road dropped");
        assert_eq!((mv.from, mv.to), (sq(7, 1), sq(7, 4)));
    }

    #[test]
    fn loose_grammar_skips_stray_glyphs() {
        let board = BoardState::standard_opening();
        let mv = decode("炮二平到五", Player::Red, &board).expect("loose grammar");
        assert_eq!((mv.from, mv.to), (sq(7, 7), sq(7, 4)));
    }

    #[test]
    fn invalid_target_road_tries_nearest_roads() {
        let board = kings_only().with_piece(sq(7, 7), PieceType::Cannon, Player::Red);
        let mv = decode("炮二平十", Player::Red, &board).expect("nearest road");
        assert_eq!((mv.from, mv.to), (sq(7, 7), sq(7, 0)));

        // On the opening board the repaired move runs into the other cannon.
        let opening = BoardState::standard_opening();
        let err = decode("炮二平十", Player::Red, &opening).expect_err("repair is blocked");
        assert!(matches!(
            err,
            DecodeError::InvalidMovement {
                rule: MovementRule::PathBlocked,
                ..
            }
        ));
    }

    #[test]
    fn overshooting_step_is_shortened() {
        let board = kings_only().with_piece(sq(3, 0), PieceType::Chariot, Player::Red);
        let mv = decode("车九进五", Player::Red, &board).expect("shortened advance");
        assert_eq!((mv.from, mv.to), (sq(3, 0), sq(0, 0)));
        assert_eq!(mv.raw_text, "车九进五");
    }

    #[test]
    fn nested_decode_never_recovers_again() {
        let board = BoardState::standard_opening();
        assert!(matches!(
            decode_at_depth("炮二平到五", Player::Red, &board, 1, true),
            Err(DecodeError::MalformedNotation { .. })
        ));
        assert!(matches!(
            decode_at_depth("炮二平到五", Player::Red, &board, 0, false),
            Err(DecodeError::MalformedNotation { .. })
        ));
    }

    #[test]
    fn only_lookup_failures_are_recoverable() {
        assert!(is_recoverable(&DecodeError::MalformedNotation {
            text: String::new()
        }));
        assert!(!is_recoverable(&DecodeError::AmbiguousReference {
            piece_type: PieceType::Horse,
            owner: Player::Red,
            candidates: 2,
            text: String::new(),
        }));
    }
}
