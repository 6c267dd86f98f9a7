//! Tokeniser and grammar classifier for road notation.
//!
//! Text is split into lexemes, then matched against the four grammar shapes
//! in a single `match` over the lexeme slice. Arms are tried top to bottom,
//! which fixes the shape priority.

use crate::errors::{DecodeError, DecodeResult};
use crate::game_state::xiangqi_types::{PieceType, PositionQualifier, Verb};
use crate::notation::glyphs::{
    numeral_value, piece_from_glyph, qualifier_from_glyph, verb_from_glyph, ROAD_MARKER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    Piece { glyph: char, piece_type: PieceType },
    Numeral(u8),
    Verb(Verb),
    Qualifier(PositionQualifier),
    RoadMarker,
}

/// Which of the four recognised layouts a token was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarShape {
    /// `炮二平五`
    PieceRoad,
    /// `前炮二进一`
    QualifiedPieceRoad,
    /// `二路炮平五`
    RoadFirst,
    /// `前炮进一`; the road is inferred from the board.
    Qualified,
}

impl GrammarShape {
    /// Shapes that can be resolved without looking at the board.
    #[inline]
    pub const fn is_context_free(self) -> bool {
        !matches!(self, GrammarShape::Qualified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationToken {
    pub piece_glyph: char,
    pub piece_type: PieceType,
    pub position_qualifier: Option<PositionQualifier>,
    pub road: Option<u8>,
    pub verb: Verb,
    pub magnitude: u8,
    pub shape: GrammarShape,
}

pub fn lex_char(ch: char) -> Option<Lexeme> {
    if let Some(piece_type) = piece_from_glyph(ch) {
        return Some(Lexeme::Piece {
            glyph: ch,
            piece_type,
        });
    }
    if let Some(value) = numeral_value(ch) {
        return Some(Lexeme::Numeral(value));
    }
    if let Some(verb) = verb_from_glyph(ch) {
        return Some(Lexeme::Verb(verb));
    }
    if let Some(qualifier) = qualifier_from_glyph(ch) {
        return Some(Lexeme::Qualifier(qualifier));
    }
    (ch == ROAD_MARKER).then_some(Lexeme::RoadMarker)
}

/// Split canonical text into lexemes; `None` on any unknown character.
pub fn tokenize(text: &str) -> Option<Vec<Lexeme>> {
    text.chars().map(lex_char).collect()
}

/// Classify already-normalised text.
pub fn classify(text: &str) -> DecodeResult<NotationToken> {
    let malformed = || DecodeError::MalformedNotation {
        text: text.to_owned(),
    };
    let lexemes = tokenize(text).ok_or_else(malformed)?;

    use Lexeme::{Numeral, Piece, Qualifier, RoadMarker};
    let token = match lexemes.as_slice() {
        [Piece { glyph, piece_type }, Numeral(road), Lexeme::Verb(verb), Numeral(magnitude)] => {
            NotationToken {
                piece_glyph: *glyph,
                piece_type: *piece_type,
                position_qualifier: None,
                road: Some(*road),
                verb: *verb,
                magnitude: *magnitude,
                shape: GrammarShape::PieceRoad,
            }
        }
        [Qualifier(qualifier), Piece { glyph, piece_type }, Numeral(road), Lexeme::Verb(verb), Numeral(magnitude)] => {
            NotationToken {
                piece_glyph: *glyph,
                piece_type: *piece_type,
                position_qualifier: Some(*qualifier),
                road: Some(*road),
                verb: *verb,
                magnitude: *magnitude,
                shape: GrammarShape::QualifiedPieceRoad,
            }
        }
        [Numeral(road), RoadMarker, Piece { glyph, piece_type }, Lexeme::Verb(verb), Numeral(magnitude)] => {
            NotationToken {
                piece_glyph: *glyph,
                piece_type: *piece_type,
                position_qualifier: None,
                road: Some(*road),
                verb: *verb,
                magnitude: *magnitude,
                shape: GrammarShape::RoadFirst,
            }
        }
        [Qualifier(qualifier), Piece { glyph, piece_type }, Lexeme::Verb(verb), Numeral(magnitude)] => {
            NotationToken {
                piece_glyph: *glyph,
                piece_type: *piece_type,
                position_qualifier: Some(*qualifier),
                road: None,
                verb: *verb,
                magnitude: *magnitude,
                shape: GrammarShape::Qualified,
            }
        }
        _ => return Err(malformed()),
    };
    Ok(token)
}
