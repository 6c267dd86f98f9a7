//! Character tables for road notation.
//!
//! Decoding first folds every variant glyph onto one canonical form
//! (traditional and side-specific piece names, full-width digits), so the
//! grammar only ever sees the canonical alphabet below.

use crate::game_state::xiangqi_types::{PieceType, Player, PositionQualifier, Verb};

pub const ROAD_MARKER: char = '路';

const RED_NUMERALS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Fold a single character onto its canonical form.
pub fn canonical_char(ch: char) -> char {
    match ch {
        // Full-width digits.
        '０'..='９' => char::from_u32(ch as u32 - '０' as u32 + '0' as u32).unwrap_or(ch),
        '車' | '俥' | '伡' => '车',
        '馬' | '傌' => '马',
        '砲' | '包' => '炮',
        '帥' => '帅',
        '將' => '将',
        '進' => '进',
        '後' => '后',
        '〇' => '零',
        _ => ch,
    }
}

/// Canonicalise every character and trim surrounding whitespace.
pub fn normalize_glyphs(text: &str) -> String {
    text.trim().chars().map(canonical_char).collect()
}

pub fn piece_from_glyph(ch: char) -> Option<PieceType> {
    match ch {
        '帅' | '将' => Some(PieceType::General),
        '仕' | '士' => Some(PieceType::Advisor),
        '相' | '象' => Some(PieceType::Elephant),
        '马' => Some(PieceType::Horse),
        '车' => Some(PieceType::Chariot),
        '炮' => Some(PieceType::Cannon),
        '兵' | '卒' => Some(PieceType::Soldier),
        _ => None,
    }
}

pub fn verb_from_glyph(ch: char) -> Option<Verb> {
    match ch {
        '进' => Some(Verb::Advance),
        '退' => Some(Verb::Retreat),
        '平' => Some(Verb::Traverse),
        _ => None,
    }
}

pub fn qualifier_from_glyph(ch: char) -> Option<PositionQualifier> {
    match ch {
        '前' => Some(PositionQualifier::Front),
        '中' => Some(PositionQualifier::Middle),
        '后' => Some(PositionQualifier::Rear),
        _ => None,
    }
}

/// Numeric value of a numeral. `十` and `零` are accepted so that an
/// out-of-range road is reported as such instead of as unparseable text.
pub fn numeral_value(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(ch as u8 - b'0'),
        '零' => Some(0),
        '十' => Some(10),
        _ => RED_NUMERALS
            .iter()
            .position(|&n| n == ch)
            .map(|i| i as u8 + 1),
    }
}

/// Conventional piece name for `owner`.
pub fn piece_glyph(piece_type: PieceType, owner: Player) -> char {
    match (piece_type, owner) {
        (PieceType::General, Player::Red) => '帅',
        (PieceType::General, Player::Black) => '将',
        (PieceType::Advisor, Player::Red) => '仕',
        (PieceType::Advisor, Player::Black) => '士',
        (PieceType::Elephant, Player::Red) => '相',
        (PieceType::Elephant, Player::Black) => '象',
        (PieceType::Horse, _) => '马',
        (PieceType::Chariot, _) => '车',
        (PieceType::Cannon, _) => '炮',
        (PieceType::Soldier, Player::Red) => '兵',
        (PieceType::Soldier, Player::Black) => '卒',
    }
}

pub fn verb_glyph(verb: Verb) -> char {
    match verb {
        Verb::Advance => '进',
        Verb::Retreat => '退',
        Verb::Traverse => '平',
    }
}

pub fn qualifier_glyph(qualifier: PositionQualifier) -> char {
    match qualifier {
        PositionQualifier::Front => '前',
        PositionQualifier::Middle => '中',
        PositionQualifier::Rear => '后',
    }
}

/// Red records numbers with Chinese numerals, Black with Arabic digits.
pub fn numeral_glyph(value: u8, owner: Player) -> Option<char> {
    if !(1..=9).contains(&value) {
        return None;
    }
    match owner {
        Player::Red => Some(RED_NUMERALS[usize::from(value) - 1]),
        Player::Black => Some(char::from(b'0' + value)),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_glyphs, numeral_glyph, numeral_value, piece_from_glyph};
    use crate::game_state::xiangqi_types::{PieceType, Player};

    #[test]
    fn full_width_digits_and_variants_fold() {
        assert_eq!(normalize_glyphs("炮８平五"), "炮8平五");
        assert_eq!(normalize_glyphs(" 俥一進一 "), "车一进一");
        assert_eq!(normalize_glyphs("後傌退六"), "后马退六");
    }

    #[test]
    fn both_sides_piece_names_map() {
        assert_eq!(piece_from_glyph('帅'), Some(PieceType::General));
        assert_eq!(piece_from_glyph('将'), Some(PieceType::General));
        assert_eq!(piece_from_glyph('象'), Some(PieceType::Elephant));
        assert_eq!(piece_from_glyph('卒'), Some(PieceType::Soldier));
        assert_eq!(piece_from_glyph('棋'), None);
    }

    #[test]
    fn numerals_cover_both_scripts() {
        assert_eq!(numeral_value('五'), Some(5));
        assert_eq!(numeral_value('7'), Some(7));
        assert_eq!(numeral_value('十'), Some(10));
        assert_eq!(numeral_value('零'), Some(0));
        assert_eq!(numeral_value('平'), None);
        assert_eq!(numeral_glyph(2, Player::Red), Some('二'));
        assert_eq!(numeral_glyph(8, Player::Black), Some('8'));
        assert_eq!(numeral_glyph(10, Player::Red), None);
    }
}
