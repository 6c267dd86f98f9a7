//! Conversions between absolute board columns and player-relative roads.
//!
//! Roads are counted 1-9 from each player's own right-hand side: for Red
//! `road = 9 - col`, for Black `road = col + 1`. Red road `r` and Black road
//! `10 - r` therefore name the same column.

use crate::errors::{DecodeError, DecodeResult};
use crate::game_state::xiangqi_types::Player;

pub const MIN_ROAD: i32 = 1;
pub const MAX_ROAD: i32 = 9;

#[inline]
pub fn road_to_column(player: Player, road: i32) -> DecodeResult<i8> {
    if !(MIN_ROAD..=MAX_ROAD).contains(&road) {
        return Err(DecodeError::InvalidRoad {
            road,
            text: String::new(),
        });
    }
    let col = match player {
        Player::Red => 9 - road,
        Player::Black => road - 1,
    };
    Ok(col as i8)
}

#[inline]
pub fn column_to_road(player: Player, column: i32) -> DecodeResult<u8> {
    if !(0..=8).contains(&column) {
        return Err(DecodeError::InvalidColumn {
            column,
            text: String::new(),
        });
    }
    let road = match player {
        Player::Red => 9 - column,
        Player::Black => column + 1,
    };
    Ok(road as u8)
}
