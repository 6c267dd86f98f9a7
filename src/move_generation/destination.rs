//! Destination computation for decoded road notation.
//!
//! `compute_destination` is context free: it turns (square, owner, piece,
//! verb, magnitude) into a target square, applying only the notation's shape
//! rules and the board bounds. `validate_destination` then checks the target
//! against the board and diagnoses which rule a rejected move broke.

use crate::errors::{DecodeError, DecodeResult, MovementRule};
use crate::game_state::board_state::BoardState;
use crate::game_state::xiangqi_rules::{in_palace, on_own_side};
use crate::game_state::xiangqi_types::{Piece, PieceType, Player, Square, Verb};
use crate::move_generation::legal_move_generator::is_rule_legal;
use crate::move_generation::legal_move_shared::{own_piece_on, pieces_between};
use crate::move_generation::legal_moves_elephant::elephant_eye;
use crate::move_generation::legal_moves_horse::horse_leg;
use crate::notation::road_coordinates::road_to_column;

/// Row sign of `verb` for `owner`; zero for traverse.
#[inline]
fn verb_sign(owner: Player, verb: Verb) -> i32 {
    match verb {
        Verb::Advance => i32::from(owner.forward()),
        Verb::Retreat => -i32::from(owner.forward()),
        Verb::Traverse => 0,
    }
}

#[inline]
fn on_board(row: i32, col: i32) -> DecodeResult<Square> {
    Square::new(row as i8, col as i8).ok_or(DecodeError::OutOfBounds {
        row: row as i8,
        col: col as i8,
        text: String::new(),
    })
}

fn shape_error(piece_type: PieceType, from: Square, column_delta: i32, rule: MovementRule) -> DecodeError {
    DecodeError::InvalidMovement {
        piece_type,
        from,
        column_delta: column_delta as i8,
        rule,
        text: String::new(),
    }
}

pub fn compute_destination(
    from: Square,
    owner: Player,
    piece_type: PieceType,
    verb: Verb,
    magnitude: u8,
) -> DecodeResult<Square> {
    let magnitude = i32::from(magnitude);
    let row = i32::from(from.row());
    let col = i32::from(from.col());
    let sign = verb_sign(owner, verb);

    match (piece_type, verb) {
        (PieceType::Chariot | PieceType::Cannon | PieceType::Soldier, Verb::Traverse) => {
            let target_col = i32::from(road_to_column(owner, magnitude)?);
            if target_col == col {
                return Err(shape_error(piece_type, from, 0, MovementRule::NullMove));
            }
            on_board(row, target_col)
        }
        (PieceType::General | PieceType::Advisor, Verb::Traverse) => {
            let target_col = i32::from(road_to_column(owner, magnitude)?);
            let delta = target_col - col;
            match delta.abs() {
                0 => Err(shape_error(piece_type, from, delta, MovementRule::NullMove)),
                1 => on_board(row, target_col),
                _ => Err(shape_error(piece_type, from, delta, MovementRule::PalaceColumnDelta)),
            }
        }
        (
            PieceType::Chariot | PieceType::Cannon | PieceType::Soldier | PieceType::General,
            Verb::Advance | Verb::Retreat,
        ) => {
            if magnitude == 0 {
                return Err(shape_error(piece_type, from, 0, MovementRule::NullMove));
            }
            on_board(row + sign * magnitude, col)
        }
        (PieceType::Advisor, Verb::Advance | Verb::Retreat) => {
            let target_col = i32::from(road_to_column(owner, magnitude)?);
            let delta = target_col - col;
            match delta.abs() {
                1 => on_board(row + sign, target_col),
                0 => Err(shape_error(piece_type, from, delta, MovementRule::StraightNotAllowed)),
                _ => Err(shape_error(piece_type, from, delta, MovementRule::PalaceColumnDelta)),
            }
        }
        (PieceType::Horse, Verb::Advance | Verb::Retreat) => {
            let target_col = i32::from(road_to_column(owner, magnitude)?);
            let delta = target_col - col;
            let rows = match delta.abs() {
                1 => 2,
                2 => 1,
                _ => return Err(shape_error(piece_type, from, delta, MovementRule::HorseColumnDelta)),
            };
            on_board(row + sign * rows, target_col)
        }
        (PieceType::Elephant, Verb::Advance | Verb::Retreat) => {
            let target_col = i32::from(road_to_column(owner, magnitude)?);
            let delta = target_col - col;
            if delta.abs() != 2 {
                return Err(shape_error(piece_type, from, delta, MovementRule::ElephantColumnDelta));
            }
            on_board(row + sign * 2, target_col)
        }
        (PieceType::Horse | PieceType::Elephant, Verb::Traverse) => {
            let delta = road_to_column(owner, magnitude).map_or(0, |c| i32::from(c) - col);
            Err(shape_error(piece_type, from, delta, MovementRule::TraverseNotAllowed))
        }
    }
}

/// Accept `to` when it is among the piece's legal destinations, otherwise
/// report the rule it breaks.
pub fn validate_destination(piece: &Piece, to: Square, board: &BoardState) -> DecodeResult<()> {
    if is_rule_legal(piece, to, board) {
        return Ok(());
    }
    Err(shape_error(
        piece.piece_type,
        piece.square,
        i32::from(to.col() - piece.square.col()),
        diagnose(piece, to, board),
    ))
}

fn diagnose(piece: &Piece, to: Square, board: &BoardState) -> MovementRule {
    if own_piece_on(board, piece.owner, to) {
        return MovementRule::OwnPiece;
    }

    let from = piece.square;
    match piece.piece_type {
        PieceType::Chariot => match pieces_between(board, from, to) {
            Some(n) if n > 0 => MovementRule::PathBlocked,
            _ => MovementRule::Unreachable,
        },
        PieceType::Cannon => match (pieces_between(board, from, to), board.is_occupied(to)) {
            (Some(_), true) => MovementRule::CannonScreen,
            (Some(n), false) if n > 0 => MovementRule::PathBlocked,
            _ => MovementRule::Unreachable,
        },
        PieceType::Horse => match horse_leg(from, to) {
            Some(leg) if board.is_occupied(leg) => MovementRule::HorseLeg,
            _ => MovementRule::Unreachable,
        },
        PieceType::Elephant => {
            if !on_own_side(to, piece.owner) {
                MovementRule::CrossesRiver
            } else if elephant_eye(from, to).is_some_and(|eye| board.is_occupied(eye)) {
                MovementRule::ElephantEye
            } else {
                MovementRule::Unreachable
            }
        }
        PieceType::General | PieceType::Advisor => {
            if in_palace(to, piece.owner) {
                MovementRule::Unreachable
            } else {
                MovementRule::OutsidePalace
            }
        }
        PieceType::Soldier => MovementRule::SoldierDirection,
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_destination, validate_destination};
    use crate::errors::{DecodeError, MovementRule};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::xiangqi_types::{Piece, PieceType, Player, Square, Verb};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).expect("test square should be on board")
    }

    fn rule_of(err: DecodeError) -> Option<MovementRule> {
        match err {
            DecodeError::InvalidMovement { rule, .. } => Some(rule),
            _ => None,
        }
    }

    #[test]
    fn cannon_traverse_uses_target_road() {
        let to = compute_destination(sq(7, 7), Player::Red, PieceType::Cannon, Verb::Traverse, 5)
            .expect("cannon traverse");
        assert_eq!(to, sq(7, 4));
    }

    #[test]
    fn step_direction_flips_with_owner() {
        let red = compute_destination(sq(6, 4), Player::Red, PieceType::Soldier, Verb::Advance, 1)
            .expect("red advance");
        assert_eq!(red, sq(5, 4));
        let black = compute_destination(sq(0, 0), Player::Black, PieceType::Chariot, Verb::Advance, 3)
            .expect("black advance");
        assert_eq!(black, sq(3, 0));
        let back = compute_destination(sq(5, 0), Player::Red, PieceType::Chariot, Verb::Retreat, 2)
            .expect("red retreat");
        assert_eq!(back, sq(7, 0));
    }

    #[test]
    fn horse_verb_selects_forward_or_rearward_jump() {
        // Black horse on road 8, advancing to road 7.
        let fwd = compute_destination(sq(0, 7), Player::Black, PieceType::Horse, Verb::Advance, 7)
            .expect("black horse advance");
        assert_eq!(fwd, sq(2, 6));

        // Red horse on (5,4) with two-column shift moves one row.
        let red_fwd = compute_destination(sq(5, 4), Player::Red, PieceType::Horse, Verb::Advance, 3)
            .expect("red horse advance");
        assert_eq!(red_fwd, sq(4, 6));
        let red_back = compute_destination(sq(5, 4), Player::Red, PieceType::Horse, Verb::Retreat, 3)
            .expect("red horse retreat");
        assert_eq!(red_back, sq(6, 6));
    }

    #[test]
    fn elephant_requires_two_column_shift() {
        let err = compute_destination(sq(9, 2), Player::Red, PieceType::Elephant, Verb::Advance, 6)
            .expect_err("one-column elephant shift");
        assert_eq!(rule_of(err), Some(MovementRule::ElephantColumnDelta));

        let ok = compute_destination(sq(9, 2), Player::Red, PieceType::Elephant, Verb::Advance, 5)
            .expect("elephant to centre");
        assert_eq!(ok, sq(7, 4));
    }

    #[test]
    fn advisor_and_general_column_rules() {
        let adv = compute_destination(sq(9, 3), Player::Red, PieceType::Advisor, Verb::Advance, 5)
            .expect("advisor to centre");
        assert_eq!(adv, sq(8, 4));

        let err = compute_destination(sq(9, 3), Player::Red, PieceType::Advisor, Verb::Advance, 6)
            .expect_err("advisor straight");
        assert_eq!(rule_of(err), Some(MovementRule::StraightNotAllowed));

        let gen = compute_destination(sq(9, 4), Player::Red, PieceType::General, Verb::Advance, 1)
            .expect("general advance");
        assert_eq!(gen, sq(8, 4));

        let err = compute_destination(sq(9, 4), Player::Red, PieceType::General, Verb::Traverse, 8)
            .expect_err("general shifts three columns");
        assert_eq!(rule_of(err), Some(MovementRule::PalaceColumnDelta));
    }

    #[test]
    fn off_board_targets_report_the_square() {
        let err = compute_destination(sq(2, 0), Player::Red, PieceType::Chariot, Verb::Advance, 5)
            .expect_err("runs off the top edge");
        assert_eq!(
            err,
            DecodeError::OutOfBounds {
                row: -3,
                col: 0,
                text: String::new()
            }
        );
    }

    #[test]
    fn horse_and_elephant_cannot_traverse() {
        let err = compute_destination(sq(9, 1), Player::Red, PieceType::Horse, Verb::Traverse, 7)
            .expect_err("horse traverse");
        assert_eq!(rule_of(err), Some(MovementRule::TraverseNotAllowed));
    }

    #[test]
    fn validation_diagnoses_blocked_moves() {
        let board = BoardState::standard_opening();
        let chariot = Piece {
            piece_type: PieceType::Chariot,
            owner: Player::Red,
            square: sq(9, 0),
        };
        let err = validate_destination(&chariot, sq(5, 0), &board).expect_err("blocked by soldier");
        assert_eq!(rule_of(err), Some(MovementRule::PathBlocked));

        let cannon = Piece {
            piece_type: PieceType::Cannon,
            owner: Player::Red,
            square: sq(7, 7),
        };
        let err = validate_destination(&cannon, sq(2, 7), &board).expect_err("no screen");
        assert_eq!(rule_of(err), Some(MovementRule::CannonScreen));
        assert!(validate_destination(&cannon, sq(0, 7), &board).is_ok());

        let horse = Piece {
            piece_type: PieceType::Horse,
            owner: Player::Red,
            square: sq(9, 1),
        };
        let err = validate_destination(&horse, sq(8, 3), &board).expect_err("leg blocked");
        assert_eq!(rule_of(err), Some(MovementRule::HorseLeg));

        let soldier = Piece {
            piece_type: PieceType::Soldier,
            owner: Player::Red,
            square: sq(6, 4),
        };
        let err = validate_destination(&soldier, sq(7, 4), &board).expect_err("soldier retreat");
        assert_eq!(rule_of(err), Some(MovementRule::SoldierDirection));
    }
}
