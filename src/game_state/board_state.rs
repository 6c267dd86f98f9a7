//! Board snapshot supplied by the caller on every call.
//!
//! `BoardState` is a flat array of 90 optional cells. It is `Copy`, so trial
//! moves (checkmate search, perft) are made on a copy and the caller's
//! snapshot is never touched.

use crate::errors::BoardError;
use crate::game_state::xiangqi_rules::{BOARD_SQUARES, STARTING_POSITION_FEN};
use crate::game_state::xiangqi_types::{Move, Piece, PieceType, Player, Square};
use crate::game_state::zobrist;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [Option<(PieceType, Player)>; BOARD_SQUARES],
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            cells: [None; BOARD_SQUARES],
        }
    }
}

impl BoardState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    ///
    /// # Panics
    ///
    /// Only if `STARTING_POSITION_FEN` itself is malformed.
    pub fn standard_opening() -> Self {
        match parse_fen(STARTING_POSITION_FEN) {
            Ok((board, _)) => board,
            Err(err) => panic!("STARTING_POSITION_FEN must parse: {err}"),
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<(PieceType, Player)> {
        self.cells[square.index()]
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.cells[square.index()].is_some()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.get(square).map(|(piece_type, owner)| Piece {
            piece_type,
            owner,
            square,
        })
    }

    #[inline]
    pub fn set(&mut self, square: Square, cell: Option<(PieceType, Player)>) {
        self.cells[square.index()] = cell;
    }

    /// Builder-style placement, handy for hand-made positions.
    pub fn with_piece(mut self, square: Square, piece_type: PieceType, owner: Player) -> Self {
        self.set(square, Some((piece_type, owner)));
        self
    }

    /// All pieces in row-major board order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        Square::all().filter_map(|square| self.piece_at(square))
    }

    pub fn pieces_of(&self, owner: Player) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.owner == owner)
    }

    /// Pieces of one type and owner, in row-major board order.
    pub fn pieces_of_type(&self, piece_type: PieceType, owner: Player) -> Vec<Piece> {
        self.pieces()
            .filter(|p| p.piece_type == piece_type && p.owner == owner)
            .collect()
    }

    pub fn find_general(&self, owner: Player) -> Option<Square> {
        self.pieces()
            .find(|p| p.piece_type == PieceType::General && p.owner == owner)
            .map(|p| p.square)
    }

    /// Copy of the board with the piece on `from` moved to `to`, capturing
    /// whatever stood there. No rule checks.
    pub fn with_move_unchecked(&self, from: Square, to: Square) -> Self {
        let mut next = *self;
        let moving = next.cells[from.index()].take();
        next.cells[to.index()] = moving;
        next
    }

    /// Apply a decoded move and return the resulting board.
    ///
    /// Rejects a missing or mismatched source piece, a capture of an own
    /// piece, and a resulting position with facing generals.
    pub fn apply_move(&self, mv: &Move) -> Result<Self, BoardError> {
        let (piece_type, owner) = self
            .get(mv.from)
            .ok_or(BoardError::EmptySource { square: mv.from })?;
        if piece_type != mv.piece_type || owner != mv.owner {
            return Err(BoardError::SourceMismatch { square: mv.from });
        }
        if matches!(self.get(mv.to), Some((_, target_owner)) if target_owner == owner) {
            return Err(BoardError::OwnPieceCaptured { square: mv.to });
        }

        let next = self.with_move_unchecked(mv.from, mv.to);
        if let Some(col) = facing_generals_column(&next) {
            return Err(BoardError::FacingGenerals { col });
        }
        Ok(next)
    }

    /// Position fingerprint used as a cache key.
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        zobrist::board_key(self)
    }
}

/// Column on which both generals see each other, if any.
pub fn facing_generals_column(board: &BoardState) -> Option<i8> {
    let red = board.find_general(Player::Red)?;
    let black = board.find_general(Player::Black)?;
    if red.col() != black.col() {
        return None;
    }

    let (low, high) = if red.row() < black.row() {
        (red.row(), black.row())
    } else {
        (black.row(), red.row())
    };
    let clear = (low + 1..high)
        .filter_map(|row| Square::new(row, red.col()))
        .all(|square| !board.is_occupied(square));
    clear.then_some(red.col())
}

#[cfg(test)]
mod tests {
    use super::{facing_generals_column, BoardState};
    use crate::errors::BoardError;
    use crate::game_state::xiangqi_types::{Move, PieceType, Player, Square, Verb};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn standard_opening_has_thirty_two_pieces() {
        let board = BoardState::standard_opening();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces_of(Player::Red).count(), 16);
        assert_eq!(board.find_general(Player::Red), Some(sq(9, 4)));
        assert_eq!(board.find_general(Player::Black), Some(sq(0, 4)));
        assert_eq!(
            board.get(sq(7, 7)),
            Some((PieceType::Cannon, Player::Red))
        );
    }

    #[test]
    fn trial_move_leaves_original_untouched() {
        let board = BoardState::standard_opening();
        let next = board.with_move_unchecked(sq(7, 7), sq(7, 4));
        assert!(board.is_occupied(sq(7, 7)));
        assert!(!next.is_occupied(sq(7, 7)));
        assert_eq!(next.get(sq(7, 4)), Some((PieceType::Cannon, Player::Red)));
        assert_ne!(board.fingerprint(), next.fingerprint());
    }

    #[test]
    fn apply_move_rejects_facing_generals() {
        let board = BoardState::new_empty()
            .with_piece(sq(9, 4), PieceType::General, Player::Red)
            .with_piece(sq(0, 4), PieceType::General, Player::Black)
            .with_piece(sq(5, 4), PieceType::Chariot, Player::Red);
        assert_eq!(facing_generals_column(&board), None);

        let mv = Move {
            piece_type: PieceType::Chariot,
            owner: Player::Red,
            from: sq(5, 4),
            to: sq(5, 0),
            verb: Verb::Traverse,
            raw_text: "车五平九".to_owned(),
        };
        assert_eq!(
            board.apply_move(&mv),
            Err(BoardError::FacingGenerals { col: 4 })
        );
    }

    #[test]
    fn apply_move_rejects_mismatched_source() {
        let board = BoardState::standard_opening();
        let mv = Move {
            piece_type: PieceType::Horse,
            owner: Player::Red,
            from: sq(7, 7),
            to: sq(7, 4),
            verb: Verb::Traverse,
            raw_text: "马二平五".to_owned(),
        };
        assert_eq!(
            board.apply_move(&mv),
            Err(BoardError::SourceMismatch { square: sq(7, 7) })
        );
    }
}
