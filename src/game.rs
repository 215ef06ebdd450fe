// This file is part of the shogiban library.
// Copyright (C) 2026 The shogiban developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Row and column addressed game interface for presentation layers.

use crate::{
    bitboard::Bitboard,
    check,
    legal,
    m::Move,
    position::{PlayError, Position},
    role::Role,
    side::Side,
    square::Square,
    types::{self, Piece, PromotionStatus},
};

/// A game in progress.
///
/// Coordinates are signed so that callers can pass anything they computed
/// from screen positions. Queries outside of the board return nothing,
/// commands fail with [`PlayError::OutOfBounds`].
///
/// # Examples
///
/// ```
/// use shogiban::{Game, Side};
///
/// let mut game = Game::new();
/// assert!(game.legal_moves(6, 4).contains("5f".parse()?));
///
/// game.apply_move(6, 4, 5, 4, false)?;
/// game.end_turn_and_evaluate();
///
/// assert_eq!(game.current_side(), Side::Gote);
/// assert!(!game.is_in_check(Side::Gote));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Game {
    pos: Position,
}

impl Game {
    /// Starts a game from the standard starting position.
    pub fn new() -> Game {
        Game {
            pos: Position::new(),
        }
    }

    /// Continues a game from `pos`, evaluating check and checkmate for the
    /// side to move.
    pub fn from_position(pos: Position) -> Game {
        let mut game = Game { pos };
        game.evaluate();
        game
    }

    /// Restores the standard starting position.
    pub fn reset(&mut self) {
        log::debug!("new game");
        self.pos = Position::new();
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn into_position(self) -> Position {
        self.pos
    }

    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        Square::from_signed(row, col).and_then(|sq| self.pos.piece_at(sq))
    }

    pub fn hand_count(&self, side: Side, role: Role) -> u8 {
        self.pos.hand(side).get(role)
    }

    pub fn current_side(&self) -> Side {
        self.pos.turn()
    }

    pub fn is_game_over(&self) -> bool {
        self.pos.is_game_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.pos.winner()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.pos.last_move()
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        check::in_check(&self.pos, side)
    }

    /// Legal destinations of the piece at `row`, `col`.
    pub fn legal_moves(&self, row: i32, col: i32) -> Bitboard {
        Square::from_signed(row, col).map_or(Bitboard::EMPTY, |sq| legal::legal_moves(&self.pos, sq))
    }

    /// Squares where `side` could legally drop `role`.
    pub fn legal_drops(&self, side: Side, role: Role) -> Bitboard {
        legal::legal_drops(&self.pos, side, role)
    }

    /// Decides whether a move of `piece` between the given rows may or must
    /// promote. See [`promotion_status()`](crate::promotion_status).
    pub fn promotion_status(piece: Piece, from_row: i32, to_row: i32) -> PromotionStatus {
        let row = |r: i32| u32::try_from(r).unwrap_or(u32::MAX);
        types::promotion_status(piece, row(from_row), row(to_row))
    }

    /// Moves a piece without legality checks. Call
    /// [`Game::end_turn_and_evaluate()`] afterwards.
    ///
    /// # Errors
    ///
    /// Fails with [`PlayError::OutOfBounds`] for coordinates outside of the
    /// board and with [`PlayError::EmptySquare`] if there is nothing to
    /// move. The game is unchanged on error.
    pub fn apply_move(
        &mut self,
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
        promote: bool,
    ) -> Result<Move, PlayError> {
        let from = Square::from_signed(from_row, from_col).ok_or(PlayError::OutOfBounds)?;
        let to = Square::from_signed(to_row, to_col).ok_or(PlayError::OutOfBounds)?;
        self.pos.move_piece(from, to, promote)
    }

    /// Drops a piece of the side to move without legality checks. Call
    /// [`Game::end_turn_and_evaluate()`] afterwards.
    ///
    /// # Errors
    ///
    /// Fails with [`PlayError::OutOfBounds`], [`PlayError::NotInHand`] or
    /// [`PlayError::Occupied`]. The game is unchanged on error.
    pub fn apply_drop(&mut self, role: Role, to_row: i32, to_col: i32) -> Result<Move, PlayError> {
        let to = Square::from_signed(to_row, to_col).ok_or(PlayError::OutOfBounds)?;
        self.pos.drop_piece(role, to, self.pos.turn())
    }

    /// Passes the turn, then records whether the new side to move is in
    /// check, and ends the game if it is checkmated.
    pub fn end_turn_and_evaluate(&mut self) {
        self.pos.switch_side();
        self.evaluate();
    }

    fn evaluate(&mut self) {
        let turn = self.pos.turn();
        let in_check = check::in_check(&self.pos, turn);
        self.pos.set_in_check(in_check);

        if in_check && check::is_checkmate(&self.pos) {
            log::debug!("{turn} is checkmated at ply {}", self.pos.ply());
            self.pos.set_winner(Some(!turn));
        } else if in_check {
            log::debug!("{turn} is in check at ply {}", self.pos.ply());
        }
    }

    /// Validates and plays a move or drop of the side to move, then ends the
    /// turn.
    ///
    /// # Errors
    ///
    /// Fails with [`PlayError::GameOver`] after checkmate and with
    /// [`PlayError::Illegal`] if the move is not legal. The game is
    /// unchanged on error.
    pub fn play(&mut self, m: &Move) -> Result<(), PlayError> {
        if self.pos.is_game_over() {
            return Err(PlayError::GameOver);
        }
        if !legal::is_legal(&self.pos, m) {
            log::trace!("rejected illegal move {m}");
            return Err(PlayError::Illegal(*m));
        }

        self.pos.play_unchecked(m)?;
        self.evaluate();
        Ok(())
    }
}

impl From<Position> for Game {
    fn from(pos: Position) -> Game {
        Game::from_position(pos)
    }
}
