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

use core::{error::Error, fmt, num::NonZeroU32};

use bitflags::bitflags;

use crate::{
    bitboard::Bitboard,
    board::Board,
    hand::Hand,
    m::Move,
    movegen,
    role::Role,
    setup::Setup,
    side::{BySide, Side},
    square::Square,
    types::Piece,
};

/// Error when trying to play an illegal move or to apply a move that does
/// not fit the position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// There is no piece on the origin square.
    EmptySquare(Square),
    /// The side has no piece of this kind in hand, or the kind cannot be
    /// dropped at all.
    NotInHand { side: Side, role: Role },
    /// The drop target is occupied.
    Occupied(Square),
    /// Coordinates outside of the board.
    OutOfBounds,
    /// The move is not legal in the position.
    Illegal(Move),
    /// The game is already decided.
    GameOver,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::EmptySquare(sq) => write!(f, "no piece on {sq}"),
            PlayError::NotInHand { side, role } => {
                write!(f, "{side} has no {role} in hand")
            }
            PlayError::Occupied(sq) => write!(f, "cannot drop on occupied square {sq}"),
            PlayError::OutOfBounds => f.write_str("coordinates out of bounds"),
            PlayError::Illegal(m) => write!(f, "illegal move {m}"),
            PlayError::GameOver => f.write_str("game is over"),
        }
    }
}

impl Error for PlayError {}

bitflags! {
    /// Reasons for a [`Setup`] not being a legal [`Position`].
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// A side has no king.
        const MISSING_KING = 1 << 0;

        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 1;

        /// A side has two unpromoted pawns in the same column.
        const DOUBLE_PAWN = 1 << 2;

        /// An unpromoted pawn or lance on the far row, or an unpromoted
        /// knight on the far two rows. Such a piece could never move again.
        const IMMOBILE_PIECE = 1 << 3;

        /// The player not to move is in check.
        const OPPOSITE_CHECK = 1 << 4;

        /// More pieces of a base kind on the board and in both hands than a
        /// complete set holds.
        const TOO_MUCH_MATERIAL = 1 << 5;
    }
}

/// Error when trying to create a [`Position`] from an illegal [`Setup`].
#[derive(Clone)]
pub struct PositionError {
    pub(crate) errors: PositionErrorKinds,
    pub(crate) pos: Position,
}

impl PositionError {
    fn ignore(mut self, ignore: PositionErrorKinds) -> Result<Position, PositionError> {
        self.errors.remove(ignore);
        if self.errors.is_empty() {
            Ok(self.pos)
        } else {
            Err(self)
        }
    }

    /// Get the position despite missing kings. Move generation and check
    /// detection cope with that, which is useful for problem fixtures.
    ///
    /// # Errors
    ///
    /// Returns the original error if any other problem remains.
    pub fn ignore_missing_king(self) -> Result<Position, PositionError> {
        self.ignore(PositionErrorKinds::MISSING_KING)
    }

    /// Get the position despite two unpromoted pawns of one side sharing a
    /// column.
    ///
    /// # Errors
    ///
    /// Returns the original error if any other problem remains.
    pub fn ignore_double_pawn(self) -> Result<Position, PositionError> {
        self.ignore(PositionErrorKinds::DOUBLE_PAWN)
    }

    pub fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl fmt::Debug for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionError")
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position: ")?;

        let mut first = true;
        let mut reason = |kind: PositionErrorKinds, text: &str| -> fmt::Result {
            if self.errors.contains(kind) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(text)?;
                first = false;
            }
            Ok(())
        };

        reason(PositionErrorKinds::MISSING_KING, "missing king")?;
        reason(PositionErrorKinds::TOO_MANY_KINGS, "too many kings")?;
        reason(PositionErrorKinds::DOUBLE_PAWN, "two pawns in one column")?;
        reason(PositionErrorKinds::IMMOBILE_PIECE, "piece without moves")?;
        reason(PositionErrorKinds::OPPOSITE_CHECK, "opponent in check")?;
        reason(PositionErrorKinds::TOO_MUCH_MATERIAL, "too much material")?;

        if first {
            f.write_str("unknown reason")?;
        }

        Ok(())
    }
}

impl Error for PositionError {}

/// A shogi position: board, hands, side to move and game flags.
///
/// The mutators on this type apply changes without any rule validation.
/// Callers gate moves through the [legality filter](crate::legal), or use
/// [`Game::play()`](crate::Game::play).
///
/// # Examples
///
/// ```
/// use shogiban::{Position, Side, Square};
///
/// let mut pos = Position::new();
/// let from = Square::from_coords(6, 4).unwrap();
/// let to = Square::from_coords(5, 4).unwrap();
/// pos.move_piece(from, to, false)?;
/// pos.switch_side();
///
/// assert_eq!(pos.turn(), Side::Gote);
/// assert_eq!(pos.piece_at(to), Some(Side::Sente.pawn()));
/// # Ok::<_, shogiban::PlayError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    board: Board,
    hands: BySide<Hand>,
    turn: Side,
    ply: NonZeroU32,
    last_move: Option<Move>,
    in_check: bool,
    winner: Option<Side>,
}

impl Position {
    /// The standard starting position with Sente to move.
    pub fn new() -> Position {
        Position::from_setup_unchecked(Setup::default())
    }

    fn from_setup_unchecked(setup: Setup) -> Position {
        let mut pos = Position {
            board: setup.board,
            hands: setup.hands,
            turn: setup.turn,
            ply: setup.ply,
            last_move: None,
            in_check: false,
            winner: None,
        };
        pos.in_check = movegen::king_attacked(&pos.board, pos.turn);
        pos
    }

    /// Validates a [`Setup`] and constructs a position.
    ///
    /// # Errors
    ///
    /// Errors if the setup is not legal. The error still carries the
    /// position, which can be recovered with
    /// [`PositionError::ignore_missing_king()`] and friends.
    pub fn from_setup(setup: Setup) -> Result<Position, PositionError> {
        let pos = Position::from_setup_unchecked(setup);
        let errors = pos.validate();
        if errors.is_empty() {
            Ok(pos)
        } else {
            Err(PositionError { errors, pos })
        }
    }

    fn validate(&self) -> PositionErrorKinds {
        let mut errors = PositionErrorKinds::empty();

        for side in Side::ALL {
            let kings = self.board.by_piece(side.king()).count();
            if kings == 0 {
                errors |= PositionErrorKinds::MISSING_KING;
            } else if kings > 1 {
                errors |= PositionErrorKinds::TOO_MANY_KINGS;
            }

            let pawns = self.board.by_piece(side.pawn());
            if (0..9).any(|col| (pawns & Bitboard::col(col)).more_than_one()) {
                errors |= PositionErrorKinds::DOUBLE_PAWN;
            }

            let far = Bitboard::relative_row(side, 0);
            let near_far = far | Bitboard::relative_row(side, 1);
            let immobile = (self.board.by_piece(side.pawn()) & far)
                | (self.board.by_piece(Role::Lance.of(side)) & far)
                | (self.board.by_piece(Role::Knight.of(side)) & near_far);
            if !immobile.is_empty() {
                errors |= PositionErrorKinds::IMMOBILE_PIECE;
            }
        }

        if movegen::king_attacked(&self.board, !self.turn) {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        for role in Role::HAND {
            let on_board = self
                .board
                .iter()
                .filter(|(_, piece)| piece.role.unpromote() == role)
                .count();
            let in_hand: usize = self.hands.iter().map(|hand| usize::from(hand.get(role))).sum();
            if on_board + in_hand > usize::from(Hand::FULL.get(role)) {
                errors |= PositionErrorKinds::TOO_MUCH_MATERIAL;
            }
        }

        errors
    }

    /// Converts the position back into a [`Setup`], dropping the game flags.
    pub fn to_setup(&self) -> Setup {
        Setup {
            board: self.board.clone(),
            hands: self.hands,
            turn: self.turn,
            ply: self.ply,
        }
    }

    pub fn into_setup(self) -> Setup {
        Setup {
            board: self.board,
            hands: self.hands,
            turn: self.turn,
            ply: self.ply,
        }
    }

    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub const fn hands(&self) -> &BySide<Hand> {
        &self.hands
    }

    #[inline]
    pub const fn hand(&self, side: Side) -> &Hand {
        self.hands.get(side)
    }

    #[inline]
    pub const fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub const fn ply(&self) -> NonZeroU32 {
        self.ply
    }

    #[inline]
    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// The in-check flag of the side to move, as recorded at the last
    /// evaluation. Use [`crate::check::in_check()`] to compute it.
    #[inline]
    pub const fn is_in_check_flag(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub const fn winner(&self) -> Option<Side> {
        self.winner
    }

    #[inline]
    pub const fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Puts a piece on the board, returning the previous occupant.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.board.set_piece_at(sq, piece)
    }

    /// Removes and returns the piece on `sq`.
    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        self.board.remove_piece_at(sq)
    }

    /// Adds `role` (in its base form) to the hand of `side`. Kings are
    /// silently ignored.
    pub fn add_to_hand(&mut self, side: Side, role: Role) {
        self.hands.get_mut(side).add(role);
    }

    /// Takes one `role` out of the hand of `side`. Returns `false` if there
    /// is none.
    pub fn remove_from_hand(&mut self, side: Side, role: Role) -> bool {
        self.hands.get_mut(side).remove(role)
    }

    /// Relocates the piece on `from` to `to`.
    ///
    /// Any piece on `to` is captured into the mover's hand in base form,
    /// unless it is a king. The piece promotes if `promote` is set and its
    /// kind can promote. The move is recorded as the last move and returned.
    ///
    /// No legality checks are performed.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::EmptySquare`] and leaves the position unchanged
    /// if there is no piece on `from`.
    pub fn move_piece(&mut self, from: Square, to: Square, promote: bool) -> Result<Move, PlayError> {
        let Some(piece) = self.board.remove_piece_at(from) else {
            log::trace!("move from empty square {from}");
            return Err(PlayError::EmptySquare(from));
        };

        let promoted = if promote { piece.promoted() } else { None };
        let captured = self.board.set_piece_at(to, promoted.unwrap_or(piece));
        if let Some(captured) = captured {
            self.add_to_hand(piece.side, captured.role);
        }

        let m = Move::Normal {
            role: piece.role,
            from,
            capture: captured.map(|c| c.role),
            to,
            promotion: promoted.is_some(),
        };
        self.last_move = Some(m);
        Ok(m)
    }

    /// Drops an unpromoted piece of `role` from the hand of `side` onto
    /// `to`, and records the drop as the last move.
    ///
    /// No legality checks beyond availability are performed.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NotInHand`] if `side` holds no such piece and
    /// [`PlayError::Occupied`] if `to` is not empty. The position is left
    /// unchanged on error.
    pub fn drop_piece(&mut self, role: Role, to: Square, side: Side) -> Result<Move, PlayError> {
        if !role.is_droppable() || self.hand(side).get(role) == 0 {
            log::trace!("{side} has no {role} to drop");
            return Err(PlayError::NotInHand { side, role });
        }
        if self.board.piece_at(to).is_some() {
            log::trace!("drop on occupied square {to}");
            return Err(PlayError::Occupied(to));
        }

        self.remove_from_hand(side, role);
        self.board.set_piece_at(to, role.of(side));
        let m = Move::Drop { role, to };
        self.last_move = Some(m);
        Ok(m)
    }

    /// Plays a move or drop of the side to move and passes the turn. The
    /// in-check flag is updated for the new side to move.
    ///
    /// The move is not validated. Use [`crate::legal::is_legal()`] first.
    ///
    /// # Errors
    ///
    /// See [`Position::move_piece()`] and [`Position::drop_piece()`]. The
    /// position is left unchanged on error.
    pub fn play_unchecked(&mut self, m: &Move) -> Result<(), PlayError> {
        match *m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => self.move_piece(from, to, promotion)?,
            Move::Drop { role, to } => self.drop_piece(role, to, self.turn)?,
        };
        self.switch_side();
        self.in_check = movegen::king_attacked(&self.board, self.turn);
        Ok(())
    }

    /// Passes the turn to the other side and advances the ply counter.
    pub fn switch_side(&mut self) {
        self.turn = !self.turn;
        self.ply = self.ply.saturating_add(1);
    }

    pub(crate) fn set_turn(&mut self, turn: Side) {
        self.turn = turn;
    }

    pub fn set_in_check(&mut self, in_check: bool) {
        self.in_check = in_check;
    }

    pub fn set_winner(&mut self, winner: Option<Side>) {
        self.winner = winner;
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u32, col: u32) -> Square {
        Square::from_coords(row, col).unwrap()
    }

    #[test]
    fn test_move_piece_captures_base_form() {
        let mut pos = Position::new();
        pos.place(sq(4, 4), Role::ProBishop.of(Side::Gote));
        pos.place(sq(5, 4), Role::Rook.of(Side::Sente));
        let m = pos.move_piece(sq(5, 4), sq(4, 4), false).unwrap();
        assert_eq!(m.capture(), Some(Role::ProBishop));
        assert_eq!(pos.hand(Side::Sente).bishop, 1);
        assert_eq!(pos.piece_at(sq(5, 4)), None);
        assert_eq!(pos.last_move(), Some(m));
    }

    #[test]
    fn test_move_piece_never_hands_kings() {
        let mut pos = Position::new();
        pos.place(sq(1, 4), Role::Gold.of(Side::Sente));
        pos.move_piece(sq(1, 4), sq(0, 4), false).unwrap();
        assert!(pos.hand(Side::Sente).is_empty());
        assert_eq!(pos.piece_at(sq(0, 4)), Some(Role::Gold.of(Side::Sente)));
    }

    #[test]
    fn test_move_piece_promotion_request() {
        let mut pos = Position::new();
        let m = pos.move_piece(sq(8, 4), sq(7, 4), true).unwrap();
        assert!(!m.is_promotion());
        assert_eq!(pos.piece_at(sq(7, 4)), Some(Side::Sente.king()));

        let m = pos.move_piece(sq(6, 0), sq(2, 0), true).unwrap();
        assert!(m.is_promotion());
        assert_eq!(m.capture(), Some(Role::Pawn));
        assert_eq!(pos.piece_at(sq(2, 0)), Some(Role::ProPawn.of(Side::Sente)));
    }

    #[test]
    fn test_move_from_empty_square() {
        let mut pos = Position::new();
        let before = pos.clone();
        assert_eq!(
            pos.move_piece(sq(4, 4), sq(3, 4), false),
            Err(PlayError::EmptySquare(sq(4, 4)))
        );
        assert_eq!(pos, before);
    }

    #[test]
    fn test_drop_piece() {
        let mut pos = Position::new();
        assert_eq!(
            pos.drop_piece(Role::Pawn, sq(4, 4), Side::Sente),
            Err(PlayError::NotInHand {
                side: Side::Sente,
                role: Role::Pawn
            })
        );
        pos.add_to_hand(Side::Sente, Role::ProPawn);
        assert_eq!(
            pos.drop_piece(Role::Pawn, sq(6, 4), Side::Sente),
            Err(PlayError::Occupied(sq(6, 4)))
        );
        assert_eq!(pos.hand(Side::Sente).pawn, 1);
        let m = pos.drop_piece(Role::Pawn, sq(4, 4), Side::Sente).unwrap();
        assert_eq!(m, Move::Drop { role: Role::Pawn, to: sq(4, 4) });
        assert!(pos.hand(Side::Sente).is_empty());
        assert_eq!(
            pos.drop_piece(Role::ProPawn, sq(4, 3), Side::Sente),
            Err(PlayError::NotInHand {
                side: Side::Sente,
                role: Role::ProPawn
            })
        );
    }

    #[test]
    fn test_switch_side() {
        let mut pos = Position::new();
        pos.switch_side();
        pos.switch_side();
        assert_eq!(pos.turn(), Side::Sente);
        assert_eq!(pos.ply().get(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let pos = Position::new();
        let mut clone = pos.clone();
        clone.clear(sq(8, 4));
        clone.add_to_hand(Side::Gote, Role::Rook);
        clone.set_winner(Some(Side::Gote));
        assert_eq!(pos.piece_at(sq(8, 4)), Some(Side::Sente.king()));
        assert!(pos.hand(Side::Gote).is_empty());
        assert!(!pos.is_game_over());
    }

    #[test]
    fn test_validation() {
        assert!(Position::from_setup(Setup::default()).is_ok());

        let err = Position::from_setup(Setup::empty()).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::MISSING_KING);
        assert!(err.ignore_missing_king().is_ok());

        let mut setup = Setup::default();
        setup.board.set_piece_at(sq(4, 0), Side::Sente.pawn());
        setup.board.set_piece_at(sq(1, 0), Role::Knight.of(Side::Sente));
        let err = Position::from_setup(setup).unwrap_err();
        assert!(err.kinds().contains(PositionErrorKinds::DOUBLE_PAWN));
        assert!(err.kinds().contains(PositionErrorKinds::IMMOBILE_PIECE));
        assert!(err.ignore_double_pawn().is_err());
    }

    #[test]
    fn test_opposite_check() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(sq(0, 0), Side::Gote.king());
        setup.board.set_piece_at(sq(8, 8), Side::Sente.king());
        setup.board.set_piece_at(sq(0, 5), Role::Rook.of(Side::Sente));
        let err = Position::from_setup(setup.clone()).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::OPPOSITE_CHECK);

        setup.swap_turn();
        let pos = Position::from_setup(setup).unwrap();
        assert!(pos.is_in_check_flag());
    }

    #[test]
    fn test_too_much_material() {
        let mut setup = Setup::default();
        assert!(Position::from_setup(setup.clone()).is_ok());

        // A third rook, promoted or not, is one too many.
        setup.board.set_piece_at(sq(4, 4), Role::ProRook.of(Side::Sente));
        let err = Position::from_setup(setup.clone()).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::TOO_MUCH_MATERIAL);
        assert!(err.ignore_missing_king().is_err());

        // Pieces in hand count as well.
        setup.board.remove_piece_at(sq(4, 4));
        setup.hands.gote.pawn = 1;
        let err = Position::from_setup(setup).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::TOO_MUCH_MATERIAL);
    }
}
