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

//! Check and checkmate detection.

use crate::{
    bitboard::Bitboard,
    legal::{self, DropMateRule},
    movegen,
    position::Position,
    side::Side,
};

/// Tests if the king of `side` is attacked by any opposing piece.
///
/// A side without a king is never in check.
///
/// # Examples
///
/// ```
/// use shogiban::{check::in_check, Position, Side};
///
/// let pos = Position::new();
/// assert!(!in_check(&pos, Side::Sente));
/// assert!(!in_check(&pos, Side::Gote));
/// ```
pub fn in_check(pos: &Position, side: Side) -> bool {
    movegen::king_attacked(pos.board(), side)
}

/// Squares of opposing pieces attacking the king of the side to move.
pub fn checkers(pos: &Position) -> Bitboard {
    let side = pos.turn();
    pos.board()
        .king_of(side)
        .map_or(Bitboard::EMPTY, |king| movegen::attackers(pos.board(), king, !side))
}

/// Tests if the side to move is checkmated: it is in check and has neither a
/// legal board move nor a legal drop.
pub fn is_checkmate(pos: &Position) -> bool {
    is_checkmate_with(pos, DropMateRule::Enforced)
}

/// Like [`is_checkmate()`], but defending pawn drops are not tested against
/// the pawn-drop checkmate rule. Used while evaluating that very rule.
pub(crate) fn is_checkmate_simple(pos: &Position) -> bool {
    is_checkmate_with(pos, DropMateRule::Ignored)
}

fn is_checkmate_with(pos: &Position, rule: DropMateRule) -> bool {
    let side = pos.turn();
    in_check(pos, side) && !has_legal_response(pos, side, rule)
}

fn has_legal_response(pos: &Position, side: Side, rule: DropMateRule) -> bool {
    pos.board()
        .by_side(side)
        .any(|sq| !legal::legal_moves(pos, sq).is_empty())
        || pos
            .hand(side)
            .roles()
            .any(|role| !legal::legal_drops_with(pos, side, role, rule).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{role::Role, setup::Setup, square::Square};

    fn sq(row: u32, col: u32) -> Square {
        Square::from_coords(row, col).unwrap()
    }

    fn rook_on_back_rank() -> Setup {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(sq(0, 4), Side::Gote.king());
        setup.board.set_piece_at(sq(0, 0), Role::Rook.of(Side::Sente));
        setup.board.set_piece_at(sq(8, 4), Side::Sente.king());
        setup.turn = Side::Gote;
        setup
    }

    #[test]
    fn test_missing_king_is_not_in_check() {
        let mut pos = Position::new();
        pos.clear(sq(8, 4));
        assert!(!in_check(&pos, Side::Sente));
    }

    #[test]
    fn test_king_escapes() {
        let pos = Position::from_setup(rook_on_back_rank()).unwrap();
        assert!(in_check(&pos, Side::Gote));
        assert_eq!(checkers(&pos), Bitboard::from_square(sq(0, 0)));
        assert!(!is_checkmate(&pos));
    }

    #[test]
    fn test_back_rank_mate() {
        let mut setup = rook_on_back_rank();
        // A Sente gold covers the row in front of the king.
        setup.board.set_piece_at(sq(2, 4), Role::Gold.of(Side::Sente));
        let pos = Position::from_setup(setup.clone()).unwrap();
        assert!(in_check(&pos, Side::Gote));
        assert!(is_checkmate(&pos));

        // Any piece in hand can interpose.
        setup.hands.gote.add(Role::Silver);
        let pos = Position::from_setup(setup).unwrap();
        assert!(!is_checkmate(&pos));
    }

    #[test]
    fn test_not_in_check_is_not_mate() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(sq(0, 0), Side::Gote.king());
        setup.board.set_piece_at(sq(2, 1), Role::Gold.of(Side::Sente));
        setup.board.set_piece_at(sq(2, 0), Role::Gold.of(Side::Sente));
        setup.board.set_piece_at(sq(8, 8), Side::Sente.king());
        setup.turn = Side::Gote;
        let pos = Position::from_setup(setup).unwrap();
        assert!(!in_check(&pos, Side::Gote));
        assert!(!is_checkmate(&pos));
    }
}
