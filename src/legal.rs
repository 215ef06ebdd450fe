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

//! Legal moves and drops.
//!
//! Board moves are legal when they do not leave the mover's king attacked.
//! Drops additionally obey the double-pawn rule, may not put a piece where
//! it could never move again, and a pawn drop may not deliver checkmate.

use crate::{
    bitboard::Bitboard,
    check,
    m::{Move, MoveList},
    movegen,
    position::Position,
    role::Role,
    side::Side,
    square::Square,
    types::{promotion_status, PromotionStatus},
};

/// Whether drop legality checks for pawn-drop checkmate.
///
/// The rule is evaluated with a checkmate test that itself ignores the
/// rule, so nesting never goes deeper than one level.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum DropMateRule {
    Enforced,
    Ignored,
}

/// Legal destinations of the piece on `sq`, or an empty set if the square
/// is empty.
///
/// A destination is legal if, after putting the piece there and clearing
/// the origin, the king of the piece's side is not attacked.
///
/// # Examples
///
/// ```
/// use shogiban::{legal::legal_moves, Position, Square};
///
/// let pos = Position::new();
/// let king = Square::from_coords(8, 4).unwrap();
/// assert_eq!(legal_moves(&pos, king).count(), 3);
/// ```
pub fn legal_moves(pos: &Position, sq: Square) -> Bitboard {
    let Some(piece) = pos.piece_at(sq) else {
        return Bitboard::EMPTY;
    };

    movegen::pseudo_moves(pos, sq)
        .filter(|&to| {
            let mut trial = pos.board().clone();
            trial.set_piece_at(to, piece);
            trial.remove_piece_at(sq);
            !movegen::king_attacked(&trial, piece.side)
        })
        .collect()
}

/// Empty squares where `side` may legally drop a piece of `role`.
///
/// The hand is not consulted: the result says where a piece could go if
/// `side` held one. Kings and promoted kinds are never droppable.
///
/// # Examples
///
/// ```
/// use shogiban::{legal::legal_drops, Bitboard, Position, Role, Side};
///
/// let pos = Position::new();
///
/// // Every column already holds a Sente pawn.
/// assert_eq!(legal_drops(&pos, Side::Sente, Role::Pawn), Bitboard::EMPTY);
/// assert_eq!(legal_drops(&pos, Side::Sente, Role::Gold).count(), 41);
/// ```
pub fn legal_drops(pos: &Position, side: Side, role: Role) -> Bitboard {
    legal_drops_with(pos, side, role, DropMateRule::Enforced)
}

pub(crate) fn legal_drops_with(pos: &Position, side: Side, role: Role, rule: DropMateRule) -> Bitboard {
    if !role.is_droppable() {
        return Bitboard::EMPTY;
    }

    let board = pos.board();
    let mut targets = !board.occupied();

    match role {
        Role::Pawn => {
            targets = targets - Bitboard::relative_row(side, 0);
            for pawn in board.by_piece(side.pawn()) {
                targets = targets - Bitboard::col(pawn.col());
            }
        }
        Role::Lance => targets = targets - Bitboard::relative_row(side, 0),
        Role::Knight => {
            targets = targets - Bitboard::relative_row(side, 0) - Bitboard::relative_row(side, 1);
        }
        _ => (),
    }

    targets
        .filter(|&to| {
            if role == Role::Pawn && rule == DropMateRule::Enforced && is_drop_mate(pos, side, to) {
                log::trace!("pawn drop at {to} would give checkmate");
                return false;
            }

            let mut trial = board.clone();
            trial.set_piece_at(to, role.of(side));
            !movegen::king_attacked(&trial, side)
        })
        .collect()
}

fn is_drop_mate(pos: &Position, side: Side, to: Square) -> bool {
    let mut trial = pos.clone();
    trial.place(to, side.pawn());
    trial.set_turn(!side);
    check::in_check(&trial, !side) && check::is_checkmate_simple(&trial)
}

/// Generates every legal move and drop of the side to move.
///
/// Moves that may promote are generated twice, with and without promotion.
/// Moves that must promote are only generated with promotion. Drops are
/// generated for every kind in hand.
///
/// # Examples
///
/// ```
/// use shogiban::{legal::all_legal_moves, Position};
///
/// assert_eq!(all_legal_moves(&Position::new()).len(), 30);
/// ```
pub fn all_legal_moves(pos: &Position) -> MoveList {
    let side = pos.turn();
    let board = pos.board();
    let mut moves = MoveList::new();

    for from in board.by_side(side) {
        let Some(piece) = board.piece_at(from) else {
            continue;
        };
        for to in legal_moves(pos, from) {
            let capture = board.role_at(to);
            let mut push = |promotion| {
                moves.push(Move::Normal {
                    role: piece.role,
                    from,
                    capture,
                    to,
                    promotion,
                });
            };
            match promotion_status(piece, from.row(), to.row()) {
                PromotionStatus::None => push(false),
                PromotionStatus::Optional => {
                    push(false);
                    push(true);
                }
                PromotionStatus::Mandatory => push(true),
            }
        }
    }

    for role in pos.hand(side).roles() {
        for to in legal_drops(pos, side, role) {
            moves.push(Move::Drop { role, to });
        }
    }

    moves
}

/// Tests if `m` is a legal move or drop for the side to move.
pub fn is_legal(pos: &Position, m: &Move) -> bool {
    let side = pos.turn();
    match *m {
        Move::Normal {
            role,
            from,
            capture,
            to,
            promotion,
        } => {
            let piece = role.of(side);
            if pos.piece_at(from) != Some(piece)
                || pos.board().role_at(to) != capture
                || !legal_moves(pos, from).contains(to)
            {
                return false;
            }
            let status = promotion_status(piece, from.row(), to.row());
            if promotion {
                status.can_promote()
            } else {
                status.can_decline()
            }
        }
        Move::Drop { role, to } => {
            pos.hand(side).get(role) > 0
                && role.is_droppable()
                && legal_drops(pos, side, role).contains(to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Setup;

    fn sq(row: u32, col: u32) -> Square {
        Square::from_coords(row, col).unwrap()
    }

    fn position(setup: Setup) -> Position {
        Position::from_setup(setup)
            .or_else(|err| err.ignore_missing_king())
            .unwrap()
    }

    /// Gote king boxed in on the right edge, with a Sente gold guarding the
    /// square in front of it.
    fn boxed_king() -> Setup {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(sq(2, 7), Role::Silver.of(Side::Gote));
        setup.board.set_piece_at(sq(2, 8), Side::Gote.pawn());
        setup.board.set_piece_at(sq(3, 6), Side::Gote.pawn());
        setup.board.set_piece_at(sq(3, 7), Side::Gote.pawn());
        setup.board.set_piece_at(sq(3, 8), Side::Gote.king());
        setup.board.set_piece_at(sq(5, 7), Role::Gold.of(Side::Sente));
        setup.hands.sente.pawn = 1;
        setup
    }

    #[test]
    fn test_pinned_piece() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(sq(8, 4), Side::Sente.king());
        setup.board.set_piece_at(sq(6, 4), Role::Gold.of(Side::Sente));
        setup.board.set_piece_at(sq(0, 4), Role::Rook.of(Side::Gote));
        setup.board.set_piece_at(sq(0, 0), Side::Gote.king());
        let pos = position(setup);
        let moves = legal_moves(&pos, sq(6, 4));
        let along_file: Bitboard = [sq(5, 4), sq(7, 4)].into_iter().collect();
        assert_eq!(moves, along_file);
    }

    #[test]
    fn test_dead_squares() {
        let pos = position(Setup::empty());
        assert!((legal_drops(&pos, Side::Sente, Role::Pawn) & Bitboard::row(0)).is_empty());
        assert!((legal_drops(&pos, Side::Sente, Role::Lance) & Bitboard::row(0)).is_empty());
        assert_eq!(legal_drops(&pos, Side::Sente, Role::Knight).count(), 63);
        assert_eq!(legal_drops(&pos, Side::Gote, Role::Knight), Bitboard::FULL - Bitboard::row(7) - Bitboard::row(8));
        assert_eq!(legal_drops(&pos, Side::Gote, Role::Silver), Bitboard::FULL);
        assert_eq!(legal_drops(&pos, Side::Gote, Role::King), Bitboard::EMPTY);
        assert_eq!(legal_drops(&pos, Side::Gote, Role::ProPawn), Bitboard::EMPTY);
    }

    #[test]
    fn test_double_pawn_ignores_tokin() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(sq(4, 2), Side::Sente.pawn());
        setup.board.set_piece_at(sq(4, 5), Role::ProPawn.of(Side::Sente));
        setup.board.set_piece_at(sq(4, 6), Side::Gote.pawn());
        let pos = position(setup);
        let drops = legal_drops(&pos, Side::Sente, Role::Pawn);
        assert!((drops & Bitboard::col(2)).is_empty());
        assert_eq!((drops & Bitboard::col(5)).count(), 7);
        assert_eq!((drops & Bitboard::col(6)).count(), 7);
    }

    #[test]
    fn test_pawn_drop_mate() {
        let pos = position(boxed_king());
        let drops = legal_drops(&pos, Side::Sente, Role::Pawn);
        assert!(!drops.contains(sq(4, 8)));
        assert!(drops.contains(sq(4, 0)));
        assert!(!all_legal_moves(&pos).contains(&Move::Drop {
            role: Role::Pawn,
            to: sq(4, 8)
        }));

        // A lance may give the same mate.
        let mut setup = boxed_king();
        setup.hands.sente.pawn = 0;
        setup.hands.sente.lance = 1;
        let pos = position(setup);
        assert!(legal_drops(&pos, Side::Sente, Role::Lance).contains(sq(4, 8)));
    }

    #[test]
    fn test_pawn_drop_check_with_escape() {
        let mut setup = boxed_king();
        // Without the gold, the king escapes diagonally.
        setup.board.remove_piece_at(sq(5, 7));
        let pos = position(setup);
        assert!(legal_drops(&pos, Side::Sente, Role::Pawn).contains(sq(4, 8)));
    }

    #[test]
    fn test_self_check_drop() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(sq(8, 4), Side::Sente.king());
        setup.board.set_piece_at(sq(0, 4), Role::Lance.of(Side::Gote));
        setup.board.set_piece_at(sq(0, 0), Side::Gote.king());
        setup.turn = Side::Sente;
        let pos = Position::from_setup(setup).unwrap();
        assert!(pos.is_in_check_flag());
        let drops = legal_drops(&pos, Side::Sente, Role::Gold);
        assert_eq!(drops, Bitboard::col(4) - Bitboard::row(0) - Bitboard::row(8));
    }

    #[test]
    fn test_is_legal() {
        let pos = Position::new();
        let push = Move::Normal {
            role: Role::Pawn,
            from: sq(6, 2),
            capture: None,
            to: sq(5, 2),
            promotion: false,
        };
        assert!(is_legal(&pos, &push));
        let promoting = Move::Normal {
            role: Role::Pawn,
            from: sq(6, 2),
            capture: None,
            to: sq(5, 2),
            promotion: true,
        };
        assert!(!is_legal(&pos, &promoting));
        assert!(!is_legal(&pos, &Move::Drop {
            role: Role::Pawn,
            to: sq(4, 4)
        }));
        for m in all_legal_moves(&pos) {
            assert!(is_legal(&pos, &m), "{m}");
        }
    }
}
