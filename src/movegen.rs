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

//! Pseudo-legal move generation.
//!
//! Destinations produced here ignore whether the moving side's own king is
//! left attacked. See [`crate::legal`] for fully legal moves.

use crate::{
    bitboard::Bitboard,
    board::Board,
    catalog::movement,
    position::Position,
    side::Side,
    square::{Delta, Square},
    types::Piece,
};

fn sliding_attacks(sq: Square, occupied: Bitboard, delta: Delta) -> Bitboard {
    let mut attack = Bitboard::EMPTY;
    let mut previous = sq;

    while let Some(s) = previous.offset(delta) {
        attack.add(s);

        if occupied.contains(s) {
            break;
        }

        previous = s;
    }

    attack
}

/// Squares reached by `piece` standing on `sq`, including squares occupied
/// by either side. Slides stop at the first occupied square.
pub fn attacks(sq: Square, piece: Piece, occupied: Bitboard) -> Bitboard {
    let movement = movement(piece.role, piece.side);

    let mut result: Bitboard = movement.steps().filter_map(|delta| sq.offset(delta)).collect();
    for delta in movement.slides() {
        result |= sliding_attacks(sq, occupied, delta);
    }
    result
}

/// Pseudo-legal destinations of the piece on `sq`, or an empty set if the
/// square is empty.
///
/// # Examples
///
/// ```
/// use shogiban::{movegen::pseudo_moves, Position, Square};
///
/// let pos = Position::new();
/// let lance = Square::from_coords(8, 0).unwrap();
/// let pawn = Square::from_coords(6, 0).unwrap();
///
/// assert_eq!(pseudo_moves(&pos, lance).count(), 1);
/// assert_eq!(pseudo_moves(&pos, pawn).first(), Square::from_coords(5, 0));
/// ```
pub fn pseudo_moves(pos: &Position, sq: Square) -> Bitboard {
    destinations(pos.board(), sq)
}

pub(crate) fn destinations(board: &Board, sq: Square) -> Bitboard {
    match board.piece_at(sq) {
        Some(piece) => attacks(sq, piece, board.occupied()) & !board.by_side(piece.side),
        None => Bitboard::EMPTY,
    }
}

/// Squares of pieces of `attacker` that pseudo-reach `target`.
pub fn attackers(board: &Board, target: Square, attacker: Side) -> Bitboard {
    let occupied = board.occupied();
    board
        .by_side(attacker)
        .filter(|&sq| {
            board
                .piece_at(sq)
                .is_some_and(|piece| attacks(sq, piece, occupied).contains(target))
        })
        .collect()
}

/// Tests if any piece of `attacker` pseudo-reaches `target`.
pub fn attacks_on(pos: &Position, target: Square, attacker: Side) -> bool {
    !attackers(pos.board(), target, attacker).is_empty()
}

/// Tests if the king of `side` is attacked. A side without king is never
/// attacked.
pub(crate) fn king_attacked(board: &Board, side: Side) -> bool {
    board
        .king_of(side)
        .is_some_and(|king| !attackers(board, king, !side).is_empty())
}
