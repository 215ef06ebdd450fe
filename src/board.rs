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

use core::{
    fmt::{self, Write as _},
    iter::FusedIterator,
};

use crate::{
    bitboard::Bitboard,
    role::Role,
    side::{BySide, Side},
    square::Square,
    types::Piece,
};

/// Piece positions on a board.
///
/// Every square holds at most one piece. The occupancy sets are kept in sync
/// with the squares.
///
/// # Examples
///
/// ```
/// use shogiban::{Board, Side, Square};
///
/// let board = Board::new();
/// let sq = Square::from_coords(8, 4).unwrap();
/// assert_eq!(board.piece_at(sq), Some(Side::Sente.king()));
/// assert_eq!(board.occupied().count(), 40);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 81],
    by_side: BySide<Bitboard>,
}

const BACK_RANK: [Role; 9] = [
    Role::Lance,
    Role::Knight,
    Role::Silver,
    Role::Gold,
    Role::King,
    Role::Gold,
    Role::Silver,
    Role::Knight,
    Role::Lance,
];

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for side in Side::ALL {
            let back = side.relative_row(8);
            let second = side.relative_row(7);
            let pawns = side.relative_row(6);
            for (col, role) in (0..9).zip(BACK_RANK) {
                board.set(back, col, role.of(side));
                board.set(pawns, col, side.pawn());
            }
            // The rook stands on the right and the bishop on the left, each
            // from the owner's point of view.
            let (rook_col, bishop_col) = side.fold((7, 1), (1, 7));
            board.set(second, rook_col, Role::Rook.of(side));
            board.set(second, bishop_col, Role::Bishop.of(side));
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            squares: [None; 81],
            by_side: BySide {
                sente: Bitboard::EMPTY,
                gote: Bitboard::EMPTY,
            },
        }
    }

    fn set(&mut self, row: u32, col: u32, piece: Piece) {
        if let Some(sq) = Square::from_coords(row, col) {
            self.set_piece_at(sq, piece);
        }
    }

    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn side_at(&self, sq: Square) -> Option<Side> {
        self.piece_at(sq).map(|piece| piece.side)
    }

    /// Puts `piece` on `sq`, replacing and returning any previous occupant.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        let previous = self.remove_piece_at(sq);
        self.squares[sq.index()] = Some(piece);
        self.by_side.get_mut(piece.side).add(sq);
        previous
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take()?;
        self.by_side.get_mut(piece.side).remove(sq);
        Some(piece)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_side.sente | self.by_side.gote
    }

    #[inline]
    pub const fn by_side(&self, side: Side) -> Bitboard {
        *self.by_side.get(side)
    }

    /// Squares holding `piece` (exact kind, including promotion state).
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.by_side(piece.side)
            .filter(|&sq| self.squares[sq.index()] == Some(piece))
            .collect()
    }

    /// Finds the king of `side`. If there are several, the one with the
    /// lowest square index is returned.
    pub fn king_of(&self, side: Side) -> Option<Square> {
        self.by_side(side)
            .find(|&sq| self.squares[sq.index()] == Some(side.king()))
    }

    /// Iterates over all pieces in ascending square order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            board: self,
            remaining: self.occupied(),
        }
    }

    /// Rotates the board by 180 degrees and swaps the sides of all pieces.
    #[must_use]
    pub fn into_swapped(self) -> Board {
        let mut board = Board::empty();
        for (sq, piece) in &self {
            board.set_piece_at(
                sq.rotate(),
                Piece {
                    side: !piece.side,
                    role: piece.role,
                },
            );
        }
        board
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Board {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Board> {
        let mut board = Board::empty();
        for sq in Square::all() {
            if let Some(piece) = u.arbitrary::<Option<Piece>>()? {
                board.set_piece_at(sq, piece);
            }
        }
        Ok(board)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            for col in 0..9 {
                let sq = Square::new(row * 9 + col);
                match self.piece_at(sq) {
                    Some(piece) if piece.role.is_promoted() => {
                        f.write_char('+')?;
                        f.write_char(piece.char())?;
                    }
                    Some(piece) => {
                        f.write_char(' ')?;
                        f.write_char(piece.char())?;
                    }
                    None => f.write_str(" .")?,
                }
                f.write_char(if col < 8 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

/// Iterator over the pieces of a [`Board`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    board: &'a Board,
    remaining: Bitboard,
}

impl Iterator for Iter<'_> {
    type Item = (Square, Piece);

    fn next(&mut self) -> Option<(Square, Piece)> {
        let sq = self.remaining.next()?;
        self.board.piece_at(sq).map(|piece| (sq, piece))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Board {
    type Item = (Square, Piece);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
