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

//! Sets of squares.

use core::{
    fmt::{self, Write as _},
    iter::FusedIterator,
    ops,
};

use crate::{side::Side, square::Square};

/// A set of [squares](Square), represented by 81 bits of a `u128`.
///
/// Squares are iterated in ascending index order (row by row, starting at
/// row `0`).
///
/// # Examples
///
/// ```
/// use shogiban::{Bitboard, Square};
///
/// let row = Bitboard::row(2);
/// assert_eq!(row.count(), 9);
/// assert!(row.contains(Square::from_coords(2, 4).unwrap()));
/// ```
#[derive(PartialEq, Eq, Copy, Clone, Default, Hash)]
pub struct Bitboard(pub u128);

const FULL_MASK: u128 = (1 << 81) - 1;
const ROW_MASK: u128 = 0x1ff;
const COL_MASK: u128 = {
    let mut mask = 0;
    let mut row = 0;
    while row < 9 {
        mask |= 1 << (row * 9);
        row += 1;
    }
    mask
};

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    /// All 81 squares.
    pub const FULL: Bitboard = Bitboard(FULL_MASK);

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1 << sq.index())
    }

    /// All squares of the given row. Empty if `row >= 9`.
    pub const fn row(row: u32) -> Bitboard {
        if row < 9 {
            Bitboard(ROW_MASK << (9 * row))
        } else {
            Bitboard::EMPTY
        }
    }

    /// All squares of the given column. Empty if `col >= 9`.
    pub const fn col(col: u32) -> Bitboard {
        if col < 9 {
            Bitboard(COL_MASK << col)
        } else {
            Bitboard::EMPTY
        }
    }

    /// The row `n` steps behind the far row of `side`.
    pub const fn relative_row(side: Side, n: u32) -> Bitboard {
        if n < 9 {
            Bitboard::row(side.relative_row(n))
        } else {
            Bitboard::EMPTY
        }
    }

    /// The promotion zone of `side`.
    pub const fn promotion_zone(side: Side) -> Bitboard {
        Bitboard(
            Bitboard::relative_row(side, 0).0
                | Bitboard::relative_row(side, 1).0
                | Bitboard::relative_row(side, 2).0,
        )
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & Bitboard::from_square(sq).0 != 0
    }

    #[inline]
    pub fn add(&mut self, sq: Square) {
        self.0 |= Bitboard::from_square(sq).0;
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !Bitboard::from_square(sq).0;
    }

    #[inline]
    pub fn toggle(&mut self, sq: Square) {
        self.0 ^= Bitboard::from_square(sq).0;
    }

    #[must_use]
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | Bitboard::from_square(sq).0)
    }

    #[must_use]
    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !Bitboard::from_square(sq).0)
    }

    #[inline]
    pub const fn first(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::new(self.0.trailing_zeros()))
        }
    }

    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    #[inline]
    pub const fn single_square(self) -> Option<Square> {
        if self.more_than_one() {
            None
        } else {
            self.first()
        }
    }

    #[inline]
    pub const fn is_subset(self, other: Bitboard) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub const fn is_disjoint(self, other: Bitboard) -> bool {
        self.0 & other.0 == 0
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            for col in 0..9 {
                let sq = Square::new(row * 9 + col);
                f.write_char(if self.contains(sq) { '1' } else { '.' })?;
                f.write_char(if col < 8 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(sq: Square) -> Bitboard {
        Bitboard::from_square(sq)
    }
}

impl<T: Into<Bitboard>> ops::BitAnd<T> for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: T) -> Bitboard {
        Bitboard(self.0 & rhs.into().0)
    }
}

impl<T: Into<Bitboard>> ops::BitAndAssign<T> for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: T) {
        self.0 &= rhs.into().0;
    }
}

impl<T: Into<Bitboard>> ops::BitOr<T> for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: T) -> Bitboard {
        Bitboard(self.0 | rhs.into().0)
    }
}

impl<T: Into<Bitboard>> ops::BitOrAssign<T> for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: T) {
        self.0 |= rhs.into().0;
    }
}

impl<T: Into<Bitboard>> ops::BitXor<T> for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: T) -> Bitboard {
        Bitboard(self.0 ^ rhs.into().0)
    }
}

impl<T: Into<Bitboard>> ops::Sub<T> for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn sub(self, rhs: T) -> Bitboard {
        Bitboard(self.0 & !rhs.into().0)
    }
}

impl ops::Not for Bitboard {
    type Output = Bitboard;

    /// Complement within the 81 board squares.
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0 & FULL_MASK)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I>(iter: I) -> Bitboard
    where
        I: IntoIterator<Item = Square>,
    {
        let mut result = Bitboard::EMPTY;
        result.extend(iter);
        result
    }
}

impl Extend<Square> for Bitboard {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Square>,
    {
        for sq in iter {
            self.add(sq);
        }
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let square = self.first();
        self.0 &= self.0.wrapping_sub(1);
        square
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    fn last(mut self) -> Option<Square> {
        self.next_back()
    }
}

impl DoubleEndedIterator for Bitboard {
    #[inline]
    fn next_back(&mut self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            let sq = Square::new(127 - self.0.leading_zeros());
            self.toggle(sq);
            Some(sq)
        }
    }
}

impl ExactSizeIterator for Bitboard {}

impl FusedIterator for Bitboard {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u32, col: u32) -> Square {
        Square::from_coords(row, col).unwrap()
    }

    #[test]
    fn test_first_last() {
        assert_eq!(Bitboard::from_square(sq(0, 0)).first(), Some(sq(0, 0)));
        assert_eq!(Bitboard::EMPTY.first(), None);
        assert_eq!(
            Bitboard::EMPTY.with(sq(0, 0)).with(sq(8, 8)).last(),
            Some(sq(8, 8))
        );
        assert_eq!(Bitboard::EMPTY.last(), None);
    }

    #[test]
    fn test_rows_and_cols() {
        assert_eq!(Bitboard::row(0).count(), 9);
        assert_eq!(Bitboard::col(8).count(), 9);
        assert_eq!(Bitboard::row(9), Bitboard::EMPTY);
        assert_eq!(Bitboard::row(4) & Bitboard::col(4), Bitboard::from_square(sq(4, 4)));
        assert_eq!(Bitboard::relative_row(Side::Gote, 0), Bitboard::row(8));
        assert_eq!(Bitboard::promotion_zone(Side::Sente).count(), 27);
        assert!(Bitboard::promotion_zone(Side::Gote).contains(sq(6, 0)));
        let all_cols = (0..9).fold(Bitboard::EMPTY, |acc, c| acc | Bitboard::col(c));
        assert_eq!(all_cols, Bitboard::FULL);
    }

    #[test]
    fn test_complement() {
        assert_eq!(!Bitboard::EMPTY, Bitboard::FULL);
        assert_eq!(!Bitboard::FULL, Bitboard::EMPTY);
        assert_eq!((!Bitboard::row(3)).count(), 72);
    }

    #[test]
    fn test_iter_order() {
        let bb: Bitboard = [sq(5, 1), sq(0, 7), sq(8, 0)].into_iter().collect();
        let mut iter = bb;
        assert_eq!(iter.next(), Some(sq(0, 7)));
        assert_eq!(iter.next(), Some(sq(5, 1)));
        assert_eq!(iter.next(), Some(sq(8, 0)));
        assert_eq!(iter.next(), None);
        assert_eq!(bb.rev().next(), Some(sq(8, 0)));
        assert_eq!(bb.single_square(), None);
        assert_eq!((bb & Bitboard::row(5)).single_square(), Some(sq(5, 1)));
    }
}
