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

use core::{error::Error, fmt, num, str::FromStr};

use crate::{side::Side, util::overflow_error};

/// A square of the 9x9 board, addressed by row and column.
///
/// Row `0` is the far rank of Sente (Gote's back rank) and row `8` is
/// Sente's back rank. Column `0` is the leftmost column from Sente's point
/// of view, which is file `9` in USI notation.
///
/// # Examples
///
/// ```
/// use shogiban::Square;
///
/// let sq = Square::from_coords(6, 2).unwrap();
/// assert_eq!(sq.to_string(), "7g");
/// assert_eq!("7g".parse::<Square>()?, sq);
/// # Ok::<_, shogiban::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 81;

    /// Gets the square with the given index `row * 9 + col`.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..81`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> Square {
        assert!(index < 81);
        Square(index as u8)
    }

    /// Gets the square at the given row and column, or `None` if either is
    /// outside `0..9`.
    #[inline]
    pub const fn from_coords(row: u32, col: u32) -> Option<Square> {
        if row < 9 && col < 9 {
            Some(Square((row * 9 + col) as u8))
        } else {
            None
        }
    }

    /// Like [`Square::from_coords()`], but for signed coordinates as used by
    /// external interfaces.
    #[inline]
    pub fn from_signed(row: i32, col: i32) -> Option<Square> {
        Square::from_coords(u32::try_from(row).ok()?, u32::try_from(col).ok()?)
    }

    /// Parses a square name like `7g`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not a valid square name.
    pub const fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        if s.len() == 2 {
            if let (b'1'..=b'9', b'a'..=b'i') = (s[0], s[1]) {
                let col = (b'9' - s[0]) as u32;
                let row = (s[1] - b'a') as u32;
                return Ok(Square((row * 9 + col) as u8));
            }
        }
        Err(ParseSquareError)
    }

    #[inline]
    pub const fn row(self) -> u32 {
        self.0 as u32 / 9
    }

    #[inline]
    pub const fn col(self) -> u32 {
        self.0 as u32 % 9
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The file number used in USI notation, `1` to `9`.
    #[inline]
    pub const fn file(self) -> u32 {
        9 - self.col()
    }

    /// The rank letter used in USI notation, `a` to `i`.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'a' + self.row() as u8) as char
    }

    /// Gets the square `delta` away, or `None` if that would leave the
    /// board.
    #[inline]
    pub const fn offset(self, delta: Delta) -> Option<Square> {
        let row = self.row() as i32 + delta.row;
        let col = self.col() as i32 + delta.col;
        if row >= 0 && row < 9 && col >= 0 && col < 9 {
            Some(Square((row * 9 + col) as u8))
        } else {
            None
        }
    }

    /// Tests if the square is in the promotion zone of `side`.
    #[inline]
    pub const fn in_promotion_zone(self, side: Side) -> bool {
        side.in_promotion_zone(self.row())
    }

    /// The square at the same position from the other side's point of view.
    #[must_use]
    #[inline]
    pub const fn rotate(self) -> Square {
        Square(80 - self.0)
    }

    /// Iterates over all squares in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..81).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank_char())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        Ok(Square(u.int_in_range(0..=80)?))
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        <u8 as arbitrary::Arbitrary>::size_hint(depth)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

macro_rules! int_from_square_impl {
    ($($t:ty)+) => {
        $(impl From<Square> for $t {
            #[inline]
            fn from(sq: Square) -> $t {
                sq.0 as $t
            }
        })+
    }
}

int_from_square_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

macro_rules! try_square_from_int_impl {
    ($($t:ty)+) => {
        $(impl core::convert::TryFrom<$t> for Square {
            type Error = num::TryFromIntError;

            #[inline]
            fn try_from(value: $t) -> Result<Square, Self::Error> {
                match u8::try_from(value) {
                    Ok(index) if index < 81 => Ok(Square(index)),
                    _ => Err(overflow_error()),
                }
            }
        })+
    }
}

try_square_from_int_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

/// A signed offset between two squares, in rows and columns.
///
/// Offsets in the movement tables are written from Sente's point of view,
/// where forward is toward row `0`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Delta {
    pub row: i32,
    pub col: i32,
}

impl Delta {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Delta {
        Delta { row, col }
    }

    /// Reorients an offset given from Sente's point of view for `side`.
    #[inline]
    #[must_use]
    pub const fn relative_to(self, side: Side) -> Delta {
        match side {
            Side::Sente => self,
            Side::Gote => Delta {
                row: -self.row,
                col: -self.col,
            },
        }
    }
}
