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

use core::{array, error::Error, fmt, mem, ops, str::FromStr};

use crate::{role::Role, types::Piece};

/// `Sente` (first mover) or `Gote` (second mover).
///
/// Sente starts on rows 6 to 8 and moves toward row 0.
///
/// # Examples
///
/// ```
/// use shogiban::Side;
///
/// assert_eq!(!Side::Sente, Side::Gote);
/// assert_eq!(Side::Gote.far_row(), 8);
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Side {
    Sente = 0,
    Gote = 1,
}

impl Side {
    /// Gets the side from its SFEN turn character, `b` or `w`.
    pub const fn from_char(ch: char) -> Option<Side> {
        match ch {
            'b' => Some(Side::Sente),
            'w' => Some(Side::Gote),
            _ => None,
        }
    }

    #[inline]
    pub const fn from_sente(sente: bool) -> Side {
        if sente {
            Side::Sente
        } else {
            Side::Gote
        }
    }

    #[inline]
    pub fn fold<T>(self, sente: T, gote: T) -> T {
        match self {
            Side::Sente => sente,
            Side::Gote => gote,
        }
    }

    #[inline]
    pub const fn is_sente(self) -> bool {
        matches!(self, Side::Sente)
    }

    #[inline]
    pub const fn is_gote(self) -> bool {
        matches!(self, Side::Gote)
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> Side {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }

    /// Gets the SFEN turn character.
    pub const fn char(self) -> char {
        match self {
            Side::Sente => 'b',
            Side::Gote => 'w',
        }
    }

    /// The row this side's pieces are moving toward.
    #[inline]
    pub const fn far_row(self) -> u32 {
        match self {
            Side::Sente => 0,
            Side::Gote => 8,
        }
    }

    /// Converts an absolute row into a distance from this side's far row.
    ///
    /// The far row is `0`, the row behind it `1`, and so on. The promotion
    /// zone consists of the relative rows `0..3`.
    ///
    /// # Panics
    ///
    /// Panics if the row is not in the range `0..9`.
    #[track_caller]
    #[inline]
    pub const fn relative_row(self, row: u32) -> u32 {
        assert!(row < 9);
        match self {
            Side::Sente => row,
            Side::Gote => 8 - row,
        }
    }

    /// Tests if the absolute `row` is inside this side's promotion zone.
    #[inline]
    pub const fn in_promotion_zone(self, row: u32) -> bool {
        row < 9 && self.relative_row(row) < 3
    }

    #[inline]
    pub const fn king(self) -> Piece {
        Role::King.of(self)
    }

    #[inline]
    pub const fn pawn(self) -> Piece {
        Role::Pawn.of(self)
    }

    /// `Sente` and `Gote`, in this order.
    pub const ALL: [Side; 2] = [Side::Sente, Side::Gote];
}

impl ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.other()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold("sente", "gote"))
    }
}

/// Error when parsing an invalid side name.
#[derive(Clone, Debug)]
pub struct ParseSideError;

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid side")
    }
}

impl Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Side, ParseSideError> {
        Ok(match s {
            "sente" | "b" => Side::Sente,
            "gote" | "w" => Side::Gote,
            _ => return Err(ParseSideError),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Side {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.fold("sente", "gote"))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Side, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SideVisitor;

        impl serde::de::Visitor<'_> for SideVisitor {
            type Value = Side;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("sente or gote")
            }

            fn visit_str<E>(self, value: &str) -> Result<Side, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SideVisitor)
    }
}

/// Container with values for each [`Side`].
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct BySide<T> {
    pub sente: T,
    pub gote: T,
}

impl<T> BySide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> BySide<T>
    where
        F: FnMut(Side) -> T,
    {
        BySide {
            sente: init(Side::Sente),
            gote: init(Side::Gote),
        }
    }

    #[inline]
    pub const fn get(&self, side: Side) -> &T {
        match side {
            Side::Sente => &self.sente,
            Side::Gote => &self.gote,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Sente => &mut self.sente,
            Side::Gote => &mut self.gote,
        }
    }

    pub fn flip(&mut self) {
        mem::swap(&mut self.sente, &mut self.gote);
    }

    #[must_use]
    pub fn into_flipped(self) -> BySide<T> {
        BySide {
            sente: self.gote,
            gote: self.sente,
        }
    }

    #[inline]
    pub fn map<U, F>(self, mut f: F) -> BySide<U>
    where
        F: FnMut(T) -> U,
    {
        BySide {
            sente: f(self.sente),
            gote: f(self.gote),
        }
    }

    #[inline]
    pub fn any<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        predicate(&self.sente) || predicate(&self.gote)
    }

    #[inline]
    pub fn all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        predicate(&self.sente) && predicate(&self.gote)
    }

    #[inline]
    pub fn find<F>(&self, mut predicate: F) -> Option<Side>
    where
        F: FnMut(&T) -> bool,
    {
        if predicate(&self.sente) {
            Some(Side::Sente)
        } else if predicate(&self.gote) {
            Some(Side::Gote)
        } else {
            None
        }
    }

    #[inline]
    pub const fn as_ref(&self) -> BySide<&T> {
        BySide {
            sente: &self.sente,
            gote: &self.gote,
        }
    }

    #[inline]
    pub fn as_mut(&mut self) -> BySide<&mut T> {
        BySide {
            sente: &mut self.sente,
            gote: &mut self.gote,
        }
    }

    pub fn zip_side(self) -> BySide<(Side, T)> {
        BySide {
            sente: (Side::Sente, self.sente),
            gote: (Side::Gote, self.gote),
        }
    }

    pub fn iter(&self) -> array::IntoIter<&T, 2> {
        self.as_ref().into_iter()
    }
}

impl<T: PartialEq> BySide<T> {
    pub fn is_symmetric(&self) -> bool {
        self.sente == self.gote
    }
}

impl<T: Copy> BySide<&T> {
    pub fn copied(self) -> BySide<T> {
        self.map(|item| *item)
    }
}

impl<T> IntoIterator for BySide<T> {
    type Item = T;
    type IntoIter = array::IntoIter<T, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.sente, self.gote].into_iter()
    }
}
