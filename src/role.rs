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

use crate::{side::Side, types::Piece, util::overflow_error};

/// Piece kinds: eight base kinds and six promoted kinds.
///
/// # Examples
///
/// ```
/// use shogiban::Role;
///
/// assert_eq!(Role::Pawn.promote(), Some(Role::ProPawn));
/// assert_eq!(Role::ProRook.unpromote(), Role::Rook);
/// assert_eq!(Role::Gold.promote(), None);
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    King = 0,
    Rook = 1,
    Bishop = 2,
    Gold = 3,
    Silver = 4,
    Knight = 5,
    Lance = 6,
    Pawn = 7,
    /// Promoted rook, also known as dragon.
    ProRook = 8,
    /// Promoted bishop, also known as horse.
    ProBishop = 9,
    ProSilver = 10,
    ProKnight = 11,
    ProLance = 12,
    /// Promoted pawn, also known as tokin.
    ProPawn = 13,
}

impl Role {
    /// Gets the unpromoted piece kind from its SFEN letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::Role;
    ///
    /// assert_eq!(Role::from_char('K'), Some(Role::King));
    /// assert_eq!(Role::from_char('l'), Some(Role::Lance));
    ///
    /// assert_eq!(Role::from_char('Q'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Role> {
        match ch {
            'K' | 'k' => Some(Role::King),
            'R' | 'r' => Some(Role::Rook),
            'B' | 'b' => Some(Role::Bishop),
            'G' | 'g' => Some(Role::Gold),
            'S' | 's' => Some(Role::Silver),
            'N' | 'n' => Some(Role::Knight),
            'L' | 'l' => Some(Role::Lance),
            'P' | 'p' => Some(Role::Pawn),
            _ => None,
        }
    }

    /// Gets a [`Piece`] of the given side.
    #[inline]
    pub const fn of(self, side: Side) -> Piece {
        Piece { side, role: self }
    }

    /// Gets the lowercase SFEN letter of the unpromoted kind.
    pub const fn char(self) -> char {
        match self.unpromote() {
            Role::King => 'k',
            Role::Rook => 'r',
            Role::Bishop => 'b',
            Role::Gold => 'g',
            Role::Silver => 's',
            Role::Knight => 'n',
            Role::Lance => 'l',
            _ => 'p',
        }
    }

    /// Gets the uppercase SFEN letter of the unpromoted kind.
    pub const fn upper_char(self) -> char {
        self.char().to_ascii_uppercase()
    }

    /// Gets the promoted kind, or `None` for kings, golds and kinds that are
    /// already promoted.
    pub const fn promote(self) -> Option<Role> {
        Some(match self {
            Role::Rook => Role::ProRook,
            Role::Bishop => Role::ProBishop,
            Role::Silver => Role::ProSilver,
            Role::Knight => Role::ProKnight,
            Role::Lance => Role::ProLance,
            Role::Pawn => Role::ProPawn,
            _ => return None,
        })
    }

    /// Gets the base kind. Base kinds map to themselves.
    pub const fn unpromote(self) -> Role {
        match self {
            Role::ProRook => Role::Rook,
            Role::ProBishop => Role::Bishop,
            Role::ProSilver => Role::Silver,
            Role::ProKnight => Role::Knight,
            Role::ProLance => Role::Lance,
            Role::ProPawn => Role::Pawn,
            base => base,
        }
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        self as u8 >= Role::ProRook as u8
    }

    #[inline]
    pub const fn can_promote(self) -> bool {
        self.promote().is_some()
    }

    /// Tests if pieces of this kind can be held in hand and dropped.
    #[inline]
    pub const fn is_droppable(self) -> bool {
        !matches!(self, Role::King) && !self.is_promoted()
    }

    /// All 14 kinds: base kinds first, then promoted kinds.
    pub const ALL: [Role; 14] = [
        Role::King,
        Role::Rook,
        Role::Bishop,
        Role::Gold,
        Role::Silver,
        Role::Knight,
        Role::Lance,
        Role::Pawn,
        Role::ProRook,
        Role::ProBishop,
        Role::ProSilver,
        Role::ProKnight,
        Role::ProLance,
        Role::ProPawn,
    ];

    /// The droppable kinds, in the order they appear in SFEN hands.
    pub const HAND: [Role; 7] = [
        Role::Rook,
        Role::Bishop,
        Role::Gold,
        Role::Silver,
        Role::Knight,
        Role::Lance,
        Role::Pawn,
    ];
}

/// Writes the SFEN token of the kind, like `P` or `+R`.
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_promoted() {
            f.write_str("+")?;
        }
        fmt::Write::write_char(f, self.upper_char())
    }
}

/// Error when parsing an invalid piece kind.
#[derive(Clone, Debug)]
pub struct ParseRoleError;

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece kind")
    }
}

impl Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Role, ParseRoleError> {
        let (promoted, letter) = match s.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let mut chars = letter.chars();
        let role = match (chars.next(), chars.next()) {
            (Some(ch), None) => Role::from_char(ch).ok_or(ParseRoleError)?,
            _ => return Err(ParseRoleError),
        };
        if promoted {
            role.promote().ok_or(ParseRoleError)
        } else {
            Ok(role)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Role, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RoleVisitor;

        impl serde::de::Visitor<'_> for RoleVisitor {
            type Value = Role;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("sfen piece kind")
            }

            fn visit_str<E>(self, value: &str) -> Result<Role, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(RoleVisitor)
    }
}

macro_rules! int_from_role_impl {
    ($($t:ty)+) => {
        $(impl From<Role> for $t {
            #[inline]
            fn from(role: Role) -> $t {
                role as $t
            }
        })+
    }
}

int_from_role_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

macro_rules! try_role_from_int_impl {
    ($($t:ty)+) => {
        $(impl core::convert::TryFrom<$t> for Role {
            type Error = num::TryFromIntError;

            #[inline]
            fn try_from(value: $t) -> Result<Role, Self::Error> {
                usize::try_from(value)
                    .ok()
                    .and_then(|index| Role::ALL.get(index).copied())
                    .ok_or_else(overflow_error)
            }
        })+
    }
}

try_role_from_int_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

#[cfg(test)]
mod tests {
    use std::{string::ToString as _, vec::Vec};

    use super::*;

    #[test]
    fn test_promotion_table() {
        for role in Role::ALL {
            match role.promote() {
                Some(promoted) => {
                    assert!(promoted.is_promoted());
                    assert_eq!(promoted.unpromote(), role);
                    assert!(role.is_droppable());
                }
                None => assert!(
                    matches!(role, Role::King | Role::Gold) || role.is_promoted(),
                    "{role:?}"
                ),
            }
            assert_eq!(role.unpromote().unpromote(), role.unpromote());
        }
    }

    #[test]
    fn test_droppable() {
        let droppable: Vec<Role> = Role::ALL.into_iter().filter(|r| r.is_droppable()).collect();
        assert_eq!(droppable, Role::HAND);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("+R".parse::<Role>().ok(), Some(Role::ProRook));
        assert_eq!("p".parse::<Role>().ok(), Some(Role::Pawn));
        assert!("+G".parse::<Role>().is_err());
        assert!("+K".parse::<Role>().is_err());
        assert!("PP".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().ok(), Some(role));
        }
    }

    #[test]
    fn test_try_from_int() {
        assert_eq!(Role::try_from(8u8).ok(), Some(Role::ProRook));
        assert!(Role::try_from(14u32).is_err());
        assert!(Role::try_from(-1i32).is_err());
    }
}
