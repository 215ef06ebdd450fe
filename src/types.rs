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

use core::fmt::{self, Write as _};

use crate::{role::Role, side::Side};

/// A piece with [`Side`] and [`Role`].
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub side: Side,
    pub role: Role,
}

impl Piece {
    /// Gets the SFEN letter, uppercase for Sente and lowercase for Gote.
    /// Promotion is not indicated.
    pub const fn char(self) -> char {
        match self.side {
            Side::Sente => self.role.upper_char(),
            Side::Gote => self.role.char(),
        }
    }

    /// Gets an unpromoted piece from its SFEN letter.
    pub const fn from_char(ch: char) -> Option<Piece> {
        match Role::from_char(ch) {
            Some(role) => Some(role.of(Side::from_sente(ch.is_ascii_uppercase()))),
            None => None,
        }
    }

    /// The same piece in its promoted form, if it has one.
    #[must_use]
    pub const fn promoted(self) -> Option<Piece> {
        match self.role.promote() {
            Some(role) => Some(role.of(self.side)),
            None => None,
        }
    }
}

/// Writes the SFEN token of the piece, like `P`, `+r` or `k`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.role.is_promoted() {
            f.write_char('+')?;
        }
        f.write_char(self.char())
    }
}

/// Whether a move may or must promote.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PromotionStatus {
    /// The move cannot promote.
    None,
    /// The player chooses whether to promote.
    Optional,
    /// The piece would have no further moves, so it must promote.
    Mandatory,
}

impl PromotionStatus {
    pub const fn can_promote(self) -> bool {
        !matches!(self, PromotionStatus::None)
    }

    pub const fn can_decline(self) -> bool {
        !matches!(self, PromotionStatus::Mandatory)
    }
}

/// Decides whether a move of `piece` from `from_row` to `to_row` may or must
/// promote.
///
/// A move may promote when the kind can promote and either endpoint lies in
/// the three rows nearest the opponent. Pawns and lances must promote on the
/// far row, knights on the far two rows.
///
/// # Examples
///
/// ```
/// use shogiban::{promotion_status, PromotionStatus, Role, Side};
///
/// let pawn = Role::Pawn.of(Side::Sente);
/// assert_eq!(promotion_status(pawn, 4, 3), PromotionStatus::None);
/// assert_eq!(promotion_status(pawn, 3, 2), PromotionStatus::Optional);
/// assert_eq!(promotion_status(pawn, 1, 0), PromotionStatus::Mandatory);
/// ```
pub const fn promotion_status(piece: Piece, from_row: u32, to_row: u32) -> PromotionStatus {
    if !piece.role.can_promote() {
        return PromotionStatus::None;
    }

    let side = piece.side;
    let to_in_zone = side.in_promotion_zone(to_row);
    if !side.in_promotion_zone(from_row) && !to_in_zone {
        return PromotionStatus::None;
    }

    let forced_rows = match piece.role {
        Role::Pawn | Role::Lance => 1,
        Role::Knight => 2,
        _ => 0,
    };
    if to_in_zone && side.relative_row(to_row) < forced_rows {
        PromotionStatus::Mandatory
    } else {
        PromotionStatus::Optional
    }
}
