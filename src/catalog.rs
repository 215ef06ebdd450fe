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

//! Movement geometry of each piece kind.
//!
//! Offsets are stored once, as seen by Sente (forward is toward row `0`),
//! and reoriented for Gote when they are read.

use crate::{role::Role, side::Side, square::Delta};

const UP: Delta = Delta::new(-1, 0);
const DOWN: Delta = Delta::new(1, 0);
const LEFT: Delta = Delta::new(0, -1);
const RIGHT: Delta = Delta::new(0, 1);
const UP_LEFT: Delta = Delta::new(-1, -1);
const UP_RIGHT: Delta = Delta::new(-1, 1);
const DOWN_LEFT: Delta = Delta::new(1, -1);
const DOWN_RIGHT: Delta = Delta::new(1, 1);
const KNIGHT_LEFT: Delta = Delta::new(-2, -1);
const KNIGHT_RIGHT: Delta = Delta::new(-2, 1);

const ORTHOGONAL: &[Delta] = &[UP, DOWN, LEFT, RIGHT];
const DIAGONAL: &[Delta] = &[UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT];
const KING: &[Delta] = &[
    UP, DOWN, LEFT, RIGHT, UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT,
];
const GOLD: &[Delta] = &[UP, DOWN, LEFT, RIGHT, UP_LEFT, UP_RIGHT];
const SILVER: &[Delta] = &[UP, UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT];
const KNIGHT: &[Delta] = &[KNIGHT_LEFT, KNIGHT_RIGHT];
const FORWARD: &[Delta] = &[UP];
const NONE: &[Delta] = &[];

/// How a piece of a given kind and side moves.
///
/// Steps reach exactly one square in their direction. Slides repeat their
/// direction until blocked.
#[derive(Copy, Clone, Debug)]
pub struct Movement {
    side: Side,
    steps: &'static [Delta],
    slides: &'static [Delta],
}

impl Movement {
    /// Single square offsets, oriented for the side.
    pub fn steps(&self) -> impl ExactSizeIterator<Item = Delta> + '_ {
        self.steps.iter().map(|delta| delta.relative_to(self.side))
    }

    /// Sliding directions, oriented for the side.
    pub fn slides(&self) -> impl ExactSizeIterator<Item = Delta> + '_ {
        self.slides.iter().map(|delta| delta.relative_to(self.side))
    }

    pub const fn side(&self) -> Side {
        self.side
    }
}

/// Looks up the movement of `role` for `side`.
///
/// # Examples
///
/// ```
/// use shogiban::{catalog::movement, Delta, Role, Side};
///
/// let pawn = movement(Role::Pawn, Side::Gote);
/// assert_eq!(pawn.steps().collect::<Vec<_>>(), [Delta::new(1, 0)]);
/// assert_eq!(pawn.slides().count(), 0);
/// ```
pub const fn movement(role: Role, side: Side) -> Movement {
    let (steps, slides) = match role {
        Role::King => (KING, NONE),
        Role::Rook => (NONE, ORTHOGONAL),
        Role::Bishop => (NONE, DIAGONAL),
        Role::Gold
        | Role::ProSilver
        | Role::ProKnight
        | Role::ProLance
        | Role::ProPawn => (GOLD, NONE),
        Role::Silver => (SILVER, NONE),
        Role::Knight => (KNIGHT, NONE),
        Role::Lance => (NONE, FORWARD),
        Role::Pawn => (FORWARD, NONE),
        Role::ProRook => (DIAGONAL, ORTHOGONAL),
        Role::ProBishop => (ORTHOGONAL, DIAGONAL),
    };
    Movement {
        side,
        steps,
        slides,
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_every_kind_moves() {
        for role in Role::ALL {
            let m = movement(role, Side::Sente);
            assert!(m.steps().len() + m.slides().len() > 0, "{role:?}");
        }
    }

    #[test]
    fn test_gote_is_negated() {
        for role in Role::ALL {
            let sente = movement(role, Side::Sente);
            let gote = movement(role, Side::Gote);
            let negated: Vec<Delta> = sente.steps().map(|d| Delta::new(-d.row, -d.col)).collect();
            assert_eq!(gote.steps().collect::<Vec<_>>(), negated);
            let negated: Vec<Delta> = sente.slides().map(|d| Delta::new(-d.row, -d.col)).collect();
            assert_eq!(gote.slides().collect::<Vec<_>>(), negated);
        }
    }

    #[test]
    fn test_promoted_minors_move_like_gold() {
        let gold: Vec<Delta> = movement(Role::Gold, Side::Sente).steps().collect();
        for role in [Role::ProSilver, Role::ProKnight, Role::ProLance, Role::ProPawn] {
            assert_eq!(movement(role, Side::Sente).steps().collect::<Vec<_>>(), gold);
        }
    }

    #[test]
    fn test_silver_has_no_sideways_step() {
        let silver: Vec<Delta> = movement(Role::Silver, Side::Sente).steps().collect();
        assert!(!silver.contains(&LEFT));
        assert!(!silver.contains(&RIGHT));
        assert!(!silver.contains(&DOWN));
    }
}
