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

use crate::role::Role;

/// Captured pieces of one side, available for drops.
///
/// Pieces are always held in their base form.
///
/// # Examples
///
/// ```
/// use shogiban::{Hand, Role};
///
/// let mut hand = Hand::new();
/// hand.add(Role::ProPawn);
/// hand.add(Role::King);
/// assert_eq!(hand.get(Role::Pawn), 1);
/// assert_eq!(hand.count(), 1);
///
/// assert!(hand.remove(Role::Pawn));
/// assert!(!hand.remove(Role::Pawn));
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct Hand {
    pub rook: u8,
    pub bishop: u8,
    pub gold: u8,
    pub silver: u8,
    pub knight: u8,
    pub lance: u8,
    pub pawn: u8,
}

impl Hand {
    pub const fn new() -> Hand {
        Hand {
            rook: 0,
            bishop: 0,
            gold: 0,
            silver: 0,
            knight: 0,
            lance: 0,
            pawn: 0,
        }
    }

    /// Every droppable piece of a complete set, both sides combined.
    pub const FULL: Hand = Hand {
        rook: 2,
        bishop: 2,
        gold: 4,
        silver: 4,
        knight: 4,
        lance: 4,
        pawn: 18,
    };

    /// Number of pieces of the base kind of `role`. Always `0` for kings.
    #[inline]
    pub const fn get(&self, role: Role) -> u8 {
        match role.unpromote() {
            Role::Rook => self.rook,
            Role::Bishop => self.bishop,
            Role::Gold => self.gold,
            Role::Silver => self.silver,
            Role::Knight => self.knight,
            Role::Lance => self.lance,
            Role::Pawn => self.pawn,
            _ => 0,
        }
    }

    /// Mutable count for the base kind of `role`, or `None` for kings.
    #[inline]
    pub fn get_mut(&mut self, role: Role) -> Option<&mut u8> {
        Some(match role.unpromote() {
            Role::Rook => &mut self.rook,
            Role::Bishop => &mut self.bishop,
            Role::Gold => &mut self.gold,
            Role::Silver => &mut self.silver,
            Role::Knight => &mut self.knight,
            Role::Lance => &mut self.lance,
            Role::Pawn => &mut self.pawn,
            _ => return None,
        })
    }

    /// Adds a captured piece in its base form. Adding a king does nothing.
    pub fn add(&mut self, role: Role) {
        if let Some(count) = self.get_mut(role) {
            *count = count.saturating_add(1);
        }
    }

    /// Takes one piece of `role` out of the hand. Returns `false` and leaves
    /// the hand unchanged if there is none, or if `role` cannot be held.
    pub fn remove(&mut self, role: Role) -> bool {
        if !role.is_droppable() {
            return false;
        }
        match self.get_mut(role) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Total number of pieces in hand.
    pub fn count(&self) -> usize {
        self.iter().map(|(_, count)| usize::from(count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Iterates over all droppable kinds and their counts, in SFEN order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Role, u8)> + '_ {
        Role::HAND.into_iter().map(|role| (role, self.get(role)))
    }

    /// Iterates over the kinds with at least one piece in hand.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.iter()
            .filter(|&(_, count)| count > 0)
            .map(|(role, _)| role)
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_add_base_form() {
        let mut hand = Hand::new();
        for role in Role::ALL {
            hand.add(role);
        }
        assert_eq!(hand.rook, 2);
        assert_eq!(hand.gold, 1);
        assert_eq!(hand.pawn, 2);
        assert_eq!(hand.count(), 13);
    }

    #[test]
    fn test_remove_requires_count() {
        let mut hand = Hand::new();
        assert!(!hand.remove(Role::Silver));
        hand.add(Role::ProSilver);
        assert!(!hand.remove(Role::ProSilver));
        assert!(!hand.remove(Role::King));
        assert!(hand.remove(Role::Silver));
        assert!(hand.is_empty());
    }

    #[test]
    fn test_roles() {
        let mut hand = Hand::new();
        hand.add(Role::Pawn);
        hand.add(Role::Bishop);
        hand.add(Role::Pawn);
        assert_eq!(hand.roles().collect::<Vec<_>>(), [Role::Bishop, Role::Pawn]);
    }

    #[test]
    fn test_full_set() {
        assert_eq!(Hand::FULL.count(), 38);
        assert_eq!(Hand::FULL.get(Role::ProPawn), 18);
        assert_eq!(Hand::FULL.get(Role::King), 0);
    }
}
