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

use core::num::NonZeroU32;

use crate::{
    board::Board,
    hand::Hand,
    side::{BySide, Side},
};

/// A not necessarily legal position.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    /// Piece positions on the board.
    pub board: Board,

    /// Pieces in hand.
    pub hands: BySide<Hand>,

    /// Side to move.
    pub turn: Side,

    /// Current ply number.
    ///
    /// Starts at 1 and is increased after every move or drop.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::Setup;
    ///
    /// let setup = Setup::default();
    /// assert_eq!(setup.ply.get(), 1);
    /// ```
    pub ply: NonZeroU32,
}

impl Setup {
    pub const fn empty() -> Setup {
        Setup {
            board: Board::empty(),
            hands: BySide {
                sente: Hand::new(),
                gote: Hand::new(),
            },
            turn: Side::Sente,
            ply: NonZeroU32::MIN,
        }
    }

    pub fn swap_turn(&mut self) {
        self.turn = !self.turn;
    }

    /// Rotates the board, swaps sides of all pieces and hands, and passes the
    /// turn to the other side. The resulting setup is the same game seen
    /// from the other player.
    #[must_use]
    pub fn into_swapped(self) -> Setup {
        Setup {
            board: self.board.into_swapped(),
            hands: self.hands.into_flipped(),
            turn: !self.turn,
            ply: self.ply,
        }
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup {
            board: Board::default(),
            ..Setup::empty()
        }
    }
}
