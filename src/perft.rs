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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use shogiban::{perft, Position};
//!
//! let pos = Position::new();
//! assert_eq!(perft(&pos, 1), 30);
//! assert_eq!(perft(&pos, 2), 900);
//! ```

use crate::{legal::all_legal_moves, position::Position};

/// Counts legal move paths of a given length.
///
/// Paths ending in checkmate are only counted if the mate occurs in the
/// final position. Moves that may optionally promote count twice. Useful
/// for comparing, testing and debugging move generation correctness and
/// performance.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = all_legal_moves(pos);

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| {
                    let mut child = pos.clone();
                    let played = child.play_unchecked(m);
                    debug_assert!(played.is_ok(), "legal move {m} not playable: {played:?}");
                    played.map_or(0, |()| perft(&child, depth - 1))
                })
                .sum()
        }
    }
}
