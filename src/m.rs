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
    fmt,
    fmt::{Display, Write as _},
};

use arrayvec::ArrayVec;

use crate::{role::Role, square::Square};

/// Information about a move or drop.
///
/// # Display
///
/// `Move` implements [`Display`] using a long notation like `P7g-7f`,
/// `B8hx2b+` or `P*5e`. For text-based protocols use [USI](crate::usi).
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A board move, e.g., `S3i-4h`.
    Normal {
        /// Kind of the moving piece before the move.
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
        promotion: bool,
    },
    /// A drop from hand, e.g., `P*5e`.
    Drop { role: Role, to: Square },
}

impl Move {
    /// Gets the kind of the moved or dropped piece, before promotion.
    pub const fn role(self) -> Role {
        match self {
            Move::Normal { role, .. } | Move::Drop { role, .. } => role,
        }
    }

    /// Gets the kind of the piece standing on the target square after the
    /// move.
    pub const fn role_after(self) -> Role {
        match self {
            Move::Normal {
                role,
                promotion: true,
                ..
            } => match role.promote() {
                Some(promoted) => promoted,
                None => role,
            },
            Move::Normal { role, .. } | Move::Drop { role, .. } => role,
        }
    }

    /// Gets the origin square or `None` for drops.
    pub const fn from(self) -> Option<Square> {
        match self {
            Move::Normal { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    /// Gets the target square.
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    /// Gets the kind of the captured piece or `None`.
    pub const fn capture(self) -> Option<Role> {
        match self {
            Move::Normal { capture, .. } => capture,
            Move::Drop { .. } => None,
        }
    }

    /// Checks if the move is a capture.
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            Move::Normal {
                capture: Some(_),
                ..
            }
        )
    }

    /// Checks if the move is a drop from hand.
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// Checks if the move promotes the moving piece.
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            Move::Normal {
                promotion: true,
                ..
            }
        )
    }

    /// The same move seen from the other side of the board.
    #[must_use]
    pub const fn to_rotated(self) -> Move {
        match self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => Move::Normal {
                role,
                from: from.rotate(),
                capture,
                to: to.rotate(),
                promotion,
            },
            Move::Drop { role, to } => Move::Drop {
                role,
                to: to.rotate(),
            },
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                write!(
                    f,
                    "{}{}{}{}",
                    role,
                    from,
                    if capture.is_some() { 'x' } else { '-' },
                    to
                )?;

                if promotion {
                    f.write_char('+')?;
                }

                Ok(())
            }
            Move::Drop { role, to } => write!(f, "{role}*{to}"),
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// There is enough space to hold the legal moves of any reachable shogi
/// position (at most 593).
///
/// # Example
///
/// ```
/// use shogiban::{legal::all_legal_moves, Position, Role};
///
/// let pos = Position::new();
/// let mut moves = all_legal_moves(&pos);
/// moves.retain(|m| m.role() == Role::Pawn);
/// assert_eq!(moves.len(), 9);
/// ```
pub type MoveList = ArrayVec<Move, 600>;

#[cfg(test)]
mod tests {
    use core::mem;
    use std::string::ToString as _;

    use super::*;

    #[test]
    fn test_move_size() {
        assert!(mem::size_of::<Move>() <= 8);
    }

    #[test]
    fn test_display() {
        let sq = |s: &str| s.parse::<Square>().unwrap();
        let normal = Move::Normal {
            role: Role::Bishop,
            from: sq("8h"),
            capture: Some(Role::Bishop),
            to: sq("2b"),
            promotion: true,
        };
        assert_eq!(normal.to_string(), "B8hx2b+");
        assert_eq!(normal.role_after(), Role::ProBishop);
        let drop = Move::Drop {
            role: Role::Pawn,
            to: sq("5e"),
        };
        assert_eq!(drop.to_string(), "P*5e");
        assert_eq!(drop.to_rotated().to(), sq("5e"));
        assert_eq!(normal.to_rotated().from(), Some(sq("2b")));
    }
}
