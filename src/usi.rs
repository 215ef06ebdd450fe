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

//! Parse and write moves in Universal Shogi Interface representation.
//!
//! # Examples
//!
//! Parsing USI moves:
//!
//! ```
//! use shogiban::{usi::UsiMove, Square};
//!
//! let usi: UsiMove = "7g7f".parse()?;
//!
//! assert_eq!(usi, UsiMove::Normal {
//!     from: "7g".parse()?,
//!     to: "7f".parse()?,
//!     promotion: false,
//! });
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Converting to a legal move in the context of a position:
//!
//! ```
//! use shogiban::{usi::UsiMove, Position, Role, Side};
//!
//! let mut pos = Position::new();
//! let usi: UsiMove = "2g2f".parse()?;
//! let m = usi.to_move(&pos)?;
//!
//! pos.move_piece(m.from().unwrap(), m.to(), m.is_promotion())?;
//! assert_eq!(pos.piece_at("2f".parse()?), Some(Side::Sente.pawn()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Converting from [`Move`] to [`UsiMove`]:
//!
//! ```
//! use shogiban::{usi::UsiMove, Move, Role};
//!
//! let m = Move::Drop {
//!     role: Role::Pawn,
//!     to: "5e".parse()?,
//! };
//!
//! let usi = UsiMove::from(m);
//! assert_eq!(usi.to_string(), "P*5e");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{error::Error, fmt, str::FromStr};

use crate::{legal, m::Move, position::Position, role::Role, square::Square};

/// Error when parsing an invalid USI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUsiError;

impl fmt::Display for ParseUsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid usi")
    }
}

impl Error for ParseUsiError {}

/// Error when a USI move is not legal in the given position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUsiError;

impl fmt::Display for IllegalUsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal usi")
    }
}

impl Error for IllegalUsiError {}

/// A move as represented in the USI protocol.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum UsiMove {
    /// A board move like `7g7f` or `8h2b+`.
    Normal {
        from: Square,
        to: Square,
        promotion: bool,
    },
    /// A drop like `P*5e`.
    Drop { role: Role, to: Square },
}

impl UsiMove {
    /// Parses a USI move.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUsiError`] if the input is not syntactically valid.
    pub fn from_ascii(usi: &[u8]) -> Result<UsiMove, ParseUsiError> {
        match *usi {
            [piece, b'*', ref to @ ..] if to.len() == 2 => {
                let role = Role::from_char(char::from(piece))
                    .filter(|role| piece.is_ascii_uppercase() && role.is_droppable())
                    .ok_or(ParseUsiError)?;
                Ok(UsiMove::Drop {
                    role,
                    to: Square::from_ascii(to).map_err(|_| ParseUsiError)?,
                })
            }
            [f1, r1, f2, r2, ref rest @ ..] => {
                let promotion = match rest {
                    [] => false,
                    [b'+'] => true,
                    _ => return Err(ParseUsiError),
                };
                Ok(UsiMove::Normal {
                    from: Square::from_ascii(&[f1, r1]).map_err(|_| ParseUsiError)?,
                    to: Square::from_ascii(&[f2, r2]).map_err(|_| ParseUsiError)?,
                    promotion,
                })
            }
            _ => Err(ParseUsiError),
        }
    }

    /// Converts a move to USI notation.
    pub const fn from_move(m: Move) -> UsiMove {
        match m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => UsiMove::Normal {
                from,
                to,
                promotion,
            },
            Move::Drop { role, to } => UsiMove::Drop { role, to },
        }
    }

    /// Tries to convert the `UsiMove` to a legal [`Move`] in the context of
    /// a position.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUsiError`] if the move is not legal.
    pub fn to_move(&self, pos: &Position) -> Result<Move, IllegalUsiError> {
        let candidate = match *self {
            UsiMove::Normal {
                from,
                to,
                promotion,
            } => Move::Normal {
                role: pos.board().role_at(from).ok_or(IllegalUsiError)?,
                from,
                capture: pos.board().role_at(to),
                to,
                promotion,
            },
            UsiMove::Drop { role, to } => Move::Drop { role, to },
        };

        if legal::is_legal(pos, &candidate) {
            Ok(candidate)
        } else {
            Err(IllegalUsiError)
        }
    }

    #[cfg(feature = "alloc")]
    pub fn to_ascii(&self) -> alloc::vec::Vec<u8> {
        use alloc::string::ToString as _;
        self.to_string().into_bytes()
    }
}

impl FromStr for UsiMove {
    type Err = ParseUsiError;

    fn from_str(usi: &str) -> Result<UsiMove, ParseUsiError> {
        UsiMove::from_ascii(usi.as_bytes())
    }
}

impl fmt::Display for UsiMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            UsiMove::Normal {
                from,
                to,
                promotion: false,
            } => write!(f, "{from}{to}"),
            UsiMove::Normal {
                from,
                to,
                promotion: true,
            } => write!(f, "{from}{to}+"),
            UsiMove::Drop { role, to } => write!(f, "{}*{}", role.upper_char(), to),
        }
    }
}

impl From<Move> for UsiMove {
    fn from(m: Move) -> UsiMove {
        UsiMove::from_move(m)
    }
}

impl From<&Move> for UsiMove {
    fn from(m: &Move) -> UsiMove {
        UsiMove::from_move(*m)
    }
}

impl Move {
    /// Converts the move to USI notation.
    pub const fn to_usi(self) -> UsiMove {
        UsiMove::from_move(self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UsiMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UsiMove {
    fn deserialize<D>(deserializer: D) -> Result<UsiMove, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct UsiVisitor;

        impl serde::de::Visitor<'_> for UsiVisitor {
            type Value = UsiMove;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("usi move")
            }

            fn visit_str<E>(self, value: &str) -> Result<UsiMove, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(UsiVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString as _;

    use super::*;
    use crate::{legal::all_legal_moves, side::Side};

    #[test]
    fn test_parse() {
        for usi in ["7g7f", "8h2b+", "P*5e", "G*1a", "9a9i"] {
            assert_eq!(usi.parse::<UsiMove>().unwrap().to_string(), usi);
        }
        for usi in ["", "7g", "7g7", "7g7f=", "7g7f++", "0a1a", "p*5e", "K*5e", "+P*5e", "P*5", "P*5j"] {
            assert_eq!(usi.parse::<UsiMove>(), Err(ParseUsiError), "{usi}");
        }
    }

    #[test]
    fn test_to_move() {
        let pos = Position::new();
        assert_eq!(
            "7g7f".parse::<UsiMove>().unwrap().to_move(&pos),
            Ok(Move::Normal {
                role: Role::Pawn,
                from: "7g".parse().unwrap(),
                capture: None,
                to: "7f".parse().unwrap(),
                promotion: false,
            })
        );
        assert_eq!("7g7f+".parse::<UsiMove>().unwrap().to_move(&pos), Err(IllegalUsiError));
        assert_eq!("5e5d".parse::<UsiMove>().unwrap().to_move(&pos), Err(IllegalUsiError));
        assert_eq!("P*5e".parse::<UsiMove>().unwrap().to_move(&pos), Err(IllegalUsiError));
        assert_eq!("3c3d".parse::<UsiMove>().unwrap().to_move(&pos), Err(IllegalUsiError));
        assert_eq!(pos.turn(), Side::Sente);
    }

    #[test]
    fn test_legal_moves_round_trip() {
        let pos = Position::new();
        for m in all_legal_moves(&pos) {
            let usi = m.to_usi();
            assert_eq!(usi.to_string().parse::<UsiMove>(), Ok(usi));
            assert_eq!(usi.to_move(&pos), Ok(m));
        }
    }
}
