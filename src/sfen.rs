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

//! Parse and write positions in SFEN notation.
//!
//! # Examples
//!
//! [`Sfen`] is the SFEN of a [`Setup`]. Here we parse a position, validate
//! it and print it back:
//!
//! ```
//! use shogiban::{sfen::Sfen, Position};
//!
//! let sfen: Sfen = "lnsgkgsnl/1r5b1/ppppppppp/9/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL w - 2".parse()?;
//! let pos = sfen.into_position()?;
//!
//! assert_eq!(pos.sfen().to_string(),
//!            "lnsgkgsnl/1r5b1/ppppppppp/9/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL w - 2");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! The starting position:
//!
//! ```
//! use shogiban::{sfen::Sfen, Position};
//!
//! assert_eq!(Position::new().sfen().to_string(), Sfen::STARTPOS);
//! ```

use core::{
    error::Error,
    fmt::{self, Display, Write as _},
    num::NonZeroU32,
    str::FromStr,
};

use crate::{
    board::Board,
    hand::Hand,
    position::{Position, PositionError},
    setup::Setup,
    side::{BySide, Side},
    square::Square,
    types::Piece,
};

/// Errors that can occur when parsing an SFEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseSfenError {
    InvalidBoard,
    InvalidTurn,
    InvalidHand,
    InvalidPly,
    InvalidSfen,
}

impl Display for ParseSfenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseSfenError::InvalidBoard => "invalid board part in sfen",
            ParseSfenError::InvalidTurn => "invalid turn part in sfen",
            ParseSfenError::InvalidHand => "invalid hand part in sfen",
            ParseSfenError::InvalidPly => "invalid ply part in sfen",
            ParseSfenError::InvalidSfen => "invalid sfen",
        })
    }
}

impl Error for ParseSfenError {}

fn parse_piece(bytes: &[u8]) -> Option<(Piece, usize)> {
    match *bytes {
        [b'+', ch, ..] => {
            let piece = Piece::from_char(char::from(ch))?;
            Some((piece.promoted()?, 2))
        }
        [ch, ..] => Some((Piece::from_char(char::from(ch))?, 1)),
        [] => None,
    }
}

impl Board {
    /// Parses the board part of an SFEN, like
    /// `lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL`.
    ///
    /// # Errors
    ///
    /// Errors if the board is not exactly 9 rows of 9 columns, or a piece
    /// token is invalid.
    pub fn from_board_sfen(board_sfen: &[u8]) -> Result<Board, ParseSfenError> {
        let mut board = Board::empty();
        let mut rows = 0;

        for (row, row_sfen) in board_sfen.split(|&ch| ch == b'/').enumerate() {
            let row = u32::try_from(row).map_err(|_| ParseSfenError::InvalidBoard)?;
            if row >= 9 {
                return Err(ParseSfenError::InvalidBoard);
            }

            let mut col = 0;
            let mut i = 0;
            while i < row_sfen.len() {
                match row_sfen[i] {
                    ch @ b'1'..=b'9' => {
                        col += u32::from(ch - b'0');
                        i += 1;
                    }
                    _ => {
                        let (piece, len) =
                            parse_piece(&row_sfen[i..]).ok_or(ParseSfenError::InvalidBoard)?;
                        let sq = Square::from_coords(row, col).ok_or(ParseSfenError::InvalidBoard)?;
                        board.set_piece_at(sq, piece);
                        col += 1;
                        i += len;
                    }
                }
                if col > 9 {
                    return Err(ParseSfenError::InvalidBoard);
                }
            }

            if col != 9 {
                return Err(ParseSfenError::InvalidBoard);
            }
            rows += 1;
        }

        if rows == 9 {
            Ok(board)
        } else {
            Err(ParseSfenError::InvalidBoard)
        }
    }

    /// Displays the board part of an SFEN.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::Board;
    ///
    /// assert_eq!(Board::new().board_sfen().to_string(),
    ///            "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL");
    /// ```
    pub fn board_sfen(&self) -> BoardSfen<'_> {
        BoardSfen { board: self }
    }
}

/// Displays the board part of an SFEN. See [`Board::board_sfen()`].
#[derive(Debug)]
pub struct BoardSfen<'b> {
    board: &'b Board,
}

impl Display for BoardSfen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            let mut empty = 0;

            for col in 0..9 {
                let sq = Square::new(row * 9 + col);
                match self.board.piece_at(sq) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        Display::fmt(&piece, f)?;
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                write!(f, "{empty}")?;
            }

            if row < 8 {
                f.write_char('/')?;
            }
        }

        Ok(())
    }
}

fn parse_hands(hand_sfen: &[u8]) -> Result<BySide<Hand>, ParseSfenError> {
    let mut hands = BySide::<Hand>::default();
    if hand_sfen == b"-" {
        return Ok(hands);
    }
    if hand_sfen.is_empty() {
        return Err(ParseSfenError::InvalidHand);
    }

    let mut i = 0;
    while i < hand_sfen.len() {
        let digits = hand_sfen[i..]
            .iter()
            .take_while(|ch| ch.is_ascii_digit())
            .count();
        let count = if digits > 0 {
            btoi::btou::<u8>(&hand_sfen[i..i + digits])
                .ok()
                .filter(|&n| n > 0)
                .ok_or(ParseSfenError::InvalidHand)?
        } else {
            1
        };
        i += digits;

        let piece = hand_sfen
            .get(i)
            .and_then(|&ch| Piece::from_char(char::from(ch)))
            .filter(|piece| piece.role.is_droppable())
            .ok_or(ParseSfenError::InvalidHand)?;
        i += 1;

        if let Some(held) = hands.get_mut(piece.side).get_mut(piece.role) {
            *held = held.checked_add(count).ok_or(ParseSfenError::InvalidHand)?;
        }
    }

    Ok(hands)
}

/// Displays the hand part of an SFEN, like `2Pb` or `-`.
#[derive(Debug)]
pub struct HandsSfen<'h> {
    hands: &'h BySide<Hand>,
}

impl Display for HandsSfen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hands.all(Hand::is_empty) {
            return f.write_char('-');
        }

        for (side, hand) in self.hands.zip_side() {
            for (role, count) in hand.iter() {
                if count > 1 {
                    write!(f, "{count}")?;
                }
                if count > 0 {
                    f.write_char(role.of(side).char())?;
                }
            }
        }

        Ok(())
    }
}

/// A position in SFEN notation, like
/// `lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1`.
///
/// The turn, hand and ply parts may be omitted when parsing. They default to
/// Sente, empty hands and ply 1.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Sfen(pub Setup);

impl Sfen {
    /// The standard starting position.
    pub const STARTPOS: &'static str =
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

    pub const fn empty() -> Sfen {
        Sfen(Setup::empty())
    }

    pub fn from_setup(setup: Setup) -> Sfen {
        Sfen(setup)
    }

    pub fn from_position(pos: &Position) -> Sfen {
        Sfen(pos.to_setup())
    }

    /// Parses an SFEN.
    ///
    /// # Errors
    ///
    /// Errors if the input is not syntactically valid. The resulting
    /// [`Setup`] is not validated.
    pub fn from_ascii(sfen: &[u8]) -> Result<Sfen, ParseSfenError> {
        let mut parts = sfen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        let board_part = parts.next().ok_or(ParseSfenError::InvalidSfen)?;
        let board = Board::from_board_sfen(board_part)?;

        let turn = match parts.next() {
            Some(b"b") | None => Side::Sente,
            Some(b"w") => Side::Gote,
            Some(_) => return Err(ParseSfenError::InvalidTurn),
        };

        let hands = match parts.next() {
            Some(hand_part) => parse_hands(hand_part)?,
            None => BySide::default(),
        };

        let ply = match parts.next() {
            Some(ply_part) => btoi::btou(ply_part)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(ParseSfenError::InvalidPly)?,
            None => NonZeroU32::MIN,
        };

        if parts.next().is_some() {
            return Err(ParseSfenError::InvalidSfen);
        }

        Ok(Sfen(Setup {
            board,
            hands,
            turn,
            ply,
        }))
    }

    pub fn as_setup(&self) -> &Setup {
        &self.0
    }

    pub fn into_setup(self) -> Setup {
        self.0
    }

    /// Validates the setup and converts it into a [`Position`].
    ///
    /// # Errors
    ///
    /// See [`Position::from_setup()`].
    pub fn into_position(self) -> Result<Position, PositionError> {
        Position::from_setup(self.0)
    }

    /// Displays the hand part of the SFEN.
    pub fn hands(&self) -> HandsSfen<'_> {
        HandsSfen {
            hands: &self.0.hands,
        }
    }

    #[cfg(feature = "alloc")]
    pub fn to_ascii(&self) -> alloc::vec::Vec<u8> {
        use alloc::string::ToString as _;
        self.to_string().into_bytes()
    }
}

impl Position {
    /// Gets the SFEN of the position.
    pub fn sfen(&self) -> Sfen {
        Sfen::from_position(self)
    }
}

impl From<Setup> for Sfen {
    fn from(setup: Setup) -> Sfen {
        Sfen(setup)
    }
}

impl FromStr for Sfen {
    type Err = ParseSfenError;

    fn from_str(sfen: &str) -> Result<Sfen, ParseSfenError> {
        Sfen::from_ascii(sfen.as_bytes())
    }
}

impl Display for Sfen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.0.board.board_sfen(),
            self.0.turn.char(),
            self.hands(),
            self.0.ply
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Sfen {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Sfen {
    fn deserialize<D>(deserializer: D) -> Result<Sfen, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SfenVisitor;

        impl serde::de::Visitor<'_> for SfenVisitor {
            type Value = Sfen;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("sfen string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Sfen, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SfenVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString as _;

    use super::*;
    use crate::role::Role;

    #[test]
    fn test_startpos() {
        let sfen: Sfen = Sfen::STARTPOS.parse().unwrap();
        assert_eq!(sfen.0, Setup::default());
        assert_eq!(Sfen::from_setup(Setup::default()).to_string(), Sfen::STARTPOS);
    }

    #[test]
    fn test_promoted_pieces() {
        let sfen: Sfen = "8k/9/9/9/4+B4/9/9/+p8/K8 b - 1".parse().unwrap();
        let board = &sfen.0.board;
        assert_eq!(
            board.piece_at(Square::from_coords(4, 4).unwrap()),
            Some(Role::ProBishop.of(Side::Sente))
        );
        assert_eq!(
            board.piece_at(Square::from_coords(7, 0).unwrap()),
            Some(Role::ProPawn.of(Side::Gote))
        );
        assert_eq!(sfen.to_string(), "8k/9/9/9/4+B4/9/9/+p8/K8 b - 1");
    }

    #[test]
    fn test_hands() {
        let sfen: Sfen = "4k4/9/9/9/9/9/9/9/4K4 w RB2G10Pn2p 41".parse().unwrap();
        let hands = sfen.0.hands;
        assert_eq!(hands.sente.rook, 1);
        assert_eq!(hands.sente.gold, 2);
        assert_eq!(hands.sente.pawn, 10);
        assert_eq!(hands.gote.knight, 1);
        assert_eq!(hands.gote.pawn, 2);
        assert_eq!(sfen.0.turn, Side::Gote);
        assert_eq!(sfen.0.ply.get(), 41);
        assert_eq!(sfen.to_string(), "4k4/9/9/9/9/9/9/9/4K4 w RB2G10Pn2p 41");
    }

    #[test]
    fn test_defaults() {
        let sfen: Sfen = "4k4/9/9/9/9/9/9/9/4K4".parse().unwrap();
        assert_eq!(sfen.to_string(), "4k4/9/9/9/9/9/9/9/4K4 b - 1");
    }

    #[test]
    fn test_invalid() {
        for (sfen, err) in [
            ("", ParseSfenError::InvalidSfen),
            ("4k4/9/9/9/9/9/9/9", ParseSfenError::InvalidBoard),
            ("4k4/9/9/9/9/9/9/9/4K4/9", ParseSfenError::InvalidBoard),
            ("4k5/9/9/9/9/9/9/9/4K4", ParseSfenError::InvalidBoard),
            ("4k3/9/9/9/9/9/9/9/4K4", ParseSfenError::InvalidBoard),
            ("4q4/9/9/9/9/9/9/9/4K4", ParseSfenError::InvalidBoard),
            ("4+g4/9/9/9/9/9/9/9/4K4", ParseSfenError::InvalidBoard),
            ("4k4/9/9/9/9/9/9/9/4K4 x", ParseSfenError::InvalidTurn),
            ("4k4/9/9/9/9/9/9/9/4K4 b K", ParseSfenError::InvalidHand),
            ("4k4/9/9/9/9/9/9/9/4K4 b +P", ParseSfenError::InvalidHand),
            ("4k4/9/9/9/9/9/9/9/4K4 b 0P", ParseSfenError::InvalidHand),
            ("4k4/9/9/9/9/9/9/9/4K4 b 2", ParseSfenError::InvalidHand),
            ("4k4/9/9/9/9/9/9/9/4K4 b - 0", ParseSfenError::InvalidPly),
            ("4k4/9/9/9/9/9/9/9/4K4 b - 1 1", ParseSfenError::InvalidSfen),
        ] {
            assert_eq!(sfen.parse::<Sfen>(), Err(err), "{sfen}");
        }
    }
}
