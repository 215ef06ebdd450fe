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

//! A library for shogi vocabulary, move generation and rule enforcement.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use shogiban::{legal, Position};
//!
//! let pos = Position::new();
//! let legals = legal::all_legal_moves(&pos);
//! assert_eq!(legals.len(), 30);
//! ```
//!
//! Play moves through the [`Game`] facade:
//!
//! ```
//! use shogiban::{Game, Move, Role, Side, Square};
//!
//! let mut game = Game::new();
//!
//! // 1. P-7f
//! game.play(&Move::Normal {
//!     role: Role::Pawn,
//!     from: Square::from_ascii(b"7g")?,
//!     capture: None,
//!     to: Square::from_ascii(b"7f")?,
//!     promotion: false,
//! })?;
//!
//! assert_eq!(game.current_side(), Side::Gote);
//! assert!(!game.is_game_over());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Ask how pieces move and where they attack:
//!
//! ```
//! use shogiban::{catalog::movement, movegen::pseudo_moves, Position, Role, Side, Square};
//!
//! // A knight jumps two squares forward and one to the side.
//! assert_eq!(movement(Role::Knight, Side::Sente).steps().len(), 2);
//!
//! // The rook on 2h can slide along the second rank.
//! let pos = Position::new();
//! let rook = pseudo_moves(&pos, Square::from_ascii(b"2h")?);
//! assert_eq!(rook.count(), 6);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Detect check and checkmate:
//!
//! ```
//! use shogiban::{check, sfen::Sfen, Side};
//!
//! let pos = "4k4/4G4/4P4/9/9/9/9/9/4K4 w - 1"
//!     .parse::<Sfen>()?
//!     .into_position()?;
//!
//! assert!(check::in_check(&pos, Side::Gote));
//! assert!(check::is_checkmate(&pos));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Also supports [SFEN](sfen) and [USI](usi) formats for positions and
//! moves.
//!
//! # Feature flags
//!
//! * `alloc`: Enables APIs which require the
//!   [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html) crate
//!   (e.g. SFEN and USI rendering to byte vectors).
//! * `std`: Implies `alloc`. Enabled by default.
//!   For `no_std` environments, this must be disabled with `default-features = false`.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for fuzzing.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![no_std]
#![doc(html_root_url = "https://docs.rs/shogiban/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod hand;
mod m;
mod perft;
mod position;
mod role;
mod setup;
mod side;
mod square;
mod types;
mod util;

pub mod bitboard;
pub mod board;
pub mod catalog;
pub mod check;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod sfen;
pub mod usi;

pub use bitboard::Bitboard;
pub use board::Board;
pub use game::Game;
pub use hand::Hand;
pub use m::{Move, MoveList};
pub use perft::perft;
pub use position::{PlayError, Position, PositionError, PositionErrorKinds};
pub use role::{ParseRoleError, Role};
pub use setup::Setup;
pub use side::{BySide, ParseSideError, Side};
pub use square::{Delta, ParseSquareError, Square};
pub use types::{promotion_status, Piece, PromotionStatus};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Side {}
