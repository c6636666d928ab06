//! Tombola game core.
//!
//! This module provides:
//! - Card and full board (tombolone) generation
//! - The room document with participants, pool and draw history
//! - The draw and win engine that walks ambo, terno, quaterna, cinquina
//!   and tombola
//! - Prize splitting for rooms that sell their cards

pub mod constants;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod generator;
pub mod prize;
pub mod room;

pub use engine::{CardProgress, DrawResult, GameEvent, WinResult};
pub use entities::{Card, Money, Number, Participant, Tier, Username};
pub use errors::{GameError, GameResult};
pub use generator::{generate_card, generate_cards, generate_full_board};
pub use prize::{Economy, PrizeSplit, split_prize};
pub use room::RoomState;
