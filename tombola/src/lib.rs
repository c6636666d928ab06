//! # Tombola
//!
//! A Tombola (Italian bingo) engine: card generation, a room document that
//! tracks the 90-number pool, and a win engine that detects prize tiers as
//! numbers are drawn.
//!
//! ## Architecture
//!
//! The room advances through five prize tiers, one step per winning draw:
//!
//! - **Ambo**: two numbers in one row
//! - **Terno**: three numbers in one row
//! - **Quaterna**: four numbers in one row
//! - **Cinquina**: a full row
//! - **Tombola**: a full card, which ends the game
//!
//! ## Core Modules
//!
//! - [`game`]: Card generator, room document and draw/win engine
//! - [`store`]: Room document storage (in memory or JSON files)
//! - [`lobby`]: Room manager serializing writes per room
//!
//! ## Example
//!
//! ```
//! use tombola::{RoomState, generate_cards};
//!
//! let mut rng = rand::rng();
//! let mut room = RoomState::open("natale", None, &mut rng);
//! room.join("Nonna", generate_cards(&mut rng, 2)).unwrap();
//!
//! let result = room.draw_next().unwrap();
//! assert!(result.number.is_some());
//! ```

/// Card generation, room document and win engine.
pub mod game;
pub use game::{
    Card, CardProgress, DrawResult, Economy, GameError, GameEvent, GameResult, Money, Number,
    Participant, PrizeSplit, RoomState, Tier, Username, WinResult,
    constants::{self, MAX_CARDS_PER_PARTICIPANT, MAX_NUMBER},
    generate_card, generate_cards, generate_full_board, split_prize,
};

/// Room storage backends.
pub mod store;
pub use store::{FileRoomStore, MemoryRoomStore, RoomStore, StoreError, StoreResult};

/// Room management with per-room write serialization.
pub mod lobby;
pub use lobby::{RoomConfig, RoomManager, RoomSummary};
