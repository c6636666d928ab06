//! Room lobby: opening rooms, seating participants and drawing numbers.
//!
//! Every change to a room is a full read-modify-write of its stored
//! document. [`RoomManager`] holds one async mutex per room name across the
//! whole load, change and save, so two draws on the same room can never
//! overwrite each other. Different rooms proceed independently.
//!
//! ## Example
//!
//! ```
//! use tombola::lobby::{RoomConfig, RoomManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = RoomManager::in_memory();
//!     manager.open_room(RoomConfig::named("natale")).await?;
//!     manager.join("natale", "Nonna", 2).await?;
//!
//!     let result = manager.draw("natale", None).await?;
//!     assert!(result.number.is_some());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod manager;

pub use config::RoomConfig;
pub use manager::{RoomManager, RoomRecord, RoomSummary};
