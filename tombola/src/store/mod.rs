//! Room document storage.
//!
//! A store keeps one opaque JSON document per room name. It does not look
//! inside the document and does not serialize writers; [`crate::RoomManager`]
//! does that.
//!
//! ## Example
//!
//! ```
//! use tombola::store::{MemoryRoomStore, RoomStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryRoomStore::new();
//!     store.save("natale", "{}").await?;
//!     assert_eq!(store.load("natale").await?.as_deref(), Some("{}"));
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod file;
pub mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::FileRoomStore;
pub use memory::MemoryRoomStore;

use async_trait::async_trait;

/// Key-value store of room documents keyed by room name.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Load the document stored under `name`
    async fn load(&self, name: &str) -> StoreResult<Option<String>>;

    /// Create or replace the document stored under `name`
    async fn save(&self, name: &str, doc: &str) -> StoreResult<()>;

    /// Remove a document. Returns whether it existed.
    async fn delete(&self, name: &str) -> StoreResult<bool>;

    /// Names of every stored room, sorted
    async fn list(&self) -> StoreResult<Vec<String>>;
}
