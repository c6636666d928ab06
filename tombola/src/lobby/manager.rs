//! Room manager serializing reads and writes per room.

use super::config::RoomConfig;
use crate::{
    game::{
        Card, DrawResult, GameError, Money, RoomState, Tier, Username,
        constants::BANK_NAME,
        generator::{generate_cards, generate_full_board},
    },
    store::{MemoryRoomStore, RoomStore, StoreError, StoreResult},
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

/// Stored document of one room: its configuration and its game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub config: RoomConfig,
    pub state: RoomState,
}

impl RoomRecord {
    /// Parse a stored document and check its shape.
    pub fn from_json(name: &str, doc: &str) -> StoreResult<Self> {
        let corrupt = |reason: String| StoreError::Corrupt {
            name: name.to_string(),
            reason,
        };

        let record: Self = serde_json::from_str(doc).map_err(|e| corrupt(e.to_string()))?;
        record.state.validate().map_err(|e| corrupt(e.to_string()))?;
        record.config.validate().map_err(corrupt)?;
        if record.config.name != record.state.name {
            return Err(corrupt(format!(
                "config names {} but state names {}",
                record.config.name, record.state.name
            )));
        }
        Ok(record)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Lobby listing entry for this room.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            name: self.state.name.clone(),
            participants: self.state.participants.len(),
            max_participants: self.config.max_participants,
            drawn: self.state.drawn.len(),
            remaining: self.state.remaining(),
            current_tier: self.state.current_tier,
            finished: self.state.finished,
            pot: self.state.pot(),
            is_private: self.config.admin_password.is_some(),
        }
    }
}

/// Room metadata for discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub name: String,
    pub participants: usize,
    pub max_participants: usize,
    pub drawn: usize,
    pub remaining: usize,
    pub current_tier: Tier,
    pub finished: bool,
    pub pot: Option<Money>,
    pub is_private: bool,
}

/// Room manager for opening rooms and running their draws
pub struct RoomManager {
    /// Room document store
    store: Arc<dyn RoomStore>,

    /// One write lock per room name
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RoomManager {
    /// Create a new room manager
    ///
    /// # Arguments
    ///
    /// * `store` - Where room documents are kept
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Room manager backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRoomStore::new()))
    }

    async fn room_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forget the lock of a room that is not stored, unless another caller
    /// still holds or waits on it.
    ///
    /// Clones are only handed out under the map lock, so with the map locked
    /// a count of two (the map and `lock`) means nobody else can reach it.
    async fn release_lock(&self, name: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        let idle = locks
            .get(name)
            .is_some_and(|entry| Arc::ptr_eq(entry, &lock) && Arc::strong_count(entry) == 2);
        if idle {
            locks.remove(name);
        }
    }

    async fn load_record(&self, name: &str) -> StoreResult<RoomRecord> {
        let doc = self
            .store
            .load(name)
            .await?
            .ok_or_else(|| StoreError::RoomNotFound(name.to_string()))?;
        RoomRecord::from_json(name, &doc)
    }

    async fn save_record(&self, record: &RoomRecord) -> StoreResult<()> {
        let doc = record.to_json()?;
        self.store.save(&record.state.name, &doc).await
    }

    /// Load, change and save one room while holding its lock.
    ///
    /// Nothing is saved if `change` fails.
    async fn with_room<T, F>(&self, name: &str, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut RoomRecord) -> StoreResult<T>,
    {
        let lock = self.room_lock(name).await;
        let result = {
            let _guard = lock.lock().await;
            self.change_record(name, change).await
        };

        if matches!(result, Err(StoreError::RoomNotFound(_))) {
            self.release_lock(name, lock).await;
        }
        result
    }

    async fn change_record<T, F>(&self, name: &str, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut RoomRecord) -> StoreResult<T>,
    {
        let mut record = self.load_record(name).await?;
        let value = change(&mut record)?;
        for event in record.state.drain_events() {
            debug!("Room {name}: {event}");
        }
        self.save_record(&record).await?;
        Ok(value)
    }

    /// Open a new room
    ///
    /// When the config asks for a bank, the bank joins first holding a full
    /// board.
    ///
    /// # Returns
    ///
    /// * `StoreResult<RoomSummary>` - Summary of the new room, or
    ///   `RoomAlreadyExists` if the name is taken
    pub async fn open_room(&self, config: RoomConfig) -> StoreResult<RoomSummary> {
        config.validate().map_err(StoreError::InvalidConfig)?;

        let name = config.name.clone();
        let lock = self.room_lock(&name).await;
        let result = {
            let _guard = lock.lock().await;
            self.create_record(config).await
        };

        if matches!(&result, Err(e) if !matches!(e, StoreError::RoomAlreadyExists(_))) {
            self.release_lock(&name, lock).await;
        }
        result
    }

    async fn create_record(&self, config: RoomConfig) -> StoreResult<RoomSummary> {
        if self.store.load(&config.name).await?.is_some() {
            warn!("Room {} already exists", config.name);
            return Err(StoreError::RoomAlreadyExists(config.name));
        }

        let state = {
            let mut rng = rand::rng();
            let mut state = RoomState::open(&config.name, config.economy(), &mut rng);
            if config.with_bank {
                let board = generate_full_board(&mut rng);
                state.join(BANK_NAME, board.to_vec())?;
            }
            state.drain_events();
            state
        };

        let record = RoomRecord { config, state };
        self.save_record(&record).await?;
        info!(
            "Room {} is open ({} participant(s), bank: {})",
            record.config.name,
            record.state.participants.len(),
            record.config.with_bank
        );
        Ok(record.summary())
    }

    /// Seat a participant with `card_count` freshly generated cards
    ///
    /// # Arguments
    ///
    /// * `room` - Room name
    /// * `name` - Participant name
    /// * `card_count` - Cards to deal, up to the room's per-participant limit
    ///
    /// # Returns
    ///
    /// * `StoreResult<Vec<Card>>` - The cards dealt
    pub async fn join(&self, room: &str, name: &str, card_count: usize) -> StoreResult<Vec<Card>> {
        self.with_room(room, |record| {
            let max = record.config.max_cards_per_participant;
            if card_count == 0 || card_count > max {
                return Err(GameError::InvalidCardCount {
                    requested: card_count,
                    max,
                }
                .into());
            }

            let already_seated = record.state.participant(&Username::new(name)).is_some();
            if !already_seated && record.state.participants.len() >= record.config.max_participants
            {
                warn!("{name} tried to join full room {room}");
                return Err(GameError::RoomFull.into());
            }

            let cards = generate_cards(&mut rand::rng(), card_count);
            let participant = record.state.join(name, cards)?;
            Ok(participant.cards.clone())
        })
        .await
    }

    /// Draw the next number
    ///
    /// Draws on a finished or exhausted room succeed and report the skip in
    /// [`DrawResult::skipped`].
    ///
    /// # Arguments
    ///
    /// * `room` - Room name
    /// * `password` - Admin password, required when the room has one
    pub async fn draw(&self, room: &str, password: Option<&str>) -> StoreResult<DrawResult> {
        self.with_room(room, |record| {
            if !record.config.check_password(password) {
                warn!("Rejected draw in room {room}: wrong admin password");
                return Err(GameError::Unauthorized.into());
            }
            Ok(record.state.draw_next()?)
        })
        .await
    }

    /// Current state of a room
    pub async fn snapshot(&self, room: &str) -> StoreResult<RoomState> {
        Ok(self.load_record(room).await?.state)
    }

    /// Configuration a room was opened with
    pub async fn config(&self, room: &str) -> StoreResult<RoomConfig> {
        Ok(self.load_record(room).await?.config)
    }

    /// Delete a room
    ///
    /// # Returns
    ///
    /// * `StoreResult<bool>` - Whether the room existed
    pub async fn close_room(&self, room: &str, password: Option<&str>) -> StoreResult<bool> {
        let lock = self.room_lock(room).await;
        let closed = {
            let _guard = lock.lock().await;
            match self.load_record(room).await {
                Ok(record) => {
                    if !record.config.check_password(password) {
                        warn!("Rejected close of room {room}: wrong admin password");
                        return Err(GameError::Unauthorized.into());
                    }
                    self.store.delete(room).await?
                }
                Err(StoreError::RoomNotFound(_)) => false,
                Err(e) => return Err(e),
            }
        };

        if closed {
            info!("Room {room} closed");
        }
        self.release_lock(room, lock).await;
        Ok(closed)
    }

    /// Summaries of every stored room, sorted by name
    pub async fn list_rooms(&self) -> StoreResult<Vec<RoomSummary>> {
        let mut summaries = Vec::new();
        for name in self.store.list().await? {
            match self.load_record(&name).await {
                Ok(record) => summaries.push(record.summary()),
                // Closed between listing and loading
                Err(StoreError::RoomNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(summaries)
    }
}
