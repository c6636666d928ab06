//! The room document: pool, draw history, participants and progress.
//!
//! A room is always read in full, changed in memory, and written back in
//! full. Writes to one room must be serialized by whoever stores it.

use chrono::{DateTime, Utc};
use log::{info, warn};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};

use super::{
    constants::{MAX_CARDS_PER_PARTICIPANT, MAX_NUMBER},
    engine::GameEvent,
    entities::{Card, Marks, Money, Number, Participant, Tier, Username},
    errors::{GameError, GameResult},
    prize::Economy,
};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoomState {
    /// Room name, also the key it is stored under.
    pub name: String,
    /// Numbers not yet drawn, consumed from the front.
    pub pool: VecDeque<Number>,
    /// Numbers drawn so far, in draw order.
    pub drawn: Vec<Number>,
    pub last_drawn: Option<Number>,
    pub current_tier: Tier,
    pub finished: bool,
    /// Participants in join order.
    pub participants: Vec<Participant>,
    /// Cumulative prize money per participant. Empty unless cards are sold.
    #[serde(default)]
    pub winnings: BTreeMap<Username, Money>,
    #[serde(default)]
    pub economy: Option<Economy>,
    pub opened_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Announcements not yet picked up by the host.
    #[serde(skip)]
    pub(crate) events: VecDeque<GameEvent>,
}

impl RoomState {
    /// Open a room with a freshly shuffled pool.
    pub fn open<R: Rng + ?Sized>(name: &str, economy: Option<Economy>, rng: &mut R) -> Self {
        let mut pool: Vec<Number> = (1..=MAX_NUMBER).collect();
        pool.shuffle(rng);
        let now = Utc::now();

        info!("Opened room {name}");
        Self {
            name: name.to_string(),
            pool: pool.into(),
            drawn: Vec::with_capacity(usize::from(MAX_NUMBER)),
            last_drawn: None,
            current_tier: Tier::default(),
            finished: false,
            participants: Vec::new(),
            winnings: BTreeMap::new(),
            economy,
            opened_at: now,
            updated_at: now,
            events: VecDeque::new(),
        }
    }

    /// Seat a participant holding `cards`.
    ///
    /// Joining mid-game is allowed; joining a finished game is not.
    pub fn join(&mut self, name: &str, cards: Vec<Card>) -> GameResult<&Participant> {
        let name = Username::new(name);
        if name.is_empty() {
            return Err(GameError::InvalidParticipantName);
        }
        if self.finished {
            return Err(GameError::GameAlreadyFinished);
        }
        if self.participant(&name).is_some() {
            warn!("{name} tried to join room {} twice", self.name);
            return Err(GameError::ParticipantAlreadyExists);
        }
        if cards.is_empty() || cards.len() > MAX_CARDS_PER_PARTICIPANT {
            return Err(GameError::InvalidCardCount {
                requested: cards.len(),
                max: MAX_CARDS_PER_PARTICIPANT,
            });
        }
        for card in &cards {
            card.validate()?;
        }

        info!(
            "{name} joined room {} with {} card(s)",
            self.name,
            cards.len()
        );
        self.events
            .push_back(GameEvent::Joined(name.clone(), cards.len()));
        self.updated_at = Utc::now();
        self.participants.push(Participant { name, cards });
        Ok(&self.participants[self.participants.len() - 1])
    }

    pub fn participant(&self, name: &Username) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.name == name)
    }

    /// Cards held across all participants.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.participants.iter().map(|p| p.cards.len()).sum()
    }

    /// Pot collected so far, if cards are sold.
    #[must_use]
    pub fn pot(&self) -> Option<Money> {
        self.economy
            .as_ref()
            .map(|economy| economy.pot(self.total_cards()))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn marks(&self) -> Marks {
        self.drawn.iter().collect()
    }

    /// Take queued announcements, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Shape check for documents coming back from storage.
    pub fn validate(&self) -> GameResult<()> {
        let invalid = |reason: String| Err(GameError::InvalidRoomState(reason));

        let mut seen = Marks::default();
        for &number in self.pool.iter().chain(&self.drawn) {
            if !(1..=MAX_NUMBER).contains(&number) {
                return invalid(format!("{number} is outside 1-{MAX_NUMBER}"));
            }
            if !seen.insert(number) {
                return invalid(format!("{number} is both pooled and drawn or repeated"));
            }
        }
        let total = self.pool.len() + self.drawn.len();
        if total != usize::from(MAX_NUMBER) {
            return invalid(format!("pool and history hold {total} numbers"));
        }
        if self.last_drawn != self.drawn.last().copied() {
            return invalid("last drawn number does not match history".to_string());
        }
        if self.finished && self.current_tier != Tier::Tombola {
            return invalid(format!("finished while playing {}", self.current_tier));
        }

        let mut names = HashSet::with_capacity(self.participants.len());
        for participant in &self.participants {
            if participant.name.is_empty() {
                return invalid("participant without a name".to_string());
            }
            if !names.insert(&participant.name) {
                return invalid(format!("{} appears twice", participant.name));
            }
            let count = participant.cards.len();
            if count == 0 || count > MAX_CARDS_PER_PARTICIPANT {
                return invalid(format!("{} holds {count} cards", participant.name));
            }
            for card in &participant.cards {
                card.validate()?;
            }
        }

        if let Some(name) = self.winnings.keys().find(|name| !names.contains(name)) {
            return invalid(format!("winnings recorded for unknown {name}"));
        }
        if let Some(economy) = &self.economy {
            economy.validate().map_err(GameError::InvalidRoomState)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string(self).map_err(|e| GameError::InvalidRoomState(e.to_string()))
    }

    /// Parse and validate a stored room document.
    pub fn from_json(doc: &str) -> GameResult<Self> {
        let room: Self =
            serde_json::from_str(doc).map_err(|e| GameError::InvalidRoomState(e.to_string()))?;
        room.validate()?;
        Ok(room)
    }
}
