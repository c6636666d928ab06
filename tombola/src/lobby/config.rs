//! Room configuration models.

use serde::{Deserialize, Serialize};

use crate::game::{
    Economy, Money, PrizeSplit,
    constants::{DEFAULT_MAX_PARTICIPANTS, MAX_CARDS_PER_PARTICIPANT},
};

/// Room configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Room name, unique within a store
    pub name: String,

    /// Maximum number of participants, the bank included (default: 20)
    pub max_participants: usize,

    /// Maximum cards one participant may hold (default and hard limit: 6)
    pub max_cards_per_participant: usize,

    /// Price of one card in cents; `None` plays for fun
    pub card_price: Option<Money>,

    /// Share of the pot paid on each tier
    pub prize_split: PrizeSplit,

    /// Whether the bank plays a full board (tombolone)
    pub with_bank: bool,

    /// Password required to draw and close, compared as plain text
    pub admin_password: Option<String>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: "Tombola".to_string(),
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            max_cards_per_participant: MAX_CARDS_PER_PARTICIPANT,
            card_price: None,
            prize_split: PrizeSplit::standard(),
            with_bank: true,
            admin_password: None,
        }
    }
}

impl RoomConfig {
    /// Config with defaults for everything but the name
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Room name can't be empty".to_string());
        }

        if self.max_participants == 0 || self.max_participants > 100 {
            return Err("Max participants must be between 1 and 100".to_string());
        }

        if self.with_bank && self.max_participants < 2 {
            return Err("Room with a bank needs room for at least 2 participants".to_string());
        }

        if self.max_cards_per_participant == 0
            || self.max_cards_per_participant > MAX_CARDS_PER_PARTICIPANT
        {
            return Err(format!(
                "Max cards per participant must be between 1 and {MAX_CARDS_PER_PARTICIPANT}"
            ));
        }

        if let Some(economy) = self.economy() {
            economy.validate()?;
        }

        Ok(())
    }

    /// Economic settings, present when cards are sold
    pub fn economy(&self) -> Option<Economy> {
        self.card_price.map(|card_price| Economy {
            card_price,
            split: self.prize_split.clone(),
        })
    }

    /// Plain equality check against the admin password, if one is set
    pub fn check_password(&self, given: Option<&str>) -> bool {
        match &self.admin_password {
            Some(expected) => given == Some(expected.as_str()),
            None => true,
        }
    }
}
