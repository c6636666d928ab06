//! Host configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::{path::PathBuf, str::FromStr, time::Duration};
use tombola::{MAX_CARDS_PER_PARTICIPANT, Money, RoomConfig, constants::DEFAULT_MAX_PARTICIPANTS};

/// A participant to seat at startup, given as `NAME:CARDS` on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    pub cards: usize,
}

impl FromStr for PlayerSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, cards) = match s.rsplit_once(':') {
            Some((name, cards)) => {
                let cards = cards
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid card count in {s:?}"))?;
                (name, cards)
            }
            None => (s, 1),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing player name in {s:?}"));
        }

        Ok(Self {
            name: name.to_string(),
            cards,
        })
    }
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Clone, Default)]
pub struct HostOverrides {
    pub room: Option<String>,
    pub players: Vec<PlayerSpec>,
    pub no_bank: bool,
    pub card_price: Option<Money>,
    pub password: Option<String>,
    pub draws: Option<usize>,
    pub interval_ms: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

/// Complete host configuration
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Room to open or resume
    pub room: RoomConfig,
    /// Participants seated before the first draw
    pub players: Vec<PlayerSpec>,
    /// Directory holding room documents; rooms live in memory when unset
    pub data_dir: Option<PathBuf>,
    /// Stop after this many draws instead of playing to the end
    pub draws: Option<usize>,
    /// Pause between draws
    pub draw_interval: Duration,
}

impl HostConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values from the command line
    ///
    /// # Returns
    ///
    /// * `Result<HostConfig, ConfigError>` - Loaded configuration or error
    pub fn from_env(overrides: HostOverrides) -> Result<Self, ConfigError> {
        let name = overrides
            .room
            .or_else(|| std::env::var("TOMBOLA_ROOM").ok())
            .unwrap_or_else(|| "Tombola".to_string());

        let card_price = match overrides.card_price {
            Some(price) => Some(price),
            None => match std::env::var("TOMBOLA_CARD_PRICE") {
                Ok(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                    var: "TOMBOLA_CARD_PRICE".to_string(),
                    reason: format!("{value:?} is not a price in cents"),
                })?),
                Err(_) => None,
            },
        };

        let admin_password = overrides
            .password
            .or_else(|| std::env::var("TOMBOLA_ADMIN_PASSWORD").ok())
            .filter(|pw| !pw.is_empty());

        let room = RoomConfig {
            name,
            max_participants: parse_env_or("TOMBOLA_MAX_PARTICIPANTS", DEFAULT_MAX_PARTICIPANTS),
            max_cards_per_participant: MAX_CARDS_PER_PARTICIPANT,
            card_price,
            with_bank: !overrides.no_bank,
            admin_password,
            ..RoomConfig::default()
        };

        let data_dir = overrides
            .data_dir
            .or_else(|| std::env::var("TOMBOLA_DATA_DIR").ok().map(PathBuf::from));

        let interval_ms = overrides
            .interval_ms
            .unwrap_or_else(|| parse_env_or("TOMBOLA_DRAW_INTERVAL_MS", 1000));

        Ok(HostConfig {
            room,
            players: overrides.players,
            data_dir,
            draws: overrides.draws,
            draw_interval: Duration::from_millis(interval_ms),
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.room.validate().map_err(|reason| ConfigError::Invalid {
            var: "room".to_string(),
            reason,
        })?;

        let seats = self.players.len() + usize::from(self.room.with_bank);
        if seats > self.room.max_participants {
            return Err(ConfigError::Invalid {
                var: "TOMBOLA_MAX_PARTICIPANTS".to_string(),
                reason: format!(
                    "{seats} participants requested but the room seats {}",
                    self.room.max_participants
                ),
            });
        }

        if let Some(player) = self
            .players
            .iter()
            .find(|p| p.cards == 0 || p.cards > self.room.max_cards_per_participant)
        {
            return Err(ConfigError::Invalid {
                var: "--player".to_string(),
                reason: format!(
                    "{} asks for {} cards (1-{} allowed)",
                    player.name, player.cards, self.room.max_cards_per_participant
                ),
            });
        }

        if self.draws == Some(0) {
            return Err(ConfigError::Invalid {
                var: "--draws".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
