//! Draw and win engine.
//!
//! A draw takes the front of the pool, appends it to the history and then
//! evaluates the active tier exactly once. When the tier has winners it pays
//! them (if cards are sold), announces them and advances by a single step;
//! the tier it advances to is only checked on the next draw.

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    constants::ROWS,
    entities::{Card, Marks, Money, Number, Tier, Username, format_money},
    errors::{GameError, GameResult},
    room::RoomState,
};

/// Announcements produced while a room is played.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    Joined(Username, usize),
    Drawn(Number),
    TierWon {
        tier: Tier,
        winners: Vec<Username>,
        per_head: Option<Money>,
    },
    GameFinished,
    PoolExhausted,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Joined(username, 1) => format!("{username} joined with 1 card"),
            Self::Joined(username, cards) => format!("{username} joined with {cards} cards"),
            Self::Drawn(number) => format!("drawn {number}"),
            Self::TierWon {
                tier,
                winners,
                per_head,
            } => {
                let names = winners
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                match per_head {
                    Some(amount) => format!("{tier}! {names} won {} each", format_money(*amount)),
                    None => format!("{tier}! {names}"),
                }
            }
            Self::GameFinished => "game over".to_string(),
            Self::PoolExhausted => "every number has been drawn".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Outcome of evaluating the active tier once.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct WinResult {
    /// Tier that was won by this evaluation, if any.
    pub tier_won: Option<Tier>,
    /// Winners in join order; each participant appears at most once.
    pub winners: Vec<Username>,
    /// Amount credited to each winner, when cards are sold.
    pub per_head_prize: Option<Money>,
    pub game_finished: bool,
}

impl WinResult {
    #[must_use]
    pub fn has_winners(&self) -> bool {
        !self.winners.is_empty()
    }
}

/// Outcome of a draw request.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DrawResult {
    /// The number drawn, or `None` when nothing was drawn.
    pub number: Option<Number>,
    /// Whether the pool is empty after this call.
    pub exhausted: bool,
    /// Why nothing was drawn.
    pub skipped: Option<GameError>,
    pub wins: WinResult,
}

/// Per-row hits of one card, for showing how close it is.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CardProgress {
    pub row_hits: [usize; ROWS],
    pub total_hits: usize,
}

impl CardProgress {
    #[must_use]
    pub fn new(card: &Card, marks: &Marks) -> Self {
        let row_hits = card.row_hits(marks);
        Self {
            row_hits,
            total_hits: row_hits.iter().sum(),
        }
    }

    /// Best row, the figure line tiers are judged on.
    #[must_use]
    pub fn best_row(&self) -> usize {
        self.row_hits.iter().copied().max().unwrap_or(0)
    }
}

impl RoomState {
    /// Draw the next number and evaluate the active tier.
    ///
    /// A finished game or an empty pool makes this a no-op reported through
    /// [`DrawResult::skipped`]. A malformed room is returned as an error and
    /// left untouched.
    pub fn draw_next(&mut self) -> GameResult<DrawResult> {
        self.validate()?;

        if self.finished {
            debug!("Room {} is finished; draw skipped", self.name);
            return Ok(DrawResult {
                exhausted: self.pool.is_empty(),
                skipped: Some(GameError::GameAlreadyFinished),
                ..DrawResult::default()
            });
        }

        let Some(number) = self.pool.pop_front() else {
            debug!("Room {} has nothing left to draw", self.name);
            return Ok(DrawResult {
                exhausted: true,
                skipped: Some(GameError::PoolExhausted),
                ..DrawResult::default()
            });
        };

        self.drawn.push(number);
        self.last_drawn = Some(number);
        self.updated_at = Utc::now();
        self.events.push_back(GameEvent::Drawn(number));
        debug!(
            "Room {} drew {number} ({} left)",
            self.name,
            self.pool.len()
        );

        let wins = self.evaluate_wins();
        let exhausted = self.pool.is_empty();
        if exhausted && !self.finished {
            self.events.push_back(GameEvent::PoolExhausted);
        }

        Ok(DrawResult {
            number: Some(number),
            exhausted,
            skipped: None,
            wins,
        })
    }

    /// Evaluate the active tier against the numbers drawn so far.
    ///
    /// Advances at most one tier per call, so calling it again right after a
    /// win checks the next tier and does not announce the previous one twice.
    pub fn evaluate_wins(&mut self) -> WinResult {
        if self.finished {
            return WinResult::default();
        }

        let tier = self.current_tier;
        let marks = self.marks();
        let winners: Vec<Username> = self
            .participants
            .iter()
            .filter(|participant| participant.satisfies(tier, &marks))
            .map(|participant| participant.name.clone())
            .collect();

        if winners.is_empty() {
            return WinResult::default();
        }

        let per_head_prize = self.economy.as_ref().and_then(|economy| {
            economy
                .split
                .per_head_share(economy.pot(self.total_cards()), tier, winners.len())
        });
        if let Some(amount) = per_head_prize {
            for winner in &winners {
                *self.winnings.entry(winner.clone()).or_default() += amount;
            }
        }

        match tier.next() {
            Some(next) => self.current_tier = next,
            None => self.finished = true,
        }
        self.updated_at = Utc::now();

        let event = GameEvent::TierWon {
            tier,
            winners: winners.clone(),
            per_head: per_head_prize,
        };
        info!("Room {}: {event}", self.name);
        self.events.push_back(event);
        if self.finished {
            info!("Room {} finished after {} draws", self.name, self.drawn.len());
            self.events.push_back(GameEvent::GameFinished);
        }

        WinResult {
            tier_won: Some(tier),
            winners,
            per_head_prize,
            game_finished: self.finished,
        }
    }

    /// Progress of every card of a participant.
    pub fn progress(&self, name: &Username) -> Option<Vec<CardProgress>> {
        let marks = self.marks();
        self.participant(name).map(|participant| {
            participant
                .cards
                .iter()
                .map(|card| CardProgress::new(card, &marks))
                .collect()
        })
    }
}
