//! Prize split for rooms that sell their cards.

use serde::{Deserialize, Serialize};

use super::{
    constants::MAX_CARD_PRICE,
    entities::{Money, Tier},
};

/// Percentage of the pot paid out on each tier.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PrizeSplit {
    pub ambo: u8,
    pub terno: u8,
    pub quaterna: u8,
    pub cinquina: u8,
    pub tombola: u8,
}

impl Default for PrizeSplit {
    fn default() -> Self {
        Self::standard()
    }
}

impl PrizeSplit {
    /// 10/15/20/25/30, the usual family-table split.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            ambo: 10,
            terno: 15,
            quaterna: 20,
            cinquina: 25,
            tombola: 30,
        }
    }

    #[must_use]
    pub const fn percentage(&self, tier: Tier) -> u8 {
        match tier {
            Tier::Ambo => self.ambo,
            Tier::Terno => self.terno,
            Tier::Quaterna => self.quaterna,
            Tier::Cinquina => self.cinquina,
            Tier::Tombola => self.tombola,
        }
    }

    /// Percentages must add up to the whole pot.
    pub fn validate(&self) -> Result<(), String> {
        let total: u32 = Tier::ALL
            .iter()
            .map(|&tier| u32::from(self.percentage(tier)))
            .sum();
        if total != 100 {
            return Err(format!("Prize split must total 100%, got {total}%"));
        }
        Ok(())
    }

    /// Money set aside for a tier out of the whole pot.
    #[must_use]
    pub fn tier_pool(&self, pot: Money, tier: Tier) -> Money {
        let pool = i128::from(pot) * i128::from(self.percentage(tier)) / 100;
        Money::try_from(pool).unwrap_or(Money::MAX)
    }

    /// Per-head share of a tier when `winners` win it together.
    ///
    /// Rounds down once per head, on the unrounded tier pool. Any remainder
    /// stays with the bank.
    #[must_use]
    pub fn per_head_share(&self, pot: Money, tier: Tier, winners: usize) -> Option<Money> {
        if winners == 0 {
            return None;
        }
        let heads = i128::try_from(winners).ok()?;
        let share = i128::from(pot) * i128::from(self.percentage(tier)) / (100 * heads);
        Money::try_from(share).ok()
    }
}

/// Split a prize pool evenly between `winners`, rounding down per head.
#[must_use]
pub fn split_prize(pool: Money, winners: usize) -> Option<Money> {
    if winners == 0 {
        return None;
    }
    let heads = Money::try_from(winners).ok()?;
    Some(pool / heads)
}

/// Economic settings of a room.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Economy {
    /// Price of one card in cents.
    pub card_price: Money,
    #[serde(default)]
    pub split: PrizeSplit,
}

impl Economy {
    #[must_use]
    pub fn new(card_price: Money) -> Self {
        Self {
            card_price,
            split: PrizeSplit::standard(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.card_price <= 0 || self.card_price > MAX_CARD_PRICE {
            return Err(format!("Card price must be between 1 and {MAX_CARD_PRICE} cents"));
        }
        self.split.validate()
    }

    /// Pot collected from `cards_sold` cards.
    #[must_use]
    pub fn pot(&self, cards_sold: usize) -> Money {
        self.card_price
            .saturating_mul(Money::try_from(cards_sold).unwrap_or(Money::MAX))
    }
}
