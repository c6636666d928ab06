use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, ops::RangeInclusive};

use super::{
    constants::{
        COLS, EMPTY, FILLED_PER_ROW, MAX_NAME_LENGTH, MAX_NUMBER, NUMBERS_PER_CARD, ROWS,
    },
    errors::GameError,
};

/// A number in the pool (1..=90).
pub type Number = u8;

/// Prize money in whole cents.
pub type Money = i64;

/// Format cents as a euro amount, e.g. `1250` -> `€12.50`.
#[must_use]
pub fn format_money(cents: Money) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}€{}.{:02}", cents / 100, cents % 100)
}

/// Range of numbers that may appear in a card column.
///
/// Column 0 holds 1-9, columns 1-7 hold their decade (10-19 ... 70-79),
/// and column 8 holds 80-90.
#[must_use]
pub fn column_range(col: usize) -> RangeInclusive<Number> {
    match col {
        0 => 1..=9,
        8 => 80..=MAX_NUMBER,
        c => {
            let start = (c * 10) as Number;
            start..=start + 9
        }
    }
}

/// Column a number belongs to.
#[must_use]
pub fn column_of(number: Number) -> usize {
    if number == MAX_NUMBER {
        COLS - 1
    } else {
        usize::from(number / 10)
    }
}

/// Set of drawn numbers, indexed by value.
#[derive(Clone, Debug)]
pub struct Marks([bool; MAX_NUMBER as usize + 1]);

impl Marks {
    #[must_use]
    pub fn contains(&self, number: Number) -> bool {
        number != EMPTY && self.0.get(usize::from(number)).copied().unwrap_or(false)
    }

    /// Mark a number. Returns false if it was already marked.
    pub fn insert(&mut self, number: Number) -> bool {
        match self.0.get_mut(usize::from(number)) {
            Some(slot) if number != EMPTY && !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }
}

impl Default for Marks {
    fn default() -> Self {
        Self([false; MAX_NUMBER as usize + 1])
    }
}

impl<'a> FromIterator<&'a Number> for Marks {
    fn from_iter<I: IntoIterator<Item = &'a Number>>(iter: I) -> Self {
        let mut marks = Self::default();
        for &number in iter {
            marks.insert(number);
        }
        marks
    }
}

/// A 3x9 tombola card. Empty cells hold [`EMPTY`].
///
/// Every row has exactly five filled cells, each filled value sits in the
/// column of its decade, values are distinct, and filled cells ascend from
/// top to bottom within a column.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Card([[Number; COLS]; ROWS]);

impl Card {
    /// Build a card from a raw grid, checking every card invariant.
    pub fn from_grid(grid: [[Number; COLS]; ROWS]) -> Result<Self, GameError> {
        let card = Self(grid);
        card.validate()?;
        Ok(card)
    }

    /// Only for grids produced by the generator.
    pub(crate) const fn from_grid_unchecked(grid: [[Number; COLS]; ROWS]) -> Self {
        Self(grid)
    }

    #[must_use]
    pub const fn grid(&self) -> &[[Number; COLS]; ROWS] {
        &self.0
    }

    /// Filled values of one row, left to right. Empty past the last row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Number> + '_ {
        self.0
            .get(row)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&n| n != EMPTY)
    }

    /// Every filled value, row by row.
    pub fn numbers(&self) -> impl Iterator<Item = Number> + '_ {
        self.0.iter().flatten().copied().filter(|&n| n != EMPTY)
    }

    #[must_use]
    pub fn contains(&self, number: Number) -> bool {
        number != EMPTY && self.numbers().any(|n| n == number)
    }

    /// Drawn numbers per row.
    #[must_use]
    pub fn row_hits(&self, marks: &Marks) -> [usize; ROWS] {
        let mut hits = [0; ROWS];
        for (row, count) in hits.iter_mut().enumerate() {
            *count = self.row(row).filter(|&n| marks.contains(n)).count();
        }
        hits
    }

    /// Drawn numbers on the whole card.
    #[must_use]
    pub fn total_hits(&self, marks: &Marks) -> usize {
        self.row_hits(marks).iter().sum()
    }

    /// Check the card invariants.
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: String| Err(GameError::InvalidRoomState(reason));
        let mut seen = Marks::default();

        for (r, row) in self.0.iter().enumerate() {
            let filled = row.iter().filter(|&&n| n != EMPTY).count();
            if filled != FILLED_PER_ROW {
                return invalid(format!("card row {r} has {filled} numbers"));
            }
            for (c, &number) in row.iter().enumerate() {
                if number == EMPTY {
                    continue;
                }
                if number > MAX_NUMBER || column_of(number) != c {
                    return invalid(format!("{number} does not belong in column {c}"));
                }
                if !seen.insert(number) {
                    return invalid(format!("{number} appears twice on a card"));
                }
            }
        }

        for c in 0..COLS {
            let column: Vec<Number> = (0..ROWS)
                .map(|r| self.0[r][c])
                .filter(|&n| n != EMPTY)
                .collect();
            if column.windows(2).any(|pair| pair[0] >= pair[1]) {
                return invalid(format!("column {c} is not ascending"));
            }
        }

        debug_assert_eq!(self.numbers().count(), NUMBERS_PER_CARD);
        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|&n| {
                    if n == EMPTY {
                        " .".to_string()
                    } else {
                        format!("{n:>2}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Prize tiers in the order they are played.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Two numbers in one row.
    #[default]
    Ambo,
    /// Three numbers in one row.
    Terno,
    /// Four numbers in one row.
    Quaterna,
    /// A full row.
    Cinquina,
    /// The whole card.
    Tombola,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Ambo,
        Tier::Terno,
        Tier::Quaterna,
        Tier::Cinquina,
        Tier::Tombola,
    ];

    /// Hits required: per row for line tiers, on the whole card for tombola.
    #[must_use]
    pub const fn target(self) -> usize {
        match self {
            Self::Ambo => 2,
            Self::Terno => 3,
            Self::Quaterna => 4,
            Self::Cinquina => 5,
            Self::Tombola => NUMBERS_PER_CARD,
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Ambo => Some(Self::Terno),
            Self::Terno => Some(Self::Quaterna),
            Self::Quaterna => Some(Self::Cinquina),
            Self::Cinquina => Some(Self::Tombola),
            Self::Tombola => None,
        }
    }

    /// Whether a card with these row hits satisfies the tier.
    #[must_use]
    pub fn is_satisfied_by(self, row_hits: &[usize; ROWS]) -> bool {
        match self {
            Self::Tombola => row_hits.iter().sum::<usize>() == NUMBERS_PER_CARD,
            tier => row_hits.iter().any(|&hits| hits >= tier.target()),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Ambo => "ambo",
            Self::Terno => "terno",
            Self::Quaterna => "quaterna",
            Self::Cinquina => "cinquina",
            Self::Tombola => "tombola",
        };
        write!(f, "{repr}")
    }
}

impl TryFrom<u8> for Tier {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Ambo),
            3 => Ok(Self::Terno),
            4 => Ok(Self::Quaterna),
            5 => Ok(Self::Cinquina),
            15 => Ok(Self::Tombola),
            v => Err(GameError::InvalidRoomState(format!("unknown tier {v}"))),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.target() as u8
    }
}

/// Participant display name. Surrounding whitespace is trimmed and the name
/// is cut to [`MAX_NAME_LENGTH`] characters.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        Self(s.trim().chars().take(MAX_NAME_LENGTH).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A named participant and the cards they hold.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Participant {
    pub name: Username,
    pub cards: Vec<Card>,
}

impl Participant {
    /// Whether any of the participant's cards satisfies the tier.
    #[must_use]
    pub fn satisfies(&self, tier: Tier, marks: &Marks) -> bool {
        self.cards
            .iter()
            .any(|card| tier.is_satisfied_by(&card.row_hits(marks)))
    }
}
