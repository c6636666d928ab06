//! Board geometry and room limits.

use super::entities::{Money, Number};

/// Highest number in the pool. Numbers run from 1 to this value inclusive.
pub const MAX_NUMBER: Number = 90;

/// Sentinel stored in empty card cells.
pub const EMPTY: Number = 0;

/// Rows on a single card.
pub const ROWS: usize = 3;

/// Columns on a single card, one per decade.
pub const COLS: usize = 9;

/// Filled cells in every card row.
pub const FILLED_PER_ROW: usize = 5;

/// Filled cells on a whole card.
pub const NUMBERS_PER_CARD: usize = ROWS * FILLED_PER_ROW;

/// Cards in a full board (tombolone).
pub const CARDS_PER_BOARD: usize = 6;

/// Rows of the staging grid used to build a full board.
pub const BOARD_ROWS: usize = CARDS_PER_BOARD * ROWS;

/// Most cards a single participant may hold.
pub const MAX_CARDS_PER_PARTICIPANT: usize = 6;

/// Display names are cut to this many characters.
pub const MAX_NAME_LENGTH: usize = 32;

/// Default cap on participants in a room.
pub const DEFAULT_MAX_PARTICIPANTS: usize = 20;

/// Display name of the bank when it plays a full board.
pub const BANK_NAME: &str = "TOMBOLONE";

/// Highest accepted card price, in cents (€1,000,000).
pub const MAX_CARD_PRICE: Money = 100_000_000;
