//! Card generation.
//!
//! Both generators are pure functions of the random source they are handed,
//! so a seeded RNG reproduces the same cards.

use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom, index},
};

use super::{
    constants::{BOARD_ROWS, CARDS_PER_BOARD, COLS, EMPTY, FILLED_PER_ROW, MAX_NUMBER, ROWS},
    entities::{Card, Number, column_range},
};

/// Generate a single card.
///
/// Each row independently picks five of the nine columns; each picked cell
/// gets a value from its column's decade that is not yet on the card. A
/// column may end up with no numbers at all.
pub fn generate_card<R: Rng + ?Sized>(rng: &mut R) -> Card {
    let mut grid = [[EMPTY; COLS]; ROWS];
    let mut used = [false; MAX_NUMBER as usize + 1];

    for row in &mut grid {
        for col in index::sample(rng, COLS, FILLED_PER_ROW).into_vec() {
            let range = column_range(col);
            // At most three of a decade's nine or more values are ever taken.
            let value = loop {
                let candidate: Number = rng.random_range(range.clone());
                if !used[usize::from(candidate)] {
                    break candidate;
                }
            };
            used[usize::from(value)] = true;
            row[col] = value;
        }
    }

    sort_columns(&mut grid);
    Card::from_grid_unchecked(grid)
}

/// Generate `count` independent cards.
pub fn generate_cards<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Card> {
    (0..count).map(|_| generate_card(rng)).collect()
}

/// Generate a full board (tombolone): six cards that hold every number from
/// 1 to 90 exactly once between them.
pub fn generate_full_board<R: Rng + ?Sized>(rng: &mut R) -> [Card; CARDS_PER_BOARD] {
    let mut staging = [[EMPTY; COLS]; BOARD_ROWS];

    for col in 0..COLS {
        let mut values: Vec<Number> = column_range(col).collect();
        values.shuffle(rng);

        let mut cells = [EMPTY; BOARD_ROWS];
        cells[..values.len()].copy_from_slice(&values);
        cells.shuffle(rng);

        for (row, value) in staging.iter_mut().zip(cells) {
            row[col] = value;
        }
    }

    balance_rows(&mut staging, rng);

    std::array::from_fn(|card_idx| {
        let mut grid = [[EMPTY; COLS]; ROWS];
        grid.copy_from_slice(&staging[card_idx * ROWS..(card_idx + 1) * ROWS]);
        sort_columns(&mut grid);
        Card::from_grid_unchecked(grid)
    })
}

fn filled(row: &[Number; COLS]) -> usize {
    row.iter().filter(|&&n| n != EMPTY).count()
}

/// Move values between staging rows until every row holds exactly five.
///
/// The 90 values fill 18 rows of five, so an over-full row always has an
/// under-full partner. The over-full row is filled in at least six columns and
/// the under-full row is empty in at least five, so out of nine columns at
/// least one can take the move.
fn balance_rows<R: Rng + ?Sized>(staging: &mut [[Number; COLS]; BOARD_ROWS], rng: &mut R) {
    loop {
        let over: Vec<usize> = (0..BOARD_ROWS)
            .filter(|&r| filled(&staging[r]) > FILLED_PER_ROW)
            .collect();
        let under: Vec<usize> = (0..BOARD_ROWS)
            .filter(|&r| filled(&staging[r]) < FILLED_PER_ROW)
            .collect();

        let (Some(&from), Some(&to)) = (over.choose(rng), under.choose(rng)) else {
            break;
        };

        let movable: Vec<usize> = (0..COLS)
            .filter(|&c| staging[from][c] != EMPTY && staging[to][c] == EMPTY)
            .collect();
        let Some(&col) = movable.choose(rng) else {
            debug_assert!(false, "rows {from} and {to} share no movable column");
            break;
        };

        staging[to][col] = staging[from][col];
        staging[from][col] = EMPTY;
    }
}

/// Sort every column's filled cells ascending, top to bottom, keeping the
/// set of filled positions unchanged.
fn sort_columns(rows: &mut [[Number; COLS]]) {
    for col in 0..COLS {
        let positions: Vec<usize> = (0..rows.len())
            .filter(|&r| rows[r][col] != EMPTY)
            .collect();
        let mut values: Vec<Number> = positions.iter().map(|&r| rows[r][col]).collect();
        values.sort_unstable();
        for (&r, value) in positions.iter().zip(values) {
            rows[r][col] = value;
        }
    }
}
