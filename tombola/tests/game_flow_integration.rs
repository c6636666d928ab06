//! End-to-end game flow tests through the public room API.

use rand::{SeedableRng, rngs::StdRng};
use tombola::{
    Card, Economy, GameError, GameEvent, Number, RoomState, Tier, Username, generate_cards,
    generate_full_board,
};

fn card() -> Card {
    Card::from_grid([
        [3, 0, 22, 0, 44, 0, 61, 0, 80],
        [0, 15, 0, 36, 0, 52, 0, 70, 88],
        [7, 0, 28, 39, 0, 57, 0, 76, 0],
    ])
    .unwrap()
}

/// Room whose pool starts with `front`, followed by the remaining numbers.
fn rigged_room(front: &[Number], economy: Option<Economy>) -> RoomState {
    let mut room = RoomState::open("integration", economy, &mut StdRng::seed_from_u64(9));
    room.pool.retain(|n| !front.contains(n));
    for &n in front.iter().rev() {
        room.pool.push_front(n);
    }
    room
}

fn draw_all(room: &mut RoomState, count: usize) {
    for _ in 0..count {
        room.draw_next().unwrap();
    }
}

// === Scenario Tests ===

#[test]
fn test_two_hits_in_one_row_wins_ambo() {
    // 3 and 22 share row 0; 68 and 41 are not on the card.
    let mut room = rigged_room(&[68, 3, 41, 22], None);
    room.join("Nonna", vec![card()]).unwrap();

    draw_all(&mut room, 3);
    assert_eq!(room.current_tier, Tier::Ambo);

    let result = room.draw_next().unwrap();
    assert_eq!(result.number, Some(22));
    assert_eq!(result.wins.tier_won, Some(Tier::Ambo));
    assert_eq!(result.wins.winners, vec![Username::new("Nonna")]);
    assert_eq!(room.current_tier, Tier::Terno);
}

#[test]
fn test_hits_split_across_rows_do_not_win() {
    // One hit in each of rows 0, 1 and 2.
    let mut room = rigged_room(&[3, 15, 7], None);
    room.join("Nonna", vec![card()]).unwrap();

    for _ in 0..3 {
        let result = room.draw_next().unwrap();
        assert!(!result.wins.has_winners());
    }
    assert_eq!(room.current_tier, Tier::Ambo);
}

#[test]
fn test_fourteen_hits_never_make_tombola() {
    let numbers: Vec<Number> = card().numbers().collect();
    let missing = numbers[numbers.len() - 1];
    let mut room = rigged_room(&numbers[..numbers.len() - 1], None);
    room.join("Nonna", vec![card()]).unwrap();

    draw_all(&mut room, 14);
    assert_eq!(room.current_tier, Tier::Tombola);
    assert!(!room.drawn.contains(&missing));

    assert_eq!(card().total_hits(&room.marks()), 14);
    let result = room.evaluate_wins();
    assert!(!result.has_winners());
    assert!(!room.finished);
}

#[test]
fn test_draw_on_empty_pool_changes_nothing() {
    let mut room = rigged_room(&[], None);
    draw_all(&mut room, 90);
    room.drain_events();
    let before = room.clone();

    let result = room.draw_next().unwrap();
    assert!(result.exhausted);
    assert_eq!(result.number, None);
    assert_eq!(result.skipped, Some(GameError::PoolExhausted));
    assert_eq!(room, before);
}

// === Full Game Tests ===

#[test]
fn test_full_game_walks_every_tier_once() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut room = RoomState::open("natale", None, &mut rng);
    room.join("TOMBOLONE", generate_full_board(&mut rng).to_vec())
        .unwrap();
    room.join("Nonna", generate_cards(&mut rng, 3)).unwrap();

    let mut won = Vec::new();
    let mut previous = room.current_tier;
    while !room.finished {
        let result = room.draw_next().unwrap();
        assert!(result.skipped.is_none(), "bank board guarantees a tombola");
        if let Some(tier) = result.wins.tier_won {
            assert_eq!(tier, previous, "won a tier other than the active one");
            won.push(tier);
        }
        assert!(room.current_tier >= previous);
        previous = room.current_tier;
        assert_eq!(room.pool.len() + room.drawn.len(), 90);
    }

    assert_eq!(won, Tier::ALL.to_vec());
    assert_eq!(room.current_tier, Tier::Tombola);

    let events = room.drain_events();
    let tiers_announced = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TierWon { .. }))
        .count();
    assert_eq!(tiers_announced, 5);
    assert_eq!(events.last(), Some(&GameEvent::GameFinished));

    let drawn = room.drawn.clone();
    let after = room.draw_next().unwrap();
    assert_eq!(after.skipped, Some(GameError::GameAlreadyFinished));
    assert_eq!(room.drawn, drawn);
}

#[test]
fn test_paid_game_never_pays_more_than_the_pot() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut room = RoomState::open("soldi", Some(Economy::new(150)), &mut rng);
    room.join("Ada", generate_cards(&mut rng, 6)).unwrap();
    room.join("Bruno", generate_cards(&mut rng, 6)).unwrap();
    room.join("Carla", generate_cards(&mut rng, 1)).unwrap();

    while room.remaining() > 0 && !room.finished {
        room.draw_next().unwrap();
    }

    let pot = room.pot().unwrap();
    assert_eq!(pot, 13 * 150);
    let paid: i64 = room.winnings.values().sum();
    assert!(paid <= pot, "paid {paid} out of a {pot} pot");
    assert!(room.winnings.values().all(|&amount| amount > 0));
}

#[test]
fn test_room_survives_json_between_draws() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut room = RoomState::open("viaggio", Some(Economy::new(100)), &mut rng);
    room.join("Ada", generate_cards(&mut rng, 2)).unwrap();
    room.join("Bruno", generate_cards(&mut rng, 2)).unwrap();

    for _ in 0..40 {
        let doc = room.to_json().unwrap();
        room = RoomState::from_json(&doc).unwrap();
        room.draw_next().unwrap();
    }
    assert_eq!(room.drawn.len(), 40);
    assert!(room.validate().is_ok());
}
