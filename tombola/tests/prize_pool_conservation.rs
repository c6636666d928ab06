//! Prize pool conservation tests for rooms that sell their cards.
//!
//! Per-head shares are rounded down, so what is paid out on a tier can fall
//! short of the tier's pool by less than one cent per winner, and never
//! exceed it.

use tombola::{Economy, PrizeSplit, Tier, split_prize};

#[test]
fn test_even_split_pays_whole_pool() {
    assert_eq!(split_prize(100, 2), Some(50));
    assert_eq!(split_prize(300, 3), Some(100));
    assert_eq!(split_prize(7, 1), Some(7));
}

#[test]
fn test_per_head_shares_never_exceed_tier_pool() {
    let split = PrizeSplit::standard();
    let pots = [1, 99, 100, 1005, 2500, 13_337, 90_000];

    for pot in pots {
        for tier in Tier::ALL {
            let pool = split.tier_pool(pot, tier);
            for winners in 1..=12usize {
                let share = split.per_head_share(pot, tier, winners).unwrap();
                let paid = share * winners as i64;
                assert!(
                    paid <= pool,
                    "{tier}: {winners} × {share} = {paid} exceeds pool {pool} of pot {pot}"
                );
                assert!(
                    pool - paid < winners as i64 + 1,
                    "{tier}: pot {pot} leaves {} unpaid for {winners} winners",
                    pool - paid
                );
            }
        }
    }
}

#[test]
fn test_all_tiers_together_stay_within_pot() {
    let economy = Economy::new(250);
    for cards in [1, 7, 18, 36, 120] {
        let pot = economy.pot(cards);
        let total: i64 = Tier::ALL
            .iter()
            .map(|&tier| economy.split.tier_pool(pot, tier))
            .sum();
        assert!(total <= pot);
        assert!(pot - total < 5, "pot {pot} loses {} to rounding", pot - total);
    }
}

#[test]
fn test_custom_split_must_total_hundred() {
    let generous = PrizeSplit {
        ambo: 20,
        terno: 20,
        quaterna: 20,
        cinquina: 20,
        tombola: 20,
    };
    assert!(generous.validate().is_ok());

    let greedy = PrizeSplit {
        tombola: 60,
        ..generous
    };
    assert!(greedy.validate().is_err());
    assert!(
        Economy {
            card_price: 100,
            split: greedy
        }
        .validate()
        .is_err()
    );
}
