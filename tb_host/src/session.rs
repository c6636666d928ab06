//! Runs one room from opening to the last draw.

use crate::config::HostConfig;
use log::{info, warn};
use tombola::{
    CardProgress, GameError, Money, RoomConfig, RoomManager, RoomState, StoreError, StoreResult,
    Username,
    constants::{FILLED_PER_ROW, NUMBERS_PER_CARD},
    game::entities::format_money,
};

/// What happened during a session
#[derive(Debug, Default)]
pub struct SessionReport {
    /// Draws made by this session
    pub draws: usize,
    /// Winners of each tier, in the order the tiers were won
    pub winners: Vec<(String, Vec<Username>)>,
    pub finished: bool,
    pub exhausted: bool,
}

/// Open (or resume) the configured room, seat the players and draw.
pub async fn run(manager: &RoomManager, config: &HostConfig) -> StoreResult<SessionReport> {
    let room = config.room.name.as_str();
    let password = config.room.admin_password.as_deref();

    match manager.open_room(config.room.clone()).await {
        Ok(summary) => println!(
            "Room {} is open with {} participant(s)",
            summary.name, summary.participants
        ),
        Err(StoreError::RoomAlreadyExists(_)) => {
            let stored = manager.config(room).await?;
            let drift = config_drift(&stored, &config.room);
            if !drift.is_empty() {
                warn!(
                    "Room {room} keeps its stored settings; ignoring requested {}",
                    drift.join(", ")
                );
                println!(
                    "Room {room} already exists, so these settings are not applied: {}",
                    drift.join(", ")
                );
            }

            let state = manager.snapshot(room).await?;
            println!(
                "Resuming room {room}: {} drawn, playing {}",
                state.drawn.len(),
                state.current_tier
            );
        }
        Err(e) => return Err(e),
    }

    for player in &config.players {
        match manager.join(room, &player.name, player.cards).await {
            Ok(cards) => {
                println!("{} plays {} card(s):", player.name, cards.len());
                for card in &cards {
                    println!("{card}\n");
                }
            }
            Err(StoreError::Game(GameError::ParticipantAlreadyExists)) => {
                info!("{} is already seated in {room}", player.name);
            }
            Err(e) => {
                warn!("Could not seat {}: {}", player.name, e);
                println!("{} can't join: {}", player.name, e.client_message());
            }
        }
    }

    let mut report = SessionReport::default();
    loop {
        if config.draws.is_some_and(|limit| report.draws >= limit) {
            break;
        }

        let result = manager.draw(room, password).await?;
        if let Some(skipped) = result.skipped {
            info!("Room {room}: {skipped}");
            report.exhausted = result.exhausted;
            report.finished = skipped == GameError::GameAlreadyFinished;
            break;
        }

        report.draws += 1;
        if let Some(number) = result.number {
            println!("Drawn: {number}");
        }
        if let Some(tier) = result.wins.tier_won {
            let names: Vec<String> = result.wins.winners.iter().map(ToString::to_string).collect();
            match result.wins.per_head_prize {
                Some(amount) => println!(
                    "  {}! {} ({} each)",
                    tier.to_string().to_uppercase(),
                    names.join(", "),
                    format_money(amount)
                ),
                None => println!("  {}! {}", tier.to_string().to_uppercase(), names.join(", ")),
            }
            report.winners.push((tier.to_string(), result.wins.winners));
        }

        report.finished = result.wins.game_finished;
        report.exhausted = result.exhausted;
        if report.finished || report.exhausted {
            break;
        }

        if !config.draw_interval.is_zero() {
            tokio::time::sleep(config.draw_interval).await;
        }
    }

    print_standings(&manager.snapshot(room).await?);
    Ok(report)
}

/// Settings of `requested` that differ from the room as stored.
fn config_drift(stored: &RoomConfig, requested: &RoomConfig) -> Vec<&'static str> {
    let mut drift = Vec::new();
    if stored.with_bank != requested.with_bank {
        drift.push("bank");
    }
    if stored.card_price != requested.card_price {
        drift.push("card price");
    }
    if stored.prize_split != requested.prize_split {
        drift.push("prize split");
    }
    if stored.admin_password != requested.admin_password {
        drift.push("admin password");
    }
    if stored.max_participants != requested.max_participants {
        drift.push("max participants");
    }
    if stored.max_cards_per_participant != requested.max_cards_per_participant {
        drift.push("max cards per participant");
    }
    drift
}

fn print_standings(state: &RoomState) {
    println!(
        "\n{} numbers drawn, {} left",
        state.drawn.len(),
        state.remaining()
    );

    for participant in &state.participants {
        let Some(progress) = state.progress(&participant.name) else {
            continue;
        };
        let best = progress.iter().map(|card| card.total_hits).max().unwrap_or(0);
        let best_row = progress.iter().map(CardProgress::best_row).max().unwrap_or(0);
        println!(
            "{}: best card {best}/{NUMBERS_PER_CARD}, best row {best_row}/{FILLED_PER_ROW}",
            participant.name
        );
    }

    if let Some(pot) = state.pot() {
        let paid: Money = state.winnings.values().sum();
        println!("Pot: {}", format_money(pot));
        for (name, amount) in &state.winnings {
            println!("  {name}: {}", format_money(*amount));
        }
        println!("  kept by the bank: {}", format_money(pot - paid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerSpec;
    use std::time::Duration;

    fn host_config(room: RoomConfig, draws: Option<usize>) -> HostConfig {
        HostConfig {
            room,
            players: vec![
                PlayerSpec {
                    name: "Nonna".to_string(),
                    cards: 2,
                },
                PlayerSpec {
                    name: "Zio".to_string(),
                    cards: 6,
                },
            ],
            data_dir: None,
            draws,
            draw_interval: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_session_plays_to_the_end() {
        let manager = RoomManager::in_memory();
        let config = host_config(RoomConfig::named("natale"), None);
        let report = run(&manager, &config).await.unwrap();

        assert!(report.finished);
        assert_eq!(report.winners.len(), 5);
        assert_eq!(report.winners[4].0, "tombola");

        let state = manager.snapshot("natale").await.unwrap();
        assert_eq!(state.participants.len(), 3);
        assert_eq!(state.drawn.len(), report.draws);
    }

    #[tokio::test]
    async fn test_session_stops_after_draw_limit_and_resumes() {
        let manager = RoomManager::in_memory();
        let config = host_config(RoomConfig::named("natale"), Some(10));

        let first = run(&manager, &config).await.unwrap();
        assert_eq!(first.draws, 10);
        let second = run(&manager, &config).await.unwrap();
        assert_eq!(second.draws, 10);

        let state = manager.snapshot("natale").await.unwrap();
        assert_eq!(state.drawn.len(), 20);
        assert_eq!(state.participants.len(), 3);
    }

    #[tokio::test]
    async fn test_session_without_bank_may_exhaust() {
        let manager = RoomManager::in_memory();
        let room = RoomConfig {
            with_bank: false,
            card_price: Some(100),
            ..RoomConfig::named("soldi")
        };
        let report = run(&manager, &host_config(room, None)).await.unwrap();
        assert!(report.finished || report.exhausted);

        let state = manager.snapshot("soldi").await.unwrap();
        let paid: Money = state.winnings.values().sum();
        assert!(paid <= state.pot().unwrap());
    }

    #[test]
    fn test_config_drift_names_changed_settings() {
        let stored = RoomConfig::named("natale");
        assert!(config_drift(&stored, &stored.clone()).is_empty());

        let requested = RoomConfig {
            with_bank: false,
            card_price: Some(50),
            admin_password: Some("befana".to_string()),
            ..stored.clone()
        };
        assert_eq!(
            config_drift(&stored, &requested),
            vec!["bank", "card price", "admin password"]
        );
    }

    #[tokio::test]
    async fn test_session_resumes_with_stored_settings() {
        let manager = RoomManager::in_memory();
        let first = host_config(RoomConfig::named("natale"), Some(5));
        run(&manager, &first).await.unwrap();

        let changed = RoomConfig {
            card_price: Some(100),
            ..RoomConfig::named("natale")
        };
        let second = run(&manager, &host_config(changed, Some(5))).await.unwrap();
        assert_eq!(second.draws, 5);

        let stored = manager.config("natale").await.unwrap();
        assert_eq!(stored.card_price, None);
        assert!(manager.snapshot("natale").await.unwrap().pot().is_none());
    }
}
