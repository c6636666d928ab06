//! Command-line host for a Tombola room.
//!
//! Opens (or resumes) a room, seats the players given on the command line
//! and draws until someone makes tombola or the draw limit is reached.

mod config;
mod session;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Error, anyhow, bail};
use config::{HostConfig, HostOverrides};
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use tombola::{FileRoomStore, MemoryRoomStore, RoomManager, RoomStore};

const HELP: &str = "\
Host a Tombola room

USAGE:
  tb_host [OPTIONS]

OPTIONS:
  --room         NAME        Room to open or resume  [default: env TOMBOLA_ROOM or Tombola]
  --player       NAME:CARDS  Seat a player with 1-6 cards; repeat for more players
  --card-price   CENTS       Sell cards and pay prizes from the pot  [default: env TOMBOLA_CARD_PRICE]
  --password     PW          Admin password for drawing  [default: env TOMBOLA_ADMIN_PASSWORD]
  --draws        N           Stop after N draws  [default: play to the end]
  --interval-ms  MS          Pause between draws  [default: env TOMBOLA_DRAW_INTERVAL_MS or 1000]
  --data-dir     DIR         Keep rooms as JSON files in DIR  [default: env TOMBOLA_DATA_DIR or in memory]

FLAGS:
  --no-bank                  The bank does not play a full board
  --json                     Print the final room state as JSON
  -h, --help                 Print help information

ENVIRONMENT:
  TOMBOLA_MAX_PARTICIPANTS   Seats per room, bank included [default: 20]
  RUST_LOG                   Log filter (e.g., info, tombola=debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = HostOverrides {
        room: pargs.opt_value_from_str("--room")?,
        players: pargs.values_from_str("--player")?,
        no_bank: pargs.contains("--no-bank"),
        card_price: pargs.opt_value_from_str("--card-price")?,
        password: pargs.opt_value_from_str("--password")?,
        draws: pargs.opt_value_from_str("--draws")?,
        interval_ms: pargs.opt_value_from_str("--interval-ms")?,
        data_dir: pargs.opt_value_from_str::<_, PathBuf>("--data-dir")?,
    };
    let print_json = pargs.contains("--json");

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {remaining:?}");
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = HostConfig::from_env(overrides)?;
    config.validate()?;
    let room = config.room.name.clone();

    let store: Arc<dyn RoomStore> = match &config.data_dir {
        Some(dir) => {
            info!("Keeping rooms in {}", dir.display());
            Arc::new(FileRoomStore::open(dir.clone()).await?)
        }
        None => Arc::new(MemoryRoomStore::new()),
    };
    let manager = RoomManager::new(store);

    info!("Hosting room {room}");
    let report = session::run(&manager, &config)
        .await
        .map_err(|e| anyhow!("Room {room} failed: {e}"))?;

    info!(
        "Session over after {} draw(s), {} tier(s) won{}",
        report.draws,
        report.winners.len(),
        if report.finished {
            ", game finished"
        } else if report.exhausted {
            ", every number drawn"
        } else {
            ""
        }
    );

    if print_json {
        let state = manager.snapshot(&room).await?;
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    Ok(())
}
