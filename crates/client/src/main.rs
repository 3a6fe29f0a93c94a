//! Headless chapter client.
//!
//! Plays a command script (a file named by `CHAPTER_SCRIPT`, or stdin)
//! against the bundled chapter content. Game events and directives are
//! printed to stdout as JSON lines; logs go to stderr.
//!
//! ```bash
//! CHAPTER_SCRIPT=data/scripts/playthrough.txt cargo run -p chapter-client
//! ```

mod config;
mod logging;
mod player;
mod script;

use anyhow::Result;
use runtime::{Event, Topic};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};

use config::ClientConfig;
use player::Player;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Data directory: {}", config.data_dir.display());
    let mut player = Player::new(&config)?;

    let printers: Vec<_> = player
        .session()
        .events()
        .subscribe_multiple(&Topic::ALL)
        .into_values()
        .map(|rx| tokio::spawn(print_events(rx)))
        .collect();

    match &config.script {
        Some(path) => {
            let script = tokio::fs::read_to_string(path).await?;
            for (number, line) in script.lines().enumerate() {
                play_line(&mut player, number + 1, line)?;
            }
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut number = 0;
            while let Some(line) = lines.next_line().await? {
                number += 1;
                // Interactive typos are reported and skipped.
                if let Err(e) = play_line(&mut player, number, &line) {
                    tracing::warn!("{e:#}");
                }
            }
        }
    }

    // Dropping the session closes the bus so printers drain and exit.
    drop(player);
    for printer in printers {
        printer.await?;
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}

fn play_line(player: &mut Player, number: usize, line: &str) -> Result<()> {
    let parsed = script::parse_line(line)
        .map_err(|e| e.context(format!("line {number}: '{}'", line.trim())))?;
    match parsed {
        Some(command) => player.run(command),
        None => Ok(()),
    }
}

async fn print_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!("Failed to encode event: {e}"),
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event printer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
