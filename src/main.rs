use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use live_scoreboard::config::Config;
use live_scoreboard::feed::{start_feed_monitor, ScoreFeed, SimulatedFeed, SimulationSettings};
use live_scoreboard::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let fixtures = config.load_fixtures()?;
    info!("Loaded {} fixture(s)", fixtures.len());

    let feeds: Vec<Arc<dyn ScoreFeed>> = vec![Arc::new(SimulatedFeed::new(
        fixtures,
        SimulationSettings {
            seed: config.seed,
            goal_probability: config.goal_probability,
            match_length: config.match_length,
        },
    ))];
    let mut rx = start_feed_monitor(feeds, Duration::from_millis(config.poll_interval_ms));

    // The session is owned by this task only; the feed monitor talks to it
    // through the channel.
    let mut session = Session::in_memory();
    let mut report_interval =
        tokio::time::interval(Duration::from_secs(config.report_interval_secs));
    report_interval.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => {
                    if let Err(e) = session.apply(event) {
                        warn!("Ignoring feed event: {}", e);
                    }
                }
                None => {
                    info!("Feed finished");
                    break;
                }
            },
            _ = report_interval.tick() => {
                report(&session, config.json)?;
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    report(&session, config.json)?;
    info!(
        "{} game(s) tracked, {} still in progress",
        session.scoreboard().len(),
        session.scoreboard().summaries().len()
    );

    Ok(())
}

fn report(session: &Session, json: bool) -> Result<()> {
    let scoreboard = session.scoreboard();
    if json {
        println!("{}", serde_json::to_string_pretty(&scoreboard.json_summaries())?);
        return Ok(());
    }

    println!("── Scoreboard ──");
    let lines = scoreboard.text_summaries();
    if lines.is_empty() {
        println!("  (no games in progress)");
    }
    for (rank, line) in lines.iter().enumerate() {
        println!("{:>3}. {}", rank + 1, line);
    }
    Ok(())
}
