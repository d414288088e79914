use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use crate::models::Fixture;

/// Fixtures played when no fixtures file is given.
const DEFAULT_FIXTURES: &[(&str, &str)] = &[
    ("Mexico", "Canada"),
    ("Spain", "Brazil"),
    ("Germany", "France"),
    ("Uruguay", "Italy"),
    ("Argentina", "Australia"),
];

/// In-memory live scoreboard driven by a simulated score feed
#[derive(Parser, Debug, Clone)]
#[command(name = "live-scoreboard", version, about)]
pub struct Config {
    /// JSON file with an array of `{"home": ..., "away": ...}` fixtures
    #[arg(long, env = "FIXTURES_PATH")]
    pub fixtures: Option<PathBuf>,

    /// Seed for the simulated feed
    #[arg(long, env = "FEED_SEED", default_value = "42")]
    pub seed: u64,

    /// Feed polling interval in milliseconds
    #[arg(long, env = "POLL_INTERVAL_MS", default_value = "500")]
    pub poll_interval_ms: u64,

    /// Seconds between printed summaries
    #[arg(long, env = "REPORT_INTERVAL_SECS", default_value = "2")]
    pub report_interval_secs: u64,

    /// Chance (0.0–1.0) that a live game scores on a given poll
    #[arg(long, env = "GOAL_PROBABILITY", default_value = "0.15")]
    pub goal_probability: f64,

    /// Polls a game stays live before full time
    #[arg(long, env = "MATCH_LENGTH", default_value = "20")]
    pub match_length: u32,

    /// Print summaries as JSON instead of text lines
    #[arg(long, env = "JSON_OUTPUT", default_value = "false")]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms must be positive");
        }
        if self.report_interval_secs == 0 {
            anyhow::bail!("report_interval_secs must be positive");
        }
        if !(0.0..=1.0).contains(&self.goal_probability) {
            anyhow::bail!("goal_probability must be between 0.0 and 1.0");
        }
        if self.match_length == 0 {
            anyhow::bail!("match_length must be positive");
        }
        Ok(())
    }

    /// Fixtures from `--fixtures`, or the built-in list.
    pub fn load_fixtures(&self) -> anyhow::Result<Vec<Fixture>> {
        let Some(path) = &self.fixtures else {
            return Ok(DEFAULT_FIXTURES
                .iter()
                .map(|(home, away)| Fixture {
                    home: home.to_string(),
                    away: away.to_string(),
                })
                .collect());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures file {}", path.display()))?;
        let fixtures: Vec<Fixture> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixtures file {}", path.display()))?;
        if fixtures.is_empty() {
            anyhow::bail!("fixtures file {} contains no fixtures", path.display());
        }
        Ok(fixtures)
    }
}
