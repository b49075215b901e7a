use anyhow::Context;
use blindrun_core::{BlindRule, GameConfig, RoundRules};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const ROUND_FILE: &str = "round.json";
pub const BLINDS_FILE: &str = "blinds.json";

/// Loads `round.json` and `blinds.json` from `dir`. A missing `round.json`
/// falls back to the default round rules.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let round_path = dir.join(ROUND_FILE);
    let round: RoundRules = if round_path.exists() {
        read_json(&round_path)?
    } else {
        debug!("{} not found, using default round rules", round_path.display());
        RoundRules::default()
    };
    let blinds: Vec<BlindRule> = read_json(&dir.join(BLINDS_FILE))?;

    let config = GameConfig { round, blinds };
    config
        .validate()
        .with_context(|| format!("validate config in {}", dir.display()))?;
    Ok(config)
}

/// Like [`load_game_config`], but a missing directory yields the built-in defaults.
pub fn load_game_config_or_default(dir: &Path) -> anyhow::Result<GameConfig> {
    if !dir.is_dir() {
        warn!("assets directory {} not found, using defaults", dir.display());
        return Ok(GameConfig::default());
    }
    load_game_config(dir)
}

pub fn parse_game_config(raw: &str) -> anyhow::Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(raw).context("parse game config")?;
    config.validate().context("validate game config")?;
    Ok(config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse {}", path.display()))
}
