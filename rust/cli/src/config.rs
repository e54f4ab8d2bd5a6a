use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use blackjack_engine::rules::{MAX_HANDS, STARTING_BANKROLL};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub bankroll: u64,
    pub bet: u64,
    pub seats: usize,
    pub seed: Option<u64>,
    pub dealer_delay_ms: u64,
    pub strategy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub bankroll: ValueSource,
    pub bet: ValueSource,
    pub seats: ValueSource,
    pub seed: ValueSource,
    pub dealer_delay_ms: ValueSource,
    pub strategy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            bankroll: ValueSource::Default,
            bet: ValueSource::Default,
            seats: ValueSource::Default,
            seed: ValueSource::Default,
            dealer_delay_ms: ValueSource::Default,
            strategy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bankroll: STARTING_BANKROLL,
            bet: 10,
            seats: 1,
            seed: None,
            dealer_delay_ms: 400,
            strategy: "basic".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    pub bet: Option<u64>,
    pub seats: Option<usize>,
    pub seed: Option<u64>,
    pub strategy: Option<String>,
    pub dealer_delay_ms: Option<u64>,
}

impl ConfigResolved {
    pub fn apply_flags(mut self, flags: &FlagOverrides) -> Result<Self, ConfigError> {
        if let Some(v) = flags.bet {
            self.config.bet = v;
            self.sources.bet = ValueSource::Flag;
        }
        if let Some(v) = flags.seats {
            self.config.seats = v;
            self.sources.seats = ValueSource::Flag;
        }
        if let Some(v) = flags.seed {
            self.config.seed = Some(v);
            self.sources.seed = ValueSource::Flag;
        }
        if let Some(v) = &flags.strategy {
            self.config.strategy = v.clone();
            self.sources.strategy = ValueSource::Flag;
        }
        if let Some(v) = flags.dealer_delay_ms {
            self.config.dealer_delay_ms = v;
            self.sources.dealer_delay_ms = ValueSource::Flag;
        }
        validate(&self.config)?;
        Ok(self)
    }
}

/// Resolves defaults, then the TOML file named by `BLACKJACK_CONFIG`, then
/// the `BLACKJACK_*` environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("BLACKJACK_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.bankroll {
            cfg.bankroll = v;
            sources.bankroll = ValueSource::File;
        }
        if let Some(v) = f.bet {
            cfg.bet = v;
            sources.bet = ValueSource::File;
        }
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.dealer_delay_ms {
            cfg.dealer_delay_ms = v;
            sources.dealer_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.strategy {
            cfg.strategy = v;
            sources.strategy = ValueSource::File;
        }
    }

    if let Some(v) = env_number("BLACKJACK_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_number("BLACKJACK_BET", "bet")? {
        cfg.bet = v;
        sources.bet = ValueSource::Env;
    }
    if let Some(v) = env_number("BLACKJACK_SEATS", "seats")? {
        cfg.seats = v;
        sources.seats = ValueSource::Env;
    }
    if let Some(v) = env_number("BLACKJACK_BANKROLL", "bankroll")? {
        cfg.bankroll = v;
        sources.bankroll = ValueSource::Env;
    }
    if let Some(v) = env_number("BLACKJACK_DEALER_DELAY_MS", "dealer_delay_ms")? {
        cfg.dealer_delay_ms = v;
        sources.dealer_delay_ms = ValueSource::Env;
    }
    if let Ok(name) = std::env::var("BLACKJACK_STRATEGY")
        && !name.is_empty()
    {
        cfg.strategy = name;
        sources.strategy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// File and environment first, then the command-line flags on top.
pub fn resolve(flags: &FlagOverrides) -> Result<ConfigResolved, ConfigError> {
    load_with_sources()?.apply_flags(flags)
}

fn env_number<T: std::str::FromStr>(var: &str, field: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", field, raw))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    bankroll: Option<u64>,
    #[serde(default)]
    bet: Option<u64>,
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    dealer_delay_ms: Option<u64>,
    #[serde(default)]
    strategy: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.bet == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bet must be >0".into(),
        ));
    }
    if cfg.seats == 0 || cfg.seats > MAX_HANDS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: seats must be between 1 and {}",
            MAX_HANDS
        )));
    }
    if cfg.bankroll == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bankroll must be >0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let zero_bet = Config {
            bet: 0,
            ..Config::default()
        };
        assert!(validate(&zero_bet).is_err());

        let five_seats = Config {
            seats: 5,
            ..Config::default()
        };
        let msg = validate(&five_seats).unwrap_err().to_string();
        assert!(msg.contains("seats"), "{}", msg);
    }

    #[test]
    fn flags_override_and_are_validated() {
        let resolved = ConfigResolved {
            config: Config::default(),
            sources: ConfigSources::default(),
        };
        let flags = FlagOverrides {
            seats: Some(3),
            ..FlagOverrides::default()
        };
        let out = resolved.clone().apply_flags(&flags).unwrap();
        assert_eq!(out.config.seats, 3);
        assert_eq!(out.sources.seats, ValueSource::Flag);
        assert_eq!(out.sources.bet, ValueSource::Default);

        let bad = FlagOverrides {
            bet: Some(0),
            ..FlagOverrides::default()
        };
        assert!(resolved.apply_flags(&bad).is_err());
    }
}
