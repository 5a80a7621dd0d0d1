use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_DEALER_DELAY_MS: u64 = 1000;
pub const DEFAULT_STAND_ON: u8 = 17;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    /// Pause between paced dealer draws, in milliseconds
    pub dealer_delay_ms: u64,
    /// The automated player stands once its total reaches this value
    pub stand_on: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub dealer_delay_ms: ValueSource,
    pub stand_on: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            dealer_delay_ms: ValueSource::Default,
            stand_on: ValueSource::Default,
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
            seed: None,
            dealer_delay_ms: DEFAULT_DEALER_DELAY_MS,
            stand_on: DEFAULT_STAND_ON,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `BLACKJACK_CONFIG`, then
/// `BLACKJACK_*` environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("BLACKJACK_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.dealer_delay_ms {
            cfg.dealer_delay_ms = v;
            sources.dealer_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.stand_on {
            cfg.stand_on = v;
            sources.stand_on = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("BLACKJACK_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(delay) = std::env::var("BLACKJACK_DEALER_DELAY_MS")
        && !delay.is_empty()
    {
        cfg.dealer_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid dealer_delay_ms".into()))?;
        sources.dealer_delay_ms = ValueSource::Env;
    }
    if let Ok(stand_on) = std::env::var("BLACKJACK_STAND_ON")
        && !stand_on.is_empty()
    {
        cfg.stand_on = stand_on
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid stand_on".into()))?;
        sources.stand_on = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    dealer_delay_ms: Option<u64>,
    #[serde(default)]
    stand_on: Option<u8>,
}

pub fn validate_stand_on(stand_on: u8) -> Result<(), ConfigError> {
    if !(4..=21).contains(&stand_on) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: stand_on must be within 4..=21 (got {})",
            stand_on
        )));
    }
    Ok(())
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    validate_stand_on(cfg.stand_on)?;
    // an hour per card is certainly a typo
    if cfg.dealer_delay_ms > 60_000 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: dealer_delay_ms must be <= 60000".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BLACKJACK_CONFIG",
            "BLACKJACK_SEED",
            "BLACKJACK_DEALER_DELAY_MS",
            "BLACKJACK_STAND_ON",
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_set() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert!(matches!(resolved.sources.stand_on, ValueSource::Default));
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blackjack.toml");
        std::fs::write(&path, "seed = 5\nstand_on = 15\ndealer_delay_ms = 250\n").unwrap();
        unsafe {
            std::env::set_var("BLACKJACK_CONFIG", &path);
            std::env::set_var("BLACKJACK_SEED", "99");
        }
        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.seed, Some(99));
        assert!(matches!(resolved.sources.seed, ValueSource::Env));
        assert_eq!(resolved.config.stand_on, 15);
        assert!(matches!(resolved.sources.stand_on, ValueSource::File));
        assert_eq!(resolved.config.dealer_delay_ms, 250);
    }

    #[test]
    #[serial]
    fn rejects_out_of_range_stand_on() {
        clear_env();
        unsafe {
            std::env::set_var("BLACKJACK_STAND_ON", "22");
        }
        let err = load().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("stand_on"));
    }

    #[test]
    #[serial]
    fn rejects_unparseable_env() {
        clear_env();
        unsafe {
            std::env::set_var("BLACKJACK_DEALER_DELAY_MS", "soon");
        }
        let err = load().unwrap_err();
        clear_env();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
