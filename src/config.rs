//! JSON option table for the classification driver.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during config parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("option at position {0} has neither a short nor a long name")]
    NoNameSpecified(usize),

    #[error("invalid short option '{0}': must be a single ASCII letter or digit")]
    InvalidShortOption(char),

    #[error("invalid long option '{0}': must be non-empty and not start with '-'")]
    InvalidLongOption(String),

    #[error("duplicate long option: --{0}")]
    DuplicateLong(String),

    #[error("duplicate short option: -{0}")]
    DuplicateShort(char),
}

/// Whether an option consumes the following token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    /// A plain flag (e.g., --help)
    #[default]
    None,
    /// Takes the next token if it does not look like an option
    Optional,
    /// Like `Optional`, but a missing value is an error
    Required,
}

/// Configuration for a single option.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionConfig {
    /// Long option name without dashes (e.g., "dostuff" for --dostuff)
    pub long: Option<String>,
    /// Short option character (e.g., 'D' for -D)
    pub short: Option<char>,
    /// Value handling for this option
    #[serde(default)]
    pub value: ValueMode,
}

/// Top-level driver configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Reject options not listed in `options`
    #[serde(default)]
    pub strict: bool,
    /// Accept `--name=value` for long options
    #[serde(default)]
    pub split_inline: bool,
    /// Known options
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

impl Config {
    /// Parse a JSON string into a Config.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut longs = HashSet::new();
        let mut shorts = HashSet::new();

        for (idx, opt) in self.options.iter().enumerate() {
            if opt.long.is_none() && opt.short.is_none() {
                return Err(ConfigError::NoNameSpecified(idx));
            }

            if let Some(ref long) = opt.long {
                if long.is_empty() || long.starts_with('-') {
                    return Err(ConfigError::InvalidLongOption(long.clone()));
                }
                if !longs.insert(long.as_str()) {
                    return Err(ConfigError::DuplicateLong(long.clone()));
                }
            }

            if let Some(short) = opt.short {
                if !short.is_ascii_alphanumeric() {
                    return Err(ConfigError::InvalidShortOption(short));
                }
                if !shorts.insert(short) {
                    return Err(ConfigError::DuplicateShort(short));
                }
            }
        }

        Ok(())
    }

    /// Look up an option by its long name.
    pub fn find_long(&self, name: &str) -> Option<&OptionConfig> {
        self.options
            .iter()
            .find(|o| o.long.as_deref() == Some(name))
    }

    /// Look up an option by its short name.
    pub fn find_short(&self, name: char) -> Option<&OptionConfig> {
        self.options.iter().find(|o| o.short == Some(name))
    }
}
