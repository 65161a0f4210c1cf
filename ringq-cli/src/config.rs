use anyhow::Context;
use ringq_proc_macros::{EnumDisplay, EnumFromStr, StrDeserialize, StrSerialize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What a session does when a command fails.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumDisplay,
    EnumFromStr,
    StrSerialize,
    StrDeserialize,
)]
pub enum ErrorPolicy {
    /// Stop at the first failing command and report it.
    #[default]
    Abort,
    /// Print the error alongside the regular output and move on to the next command.
    Continue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub initial_capacity: isize,

    #[serde(default)]
    pub on_error: ErrorPolicy,

    #[serde(default)]
    pub echo_commands: bool,
}

impl SessionConfig {
    /// # Errors
    ///
    /// Returns an error if `config_str` is not valid TOML for this config.
    pub fn from_toml_str(config_str: &str) -> Result<Self, anyhow::Error> {
        toml::from_str(config_str).context("error parsing session config from TOML")
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_toml_file<P>(path: P) -> Result<Self, anyhow::Error>
    where
        P: AsRef<Path> + std::fmt::Debug,
    {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("error reading TOML config file from '{path:?}'"))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("error loading session config from '{path:?}'"))?;

        log::info!("Loaded session config from '{}'", path.as_ref().display());

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized.
    pub fn to_toml(&self) -> Result<String, anyhow::Error> {
        toml::to_string_pretty(self).context("error serializing session config into TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();

        assert_eq!(SessionConfig::default(), config);
        assert_eq!(0, config.initial_capacity);
        assert_eq!(ErrorPolicy::Abort, config.on_error);
        assert!(!config.echo_commands);
    }

    #[test]
    fn parse() {
        let config = SessionConfig::from_toml_str(
            r#"
            initial_capacity = 16
            on_error = "Continue"
            echo_commands = true
            "#,
        )
        .unwrap();

        assert_eq!(
            SessionConfig {
                initial_capacity: 16,
                on_error: ErrorPolicy::Continue,
                echo_commands: true,
            },
            config
        );
    }

    #[test]
    fn invalid_policy() {
        let err = SessionConfig::from_toml_str(r#"on_error = "retry""#).unwrap_err();

        assert!(format!("{err:#}").contains("invalid error-policy string: 'retry'"));
    }

    #[test]
    fn round_trip() {
        let config = SessionConfig {
            initial_capacity: -3,
            on_error: ErrorPolicy::Continue,
            echo_commands: false,
        };

        let serialized = config.to_toml().unwrap();
        assert!(serialized.contains(r#"on_error = "continue""#));
        assert_eq!(config, SessionConfig::from_toml_str(&serialized).unwrap());
    }
}
