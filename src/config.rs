use log::warn;
use once_cell::sync::Lazy;
use std::env;

use crate::vm::VMError;
use crate::word::OutputFormat;

/// Environment variable holding the memory ceiling in bytes
pub const MEMORY_LIMIT_VAR: &str = "COVM_MEMORY_LIMIT";

/// Environment variable selecting how words are printed
pub const OUTPUT_FORMAT_VAR: &str = "COVM_OUTPUT_FORMAT";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Largest memory size a context may grow to; unlimited when `None`
    pub memory_limit: Option<usize>,
    pub output_format: OutputFormat,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, VMError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VMError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let memory_limit = match lookup(MEMORY_LIMIT_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                let limit = raw.trim().parse::<usize>().map_err(|_| {
                    VMError::Config(format!(
                        "{} must be a byte count, got '{}'",
                        MEMORY_LIMIT_VAR, raw
                    ))
                })?;
                Some(limit)
            }
            _ => None,
        };

        let output_format = match lookup(OUTPUT_FORMAT_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => OutputFormat::default(),
        };

        Ok(Config {
            memory_limit,
            output_format,
        })
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env().unwrap_or_else(|err| {
        warn!("{}; falling back to defaults", err);
        Config::default()
    })
});

pub fn init() {
    Lazy::force(&CONFIG);
}
