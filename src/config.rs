use crate::catalog::DuplicatePolicy;
use crate::utils::funcs::parse_flag;
use std::env;
use std::path::PathBuf;

/// Service configuration read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to, e.g. `127.0.0.1:5001`.
    pub bind_address: String,
    /// CSV or workbook with `product` and `total_plastic_waste` columns.
    pub catalog_path: PathBuf,
    /// Model artifact written by `train_model`.
    pub model_path: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
    /// Attach the classifier's prediction to tiered advisories.
    pub consult_model: bool,
    pub workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5001".into(),
            catalog_path: "plastic_data.csv".into(),
            model_path: "ai_model.bin".into(),
            duplicate_policy: DuplicatePolicy::default(),
            consult_model: false,
            workers: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let duplicate_policy = match lookup("CATALOG_DUPLICATES") {
            Some(raw) => raw
                .parse()
                .map_err(|detail| ConfigError::Invalid("CATALOG_DUPLICATES", detail))?,
            None => defaults.duplicate_policy,
        };

        let consult_model = match lookup("CONSULT_MODEL") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::Invalid("CONSULT_MODEL", format!("'{raw}' is not a boolean"))
            })?,
            None => defaults.consult_model,
        };

        let workers = match lookup("HTTP_WORKERS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(ConfigError::Invalid(
                        "HTTP_WORKERS",
                        format!("'{raw}' is not a positive integer"),
                    ));
                }
            },
            None => defaults.workers,
        };

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            catalog_path: lookup("PLASTIC_DATA_PATH").map_or(defaults.catalog_path, PathBuf::from),
            model_path: lookup("MODEL_PATH").map_or(defaults.model_path, PathBuf::from),
            duplicate_policy,
            consult_model,
            workers,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}
