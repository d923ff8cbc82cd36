// Tue Jan 13 2026 - Alex

use crate::disk::{ServiceTime, MAX_CYLINDER};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Simple,
    Nested,
    Driver,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Simple => write!(f, "simple"),
            Variant::Nested => write!(f, "nested"),
            Variant::Driver => write!(f, "driver"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_cylinder: u16,
    pub variant: Variant,
    /// Empty means the preset list for the variant.
    pub requests: Vec<i64>,
    pub arrival_max_ms: u64,
    pub service_min_ms: u64,
    pub service_max_ms: u64,
    pub seed: Option<u64>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cylinder: MAX_CYLINDER,
            variant: Variant::Simple,
            requests: Vec::new(),
            arrival_max_ms: 1000,
            service_min_ms: 300,
            service_max_ms: 500,
            seed: None,
            debug: false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_requests(mut self, requests: Vec<i64>) -> Self {
        self.requests = requests;
        self
    }

    pub fn with_max_cylinder(mut self, max_cylinder: u16) -> Self {
        self.max_cylinder = max_cylinder;
        self
    }

    pub fn with_arrival_max_ms(mut self, ms: u64) -> Self {
        self.arrival_max_ms = ms;
        self
    }

    pub fn with_service_time(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.service_min_ms = min_ms;
        self.service_max_ms = max_ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn instant(self) -> Self {
        self.with_arrival_max_ms(0).with_service_time(0, 0)
    }

    pub fn service_time(&self) -> ServiceTime {
        ServiceTime::new(self.service_min_ms, self.service_max_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.service_min_ms > self.service_max_ms {
            return Err("service_min_ms must not exceed service_max_ms".to_string());
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate().map_err(ConfigError::Validation)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, contents)?;
        Ok(())
    }
}
