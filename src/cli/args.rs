// Wed Jan 15 2026 - Alex

use crate::config::{Config, Variant};
use crate::sim::request::parse_requests;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cscan-disk")]
#[command(author = "Alex")]
#[command(version = "0.1.0")]
#[command(about = "C-SCAN disk head scheduler built on monitors", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(long, global = true)]
    pub json_output: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulation with one thread per request.
    Run(RunArgs),
    /// Print or save the effective configuration.
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub variant: Option<Variant>,

    /// Comma separated cylinders, e.g. "55,58,39".
    #[arg(short, long, allow_hyphen_values = true)]
    pub requests: Option<String>,

    #[arg(long)]
    pub max_cylinder: Option<u16>,

    #[arg(long)]
    pub arrival_max_ms: Option<u64>,

    #[arg(long)]
    pub service_min_ms: Option<u64>,

    #[arg(long)]
    pub service_max_ms: Option<u64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Show every admission, grant and handoff.
    #[arg(short, long)]
    pub debug: bool,

    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub run: RunArgs,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    /// File values first, then command-line overrides.
    pub fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(requests) = &self.requests {
            config.requests = parse_requests(requests)?;
        }
        if let Some(max_cylinder) = self.max_cylinder {
            config.max_cylinder = max_cylinder;
        }
        if let Some(ms) = self.arrival_max_ms {
            config.arrival_max_ms = ms;
        }
        if let Some(ms) = self.service_min_ms {
            config.service_min_ms = ms;
        }
        if let Some(ms) = self.service_max_ms {
            config.service_max_ms = ms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.debug {
            config.debug = true;
        }

        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }
}
