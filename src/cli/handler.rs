// Wed Jan 15 2026 - Alex

use super::args::{Args, Command, ConfigArgs, RunArgs};
use crate::config::Config;
use crate::sim::SimulationRunner;
use crate::utils::{format_duration, measure_time, LoggingUtils};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

pub struct CommandHandler {
    quiet: bool,
    json_output: bool,
    log_level: String,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            quiet: false,
            json_output: false,
            log_level: "info".to_string(),
        }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        if args.no_color {
            colored::control::set_override(false);
        }
        self.quiet = args.quiet;
        self.json_output = args.json_output;
        self.log_level = args.log_level;

        match args.command {
            Command::Run(run_args) => self.handle_run(run_args),
            Command::Config(config_args) => self.handle_config(config_args),
        }
    }

    fn setup_logging(&self, debug: bool) {
        let level = LoggingUtils::effective_level(&self.log_level, debug, self.quiet || self.json_output);
        LoggingUtils::init(level);
    }

    fn handle_run(&self, args: RunArgs) -> anyhow::Result<()> {
        let config = args.resolve()?;
        self.setup_logging(config.debug);

        let mut runner = SimulationRunner::new(config.clone());
        let requests = runner.requests().len();

        let show_progress = !(args.no_progress || self.quiet || self.json_output || config.debug);
        if show_progress {
            let bar = ProgressBar::new(requests as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            bar.set_message("requests");
            runner = runner.with_progress(bar);
        }

        if !self.quiet && !self.json_output {
            println!(
                "{} Running {} variant with {} requests",
                "[*]".blue(),
                config.variant,
                requests
            );
        }

        let (report, elapsed) = measure_time(|| runner.run());
        let report = report?;
        log::debug!("Simulation wall time {}", format_duration(elapsed));

        if self.json_output {
            println!("{}", report.to_json()?);
        } else if !self.quiet {
            println!();
            println!("{}", report);
            println!("{} All disk requests completed.", "[+]".green());
        }

        if !report.is_complete() {
            anyhow::bail!("simulation finished with unaccounted requests");
        }
        Ok(())
    }

    fn handle_config(&self, args: ConfigArgs) -> anyhow::Result<()> {
        let config: Config = args.run.resolve()?;
        self.setup_logging(config.debug);

        match &args.output {
            Some(path) => {
                config.save(path)?;
                if !self.quiet {
                    println!("{} Configuration written to {}", "[+]".green(), path.display());
                }
            }
            None => println!("{}", serde_json::to_string_pretty(&config)?),
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
