// Wed Jan 15 2026 - Alex

use crate::config::Variant;
use crate::disk::{Position, RequesterId, ScanStats, TransferRecord};
use crate::utils::{format_duration, pluralize};
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub requester: RequesterId,
    pub cylinder: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub variant: Variant,
    pub requested: usize,
    pub served: Vec<TransferRecord>,
    pub rejected: Vec<Rejection>,
    pub stats: ScanStats,
    pub final_position: Position,
    pub elapsed_ms: u64,
}

impl SimulationReport {
    pub fn service_order(&self) -> Vec<u16> {
        self.served.iter().map(|r| r.cylinder.value()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.served.len() + self.rejected.len() == self.requested
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", format!("C-SCAN simulation ({} variant)", self.variant).cyan().bold())?;
        writeln!(f, "{}", "-".repeat(40).cyan())?;

        writeln!(
            f,
            "  Served:   {}",
            pluralize(self.served.len(), "request", "requests").green()
        )?;
        if !self.served.is_empty() {
            writeln!(
                f,
                "  Order:    {}",
                self.served.iter().map(|r| r.cylinder.to_string()).join(" -> ")
            )?;
        }

        if !self.rejected.is_empty() {
            writeln!(
                f,
                "  Rejected: {}",
                pluralize(self.rejected.len(), "request", "requests").red()
            )?;
            for rejection in &self.rejected {
                writeln!(f, "    {} {}", "[!]".red(), rejection.reason)?;
            }
        }

        writeln!(
            f,
            "  Scan:     {} immediate, {} queued, {}",
            self.stats.immediate,
            self.stats.queued,
            pluralize(self.stats.swaps as usize, "direction swap", "direction swaps")
        )?;
        writeln!(f, "  Head:     {}", self.final_position)?;
        write!(f, "  Elapsed:  {}", format_duration(self.elapsed()))
    }
}
