// Tue Jan 13 2026 - Alex

use log::LevelFilter;
use std::time::Instant;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs `env_logger` at `level`. `RUST_LOG` still refines per-module filters.
    pub fn init(level: LevelFilter) {
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp(None)
            .format_target(false)
            .try_init()
            .ok();
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    pub fn effective_level(requested: &str, debug: bool, quiet: bool) -> LevelFilter {
        let level = Self::level_from_str(requested);
        if debug {
            level.max(LevelFilter::Debug)
        } else if quiet {
            level.min(LevelFilter::Warn)
        } else {
            level
        }
    }
}

pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!("[TIMER] {} took {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("WARNING"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str("trace"), LevelFilter::Trace);
        assert_eq!(LoggingUtils::level_from_str("bogus"), LevelFilter::Info);
    }

    #[test]
    fn test_effective_level() {
        assert_eq!(LoggingUtils::effective_level("info", true, false), LevelFilter::Debug);
        assert_eq!(LoggingUtils::effective_level("trace", true, false), LevelFilter::Trace);
        assert_eq!(LoggingUtils::effective_level("info", false, true), LevelFilter::Warn);
        assert_eq!(LoggingUtils::effective_level("error", false, false), LevelFilter::Error);
    }
}
