// Tue Jan 13 2026 - Alex

pub mod logging;

pub use logging::LoggingUtils;

use std::time::{Duration, Instant};

pub fn measure_time<T>(run: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let value = run();
    (value, started.elapsed())
}

pub fn format_duration(duration: Duration) -> String {
    match duration.as_millis() {
        0 => format!("{}µs", duration.as_micros()),
        ms @ 1..=999 => format!("{}ms", ms),
        ms @ 1000..=59_999 => format!("{:.2}s", ms as f64 / 1000.0),
        ms => format!("{}m {:.1}s", ms / 60_000, (ms % 60_000) as f64 / 1000.0),
    }
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
