// Wed Jan 15 2026 - Alex

use crate::config::Variant;
use crate::disk::RequesterId;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

pub const SIMPLE_PRESET: &[i64] = &[55, 58, 39, 18, 90, 160, 150, 38, 184];

/// Includes out-of-range cylinders to exercise rejection.
pub const NESTED_PRESET: &[i64] = &[50, 10, 170, 3, 75, 90, 8, 110, 9999, 420, 150, 30, 180, 200];

pub const DRIVER_PRESET: &[i64] = &[98, 183, 37, 122, 14, 124, 65, 67];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestParseError {
    #[error("Empty request list")]
    Empty,
    #[error("Invalid cylinder entry '{0}'")]
    InvalidEntry(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskRequest {
    pub requester: RequesterId,
    pub cylinder: i64,
    pub arrival: Duration,
}

pub fn preset(variant: Variant) -> Vec<i64> {
    match variant {
        Variant::Simple => SIMPLE_PRESET.to_vec(),
        Variant::Nested => NESTED_PRESET.to_vec(),
        Variant::Driver => DRIVER_PRESET.to_vec(),
    }
}

/// Parses a comma or whitespace separated list such as `"55, 58 -3"`.
pub fn parse_requests(input: &str) -> Result<Vec<i64>, RequestParseError> {
    let requests = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<i64>()
                .map_err(|_| RequestParseError::InvalidEntry(entry.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if requests.is_empty() {
        return Err(RequestParseError::Empty);
    }
    Ok(requests)
}

/// Numbers requesters from 1 and draws an arrival delay in `[0, arrival_max_ms]` for each.
pub fn plan<R: Rng>(cylinders: &[i64], arrival_max_ms: u64, rng: &mut R) -> Vec<DiskRequest> {
    cylinders
        .iter()
        .enumerate()
        .map(|(index, cylinder)| DiskRequest {
            requester: RequesterId::new(index as u32 + 1),
            cylinder: *cylinder,
            arrival: Duration::from_millis(if arrival_max_ms == 0 {
                0
            } else {
                rng.random_range(0..=arrival_max_ms)
            }),
        })
        .collect()
}
