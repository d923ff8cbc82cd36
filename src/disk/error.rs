// Tue Jan 13 2026 - Alex

use super::cylinder::RequesterId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiskError {
    #[error("Invalid cylinder {cylinder} requested by {requester}: must be between 0 and {max}")]
    InvalidCylinder {
        cylinder: i64,
        requester: RequesterId,
        max: u16,
    },
}

impl DiskError {
    pub fn cylinder(&self) -> i64 {
        match self {
            DiskError::InvalidCylinder { cylinder, .. } => *cylinder,
        }
    }

    pub fn requester(&self) -> RequesterId {
        match self {
            DiskError::InvalidCylinder { requester, .. } => *requester,
        }
    }
}

pub type DiskResult<T> = Result<T, DiskError>;
