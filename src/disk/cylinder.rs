// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_CYLINDER: u16 = 199;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Cylinder(u16);

impl Cylinder {
    /// Validates a raw cylinder number against `[0, max]`.
    pub fn checked(raw: i64, max: u16) -> Option<Self> {
        if (0..=i64::from(max)).contains(&raw) {
            Some(Self(raw as u16))
        } else {
            None
        }
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Cylinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequesterId(u32);

impl RequesterId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Unstarted,
    Idle,
    At(Cylinder),
}

impl Position {
    pub fn cylinder(self) -> Option<Cylinder> {
        match self {
            Position::At(cylinder) => Some(cylinder),
            Position::Unstarted | Position::Idle => None,
        }
    }

    pub fn is_free(self) -> bool {
        !matches!(self, Position::At(_))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Unstarted => write!(f, "unstarted"),
            Position::Idle => write!(f, "idle"),
            Position::At(cylinder) => write!(f, "cylinder {}", cylinder),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Current,
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Current => write!(f, "current"),
            Direction::Next => write!(f, "next"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_bounds() {
        assert_eq!(Cylinder::checked(0, MAX_CYLINDER).map(Cylinder::value), Some(0));
        assert_eq!(Cylinder::checked(199, MAX_CYLINDER).map(Cylinder::value), Some(199));
        assert!(Cylinder::checked(-1, MAX_CYLINDER).is_none());
        assert!(Cylinder::checked(200, MAX_CYLINDER).is_none());
        assert!(Cylinder::checked(9999, MAX_CYLINDER).is_none());
        assert!(Cylinder::checked(50, 49).is_none());
    }

    #[test]
    fn test_position_helpers() {
        let at = Position::At(Cylinder::checked(42, MAX_CYLINDER).unwrap());
        assert_eq!(at.cylinder().map(Cylinder::value), Some(42));
        assert!(!at.is_free());
        assert!(Position::Idle.is_free());
        assert!(Position::Unstarted.is_free());
        assert_eq!(Position::default(), Position::Unstarted);
        assert_eq!(at.to_string(), "cylinder 42");
    }

    #[test]
    fn test_position_serializes_snake_case() {
        let json = serde_json::to_string(&Position::Idle).unwrap();
        assert_eq!(json, "\"idle\"");
        let at = Position::At(Cylinder::checked(7, MAX_CYLINDER).unwrap());
        assert_eq!(serde_json::to_string(&at).unwrap(), "{\"at\":7}");
    }
}
