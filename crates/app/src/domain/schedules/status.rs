//! Schedule Status

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::transitions::Lifecycle;

/// Lifecycle of a schedule. Only [`ScheduleStatus::Open`] accepts orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScheduleStatus {
    #[default]
    Draft,
    Announced,
    Open,
    Closed,
    Fulfilled,
}

impl ScheduleStatus {
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Announced,
        Self::Open,
        Self::Closed,
        Self::Fulfilled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Announced => "ANNOUNCED",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Fulfilled => "FULFILLED",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Announced => 1,
            Self::Open => 2,
            Self::Closed => 3,
            Self::Fulfilled => 4,
        }
    }
}

impl Lifecycle for ScheduleStatus {
    fn advances_to(self, next: Self) -> bool {
        next.rank() > self.rank()
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status must be one of DRAFT, ANNOUNCED, OPEN, CLOSED, FULFILLED")]
pub struct InvalidScheduleStatus;

impl FromStr for ScheduleStatus {
    type Err = InvalidScheduleStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or(InvalidScheduleStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_stored_value() {
        for status in ScheduleStatus::ALL {
            assert_eq!(status.as_str().parse::<ScheduleStatus>(), Ok(status));
        }
    }

    #[test]
    fn parses_case_insensitively_and_trims() {
        assert_eq!(" open ".parse::<ScheduleStatus>(), Ok(ScheduleStatus::Open));
    }

    #[test]
    fn rejects_unknown_values() {
        assert!("ARCHIVED".parse::<ScheduleStatus>().is_err());
        assert!("".parse::<ScheduleStatus>().is_err());
    }
}
