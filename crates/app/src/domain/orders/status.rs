//! Order Status

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::transitions::Lifecycle;

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Placed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 3] = [Self::Placed, Self::Completed, Self::Cancelled];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "PLACED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether an order in this status still claims schedule capacity.
    #[must_use]
    pub const fn claims_capacity(self) -> bool {
        matches!(self, Self::Placed | Self::Completed)
    }
}

impl Lifecycle for OrderStatus {
    fn advances_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Placed, Self::Completed | Self::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status must be one of PLACED, COMPLETED, CANCELLED")]
pub struct InvalidOrderStatus;

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or(InvalidOrderStatus)
    }
}
