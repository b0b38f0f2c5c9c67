//! Status transition policy.

/// A status enum with a notion of moving forward.
pub trait Lifecycle: Copy + Eq {
    /// Whether `next` is a forward step from `self`.
    fn advances_to(self, next: Self) -> bool;
}

/// Which status changes the services accept.
///
/// Setting the current status again is always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may be set at any time.
    #[default]
    Permissive,

    /// Only forward moves through the lifecycle are accepted.
    Forward,
}

impl TransitionPolicy {
    /// Build a policy from the strict-transitions flag.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Forward } else { Self::Permissive }
    }

    /// Whether the change `from -> to` is accepted.
    #[must_use]
    pub fn permits<S: Lifecycle>(self, from: S, to: S) -> bool {
        match self {
            Self::Permissive => true,
            Self::Forward => from == to || from.advances_to(to),
        }
    }
}
