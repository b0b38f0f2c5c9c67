//! Domain Policy Config

use bakelink_app::domain::transitions::TransitionPolicy;
use clap::Args;

/// Domain rule settings.
#[derive(Debug, Args)]
pub struct PolicyConfig {
    /// Only accept forward schedule and order status changes
    #[arg(long, env = "STRICT_STATUS_TRANSITIONS", default_value_t = false)]
    pub strict_status_transitions: bool,
}

impl PolicyConfig {
    /// Status transition policy for the domain services.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy {
        TransitionPolicy::from_strict(self.strict_status_transitions)
    }
}
