//! Auth Config

use clap::Args;

/// API token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Server secret used to verify API token signatures
    #[arg(long, env = "TOKEN_HMAC_KEY", hide_env_values = true)]
    pub token_hmac_key: String,
}
