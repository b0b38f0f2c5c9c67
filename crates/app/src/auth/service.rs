//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken,
        TokenHmacKey, build_verifier_input, format_api_token, generate_api_token_secret,
        parse_api_token, repository::PgAuthRepository,
    },
    domain::owners::records::OwnerUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    key: TokenHmacKey,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, key: TokenHmacKey) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            key,
        }
    }

    /// Issue a new API token for the given owner.
    ///
    /// # Errors
    ///
    /// Returns an error if HMAC computation or database insertion fails.
    pub async fn issue_api_token(
        &self,
        owner_uuid: OwnerUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let verifier_input = build_verifier_input(&token_uuid, version, &owner_uuid, &secret);

        let token_hash = self.key.sign(&verifier_input)?;

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                owner_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        info!(owner_uuid = %owner_uuid, token_uuid = %token_uuid, "issued api token");

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        owner_uuid: OwnerUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_owner(owner_uuid)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<OwnerUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier_input = build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.owner_uuid,
            &parsed_token.secret,
        );

        if !self.key.verify(&verifier_input, &token.token_hash)? {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!(token_uuid = %parsed_token.token_uuid, %error, "failed to record token use");
        }

        Ok(token.owner_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the owner it acts for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<OwnerUuid, AuthServiceError>;
}
