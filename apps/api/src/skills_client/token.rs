//! Token manager: owns the cached bearer token for the skills API.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info};

use super::{SkillsClient, SkillsError};

/// Seconds shaved off the provider-declared lifetime so a token is never used at the edge of expiry.
pub const EXPIRY_MARGIN_SECS: i64 = 300;

/// The single cached credential. Starts empty and already expired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedCredential {
    pub access_token: String,
    /// Epoch seconds.
    pub expiry_time: i64,
}

impl CachedCredential {
    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.expiry_time
    }
}

#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Exclusively owned token cache. Whoever holds it controls its lifetime;
/// share it across tasks by wrapping it in a mutex.
#[derive(Debug)]
pub struct TokenManager {
    credentials: ClientCredentials,
    cached: CachedCredential,
}

impl TokenManager {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self::with_cached(credentials, CachedCredential::default())
    }

    pub fn with_cached(credentials: ClientCredentials, cached: CachedCredential) -> Self {
        Self { credentials, cached }
    }

    #[cfg(test)]
    pub fn cached(&self) -> &CachedCredential {
        &self.cached
    }

    /// Returns a valid bearer token, refreshing it from the provider when the cached one has expired.
    pub async fn access_token(&mut self, client: &SkillsClient) -> Result<String, SkillsError> {
        self.access_token_at(client, Utc::now().timestamp()).await
    }

    /// Same as [`access_token`](Self::access_token) with an explicit clock reading.
    pub async fn access_token_at(
        &mut self,
        client: &SkillsClient,
        now: i64,
    ) -> Result<String, SkillsError> {
        if self.cached.is_valid_at(now) {
            debug!("Using cached skills API token (expires at {})", self.cached.expiry_time);
            return Ok(self.cached.access_token.clone());
        }

        let response = client
            .request_token(
                &self.credentials.client_id,
                &self.credentials.client_secret,
                &self.credentials.scope,
            )
            .await?;

        if response.access_token.is_empty() {
            return Err(SkillsError::TokenUnavailable(
                "token endpoint returned no access_token".to_string(),
            ));
        }

        // expires_in is provider-controlled; clamp instead of overflowing.
        let lifetime = response.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        self.cached = CachedCredential {
            access_token: response.access_token,
            expiry_time: now.saturating_add(lifetime),
        };

        info!("Refreshed skills API token (valid for {}s)", lifetime);

        Ok(self.cached.access_token.clone())
    }
}
