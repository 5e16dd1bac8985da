use std::time::Duration;

use iso8601_timestamp::Timestamp;

use crate::{
    config::SessionTokenConfig,
    models::{SessionToken, TokenScope},
    AuthgateEvent, Authgate, Error, Success,
};

impl SessionToken {
    fn mint(scope: TokenScope, ttl: u64, account_id: String) -> SessionToken {
        let issued_at = Timestamp::now_utc();

        SessionToken {
            id: ulid::Ulid::new().to_string(),
            account_id,
            token: nanoid!(64),
            scope,
            issued_at,
            expires_at: issued_at + Duration::from_secs(ttl),
            attempts: 0,
        }
    }

    /// Mint a full session token
    pub fn full(config: &SessionTokenConfig, account_id: String) -> SessionToken {
        SessionToken::mint(TokenScope::Full, config.full_ttl, account_id)
    }

    /// Mint a pending second-factor token
    pub fn pending(config: &SessionTokenConfig, account_id: String) -> SessionToken {
        SessionToken::mint(TokenScope::PendingTwoFactor, config.pending_ttl, account_id)
    }

    /// Check if this token has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at.to_unix_timestamp_ms() <= Timestamp::now_utc().to_unix_timestamp_ms()
    }

    /// Save model
    pub async fn save(&self, authgate: &Authgate) -> Success {
        authgate.database.save_session_token(self).await
    }

    /// Claim this pending token for promotion to a full session
    ///
    /// The backing delete succeeds for at most one caller, so two concurrent
    /// verifications of the same token resolve to exactly one winner.
    pub async fn claim(&self, authgate: &Authgate) -> Success {
        if self.is_expired() {
            return Err(Error::TokenExpired);
        }

        authgate.database.delete_session_token(&self.id).await
    }

    /// Record a failed second-factor attempt
    ///
    /// Revokes the token once the configured attempt limit is reached.
    pub async fn register_failed_attempt(&mut self, authgate: &Authgate) -> Success {
        self.attempts += 1;

        if let Some(limit) = authgate.config.two_factor.attempt_limit {
            if self.attempts >= limit {
                return authgate.database.delete_session_token(&self.id).await;
            }
        }

        authgate.database.save_session_token(self).await
    }

    /// Delete this token
    pub async fn revoke(self, authgate: &Authgate) -> Success {
        // Delete from database
        authgate.database.delete_session_token(&self.id).await?;

        // Create and push event
        authgate
            .publish_event(AuthgateEvent::DeleteSession {
                account_id: self.account_id,
                session_id: self.id,
            })
            .await;

        Ok(())
    }
}
