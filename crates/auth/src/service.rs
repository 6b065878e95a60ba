use crate::error::{AuthError, Result};
use chrono::{Duration, Utc};
use rand::Rng;
use std::net::IpAddr;
use vitrine_database::SessionRepository;
use vitrine_models::{AdminSession, NewAdminSession};

/// How long an admin session stays valid after login, in hours
pub const SESSION_TTL_HOURS: i64 = 24;

/// Single-principal admin authentication: verifies the login password
/// against a pre-computed bcrypt hash injected at construction, and
/// manages the opaque session tokens backing the `admin_auth` cookie.
pub struct AuthService {
    session_repo: SessionRepository,
    password_hash: String,
    ttl: Duration,
}

impl AuthService {
    pub fn new(session_repo: SessionRepository, password_hash: String) -> Self {
        Self {
            session_repo,
            password_hash,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Override the session TTL (tests)
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Generate an opaque session token: 32 random bytes, hex encoded.
    /// No decodable structure; used purely as a lookup key.
    fn generate_token() -> String {
        let mut rng = rand::thread_rng();
        let token_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
        hex::encode(token_bytes)
    }

    /// Compare a password against the configured hash. Any bcrypt
    /// failure reads as a mismatch so callers can never distinguish
    /// "wrong password" from "broken hash".
    fn verify_password(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Verify the admin password and issue a session. Every failure
    /// surfaces as `InvalidCredentials`; the returned session token is
    /// what the caller sets as the `admin_auth` cookie.
    pub async fn login(&self, password: &str, ip: Option<IpAddr>) -> Result<AdminSession> {
        if self.password_hash.is_empty() {
            tracing::error!("Login attempted but no admin password hash is configured");
            return Err(AuthError::InvalidCredentials);
        }

        if !Self::verify_password(password, &self.password_hash) {
            tracing::warn!("Failed admin login attempt from {:?}", ip);
            return Err(AuthError::InvalidCredentials);
        }

        let new_session = NewAdminSession {
            session_token: Self::generate_token(),
            expires_at: Utc::now() + self.ttl,
            ip_address: ip.map(|addr| addr.to_string()),
        };

        let session = self.session_repo.create(&new_session).await.map_err(|e| {
            tracing::error!("Error creating admin session: {}", e);
            // Do not leak whether the credential or the store failed
            AuthError::InvalidCredentials
        })?;

        tracing::info!("Admin login successful from {:?}", ip);
        Ok(session)
    }

    /// Resolve a token to its session, enforcing expiry and IP
    /// binding. Expired rows are deleted on first sight (lazy
    /// cleanup); there is no background sweep requirement.
    pub async fn validate(&self, token: &str, ip: Option<IpAddr>) -> Result<AdminSession> {
        let session = self
            .session_repo
            .find_by_token(token)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if session.is_expired(Utc::now()) {
            tracing::debug!("Admin session expired, reaping row");
            self.session_repo.delete_by_token(token).await?;
            return Err(AuthError::SessionExpired);
        }

        let requester = ip.map(|addr| addr.to_string());
        if !session.matches_ip(requester.as_deref()) {
            tracing::warn!("Admin session IP mismatch");
            return Err(AuthError::Unauthorized);
        }

        Ok(session)
    }

    /// Boolean form of [`validate`](Self::validate): a missing cookie
    /// or stale session is a normal "not authenticated" outcome, never
    /// an error. Only storage failures propagate.
    pub async fn check(&self, token: &str, ip: Option<IpAddr>) -> Result<bool> {
        match self.validate(token, ip).await {
            Ok(_) => Ok(true),
            Err(AuthError::Unauthorized | AuthError::SessionExpired) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Revoke a session. Idempotent: logging out an unknown or
    /// already-revoked token succeeds.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.session_repo.delete_by_token(token).await?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// Reap expired session rows, returning the count removed. Used by
    /// the optional periodic sweeper; correctness never depends on it.
    pub async fn sweep_expired(&self) -> Result<u64> {
        Ok(self.session_repo.delete_expired().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let token = AuthService::generate_token();
        // 32 bytes hex encoded
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..100).map(|_| AuthService::generate_token()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn test_verify_password() {
        let hash = bcrypt::hash("secret", 4).unwrap();
        assert!(AuthService::verify_password("secret", &hash));
        assert!(!AuthService::verify_password("wrong", &hash));
        // A corrupt hash reads as a mismatch, not an error
        assert!(!AuthService::verify_password("secret", "not-a-bcrypt-hash"));
    }
}
