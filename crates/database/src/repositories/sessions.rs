use crate::error::Result;
use sqlx::PgPool;
use vitrine_models::{AdminSession, NewAdminSession};

#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a freshly issued session
    pub async fn create(&self, new_session: &NewAdminSession) -> Result<AdminSession> {
        let session = sqlx::query_as::<_, AdminSession>(
            r#"
            INSERT INTO admin_sessions (session_token, expires_at, ip_address)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new_session.session_token)
        .bind(new_session.expires_at)
        .bind(&new_session.ip_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Look up a session by its token. Expiry is not checked here;
    /// the caller decides what a stale row means.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<AdminSession>> {
        let session = sqlx::query_as::<_, AdminSession>(
            "SELECT * FROM admin_sessions WHERE session_token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Delete a session (logout). A no-op when the token is unknown.
    pub async fn delete_by_token(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE session_token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Clean up expired sessions, returning the number reaped
    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
