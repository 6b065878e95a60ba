use sqlx::PgPool;
use thiserror::Error;
use vitrine_models::{ArchivedMessage, Message};

pub type Result<T> = std::result::Result<T, LifecycleError>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Message not found")]
    NotFound,

    #[error("Transaction error: {0}")]
    Transaction(#[from] sqlx::Error),
}

/// Moves contact messages between the active table and the archive
/// table. A logical message lives in exactly one of the two tables at
/// any instant, so every move is a single transaction: copy then
/// delete, committed together or not at all.
#[derive(Clone)]
pub struct MessageLifecycle {
    pool: PgPool,
}

impl MessageLifecycle {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Move an active message into the archive. `NotFound` covers both
    /// unknown ids and double-archive attempts, and leaves storage
    /// untouched.
    pub async fn archive(&self, active_id: i64) -> Result<ArchivedMessage> {
        let mut tx = self.pool.begin().await?;

        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(active_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LifecycleError::NotFound)?;

        let copy = message.into_archived();
        let archived = sqlx::query_as::<_, ArchivedMessage>(
            r#"
            INSERT INTO messages_archive
                (original_id, name, email, phone, subject, message, created_at, archived_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING *
            "#,
        )
        .bind(copy.original_id)
        .bind(&copy.name)
        .bind(&copy.email)
        .bind(&copy.phone)
        .bind(&copy.subject)
        .bind(&copy.message)
        .bind(copy.created_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(active_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(archived)
    }

    /// Move an archived message back to the active table, keyed by its
    /// original id. The newest archive row wins when several share the
    /// same provenance. The restored row gets a fresh primary key;
    /// `original_id` is only ever a provenance key.
    pub async fn restore(&self, original_id: i64) -> Result<Message> {
        let mut tx = self.pool.begin().await?;

        let archived = sqlx::query_as::<_, ArchivedMessage>(
            r#"
            SELECT * FROM messages_archive
            WHERE original_id = $1
            ORDER BY archived_at DESC
            LIMIT 1
            "#,
        )
        .bind(original_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(LifecycleError::NotFound)?;

        let archive_id = archived.id;
        let created_at = archived.created_at;
        let restored_fields = archived.into_restored();

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (name, email, phone, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&restored_fields.name)
        .bind(&restored_fields.email)
        .bind(&restored_fields.phone)
        .bind(&restored_fields.subject)
        .bind(&restored_fields.message)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM messages_archive WHERE id = $1")
            .bind(archive_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(message)
    }

    /// Hard-delete an archive row by its archive-local id.
    /// Irreversible; touches a single table so no transaction needed.
    pub async fn permanently_delete(&self, archive_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM messages_archive WHERE id = $1")
            .bind(archive_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LifecycleError::NotFound);
        }

        Ok(())
    }

    /// Page through archived messages, most recently archived first
    pub async fn list_archived(&self, page: i64, limit: i64) -> Result<Vec<ArchivedMessage>> {
        let offset = super::page_offset(page, limit);

        let archived = sqlx::query_as::<_, ArchivedMessage>(
            r#"
            SELECT * FROM messages_archive
            ORDER BY archived_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(archived)
    }

    pub async fn count_archived(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages_archive")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
