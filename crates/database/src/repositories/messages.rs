use crate::error::Result;
use sqlx::PgPool;
use vitrine_models::{Message, NewMessage};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a contact-form submission
    pub async fn create(&self, new_message: &NewMessage) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (name, email, phone, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new_message.name)
        .bind(&new_message.email)
        .bind(&new_message.phone)
        .bind(&new_message.subject)
        .bind(&new_message.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    /// Page through active messages, newest first
    pub async fn list(&self, page: i64, limit: i64) -> Result<Vec<Message>> {
        let offset = super::page_offset(page, limit);

        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
