use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use super::MessageStore;
use crate::{
    models::{ChatMessage, ChatMessageWithAuthor, MessageAuthor, MessageId, UserId},
    Result,
};

/// Chat message repository for database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a message-plus-author row to `ChatMessageWithAuthor`
    fn row_to_message(&self, row: &PgRow) -> Result<ChatMessageWithAuthor> {
        Ok(ChatMessageWithAuthor {
            message: ChatMessage {
                id: row.try_get("id")?,
                content: row.try_get("content")?,
                author_id: row.try_get("author_id")?,
                parent_id: row.try_get::<Option<MessageId>, _>("parent_id")?,
                created_at: row.try_get("created_at")?,
            },
            author: MessageAuthor {
                id: row.try_get::<UserId, _>("author_id")?,
                name: row.try_get("author_name")?,
                avatar_url: row.try_get("author_avatar_url")?,
            },
        })
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn create(&self, message: &ChatMessage) -> Result<ChatMessageWithAuthor> {
        let row = sqlx::query(
            r"
            WITH inserted AS (
                INSERT INTO chat_messages (id, content, author_id, parent_id, created_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, content, author_id, parent_id, created_at
            )
            SELECT i.id, i.content, i.author_id, i.parent_id, i.created_at,
                   u.name AS author_name, u.avatar_url AS author_avatar_url
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            ",
        )
        .bind(&message.id)
        .bind(&message.content)
        .bind(&message.author_id)
        .bind(message.parent_id.as_ref())
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await?;

        self.row_to_message(&row)
    }

    async fn list_since(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<ChatMessageWithAuthor>> {
        let rows = sqlx::query(
            r"
            SELECT m.id, m.content, m.author_id, m.parent_id, m.created_at,
                   u.name AS author_name, u.avatar_url AS author_avatar_url
            FROM chat_messages m
            JOIN users u ON u.id = m.author_id
            WHERE m.created_at >= $1
            ORDER BY m.created_at ASC
            LIMIT $2
            ",
        )
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| self.row_to_message(row)).collect()
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM chat_messages
            WHERE created_at < $1
            ",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
