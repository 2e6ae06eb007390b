use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::observe, error::Result};
use super::message_models::{Message, NewMessage, TEXT_MESSAGE_TYPE};

/// Append-only message persistence, ordered by timestamp then insertion order.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(&self, message: NewMessage) -> Result<Message>;

    /// Newest-first page plus the conversation's total message count.
    async fn page(&self, conversation_id: Uuid, limit: i64, offset: i64) -> Result<(Vec<Message>, i64)>;

    async fn count(&self, conversation_id: Uuid) -> Result<i64>;

    async fn latest(&self, conversation_id: Uuid) -> Result<Option<Message>>;
}

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn append(&self, message: NewMessage) -> Result<Message> {
        let message = observe(
            "message_append",
            sqlx::query_as::<_, Message>(
                "INSERT INTO messages
                    (conversation_id, sender_email, sender_type, sender_role, message, sent_at, read, message_type)
                 VALUES ($1, $2, $3, $4, $5, $6, false, $7)
                 RETURNING *",
            )
            .bind(message.conversation_id)
            .bind(&message.sender_email)
            .bind(message.sender_type)
            .bind(&message.sender_role)
            .bind(&message.text)
            .bind(message.timestamp)
            .bind(TEXT_MESSAGE_TYPE)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(message)
    }

    async fn page(&self, conversation_id: Uuid, limit: i64, offset: i64) -> Result<(Vec<Message>, i64)> {
        let messages = observe(
            "message_page",
            sqlx::query_as::<_, Message>(
                "SELECT * FROM messages
                 WHERE conversation_id = $1
                 ORDER BY sent_at DESC, seq DESC
                 LIMIT $2 OFFSET $3",
            )
            .bind(conversation_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool),
        )
        .await?;

        let total = self.count(conversation_id).await?;

        Ok((messages, total))
    }

    async fn count(&self, conversation_id: Uuid) -> Result<i64> {
        let count: i64 = observe(
            "message_count",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE conversation_id = $1")
                .bind(conversation_id)
                .fetch_one(&self.pool),
        )
        .await?;

        Ok(count)
    }

    async fn latest(&self, conversation_id: Uuid) -> Result<Option<Message>> {
        let message = observe(
            "message_latest",
            sqlx::query_as::<_, Message>(
                "SELECT * FROM messages
                 WHERE conversation_id = $1
                 ORDER BY sent_at DESC, seq DESC
                 LIMIT 1",
            )
            .bind(conversation_id)
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(message)
    }
}
