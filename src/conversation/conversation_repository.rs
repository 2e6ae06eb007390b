use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::observe, error::Result, user::Role};
use super::conversation_models::Conversation;

/// Persistence for the conversation record and its derived fields.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the conversation for the pair, inserting it if absent.
    /// Concurrent first calls for the same pair resolve to one record.
    async fn find_or_create(&self, doctor_email: &str, patient_email: &str) -> Result<Conversation>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Conversation>>;

    async fn update_last_message(
        &self,
        id: Uuid,
        text: &str,
        sender_email: &str,
        time: DateTime<Utc>,
    ) -> Result<()>;

    /// Empties the last-message fields, used when no message exists.
    async fn clear_last_message(&self, id: Uuid) -> Result<()>;

    async fn increment_unread(&self, id: Uuid, owner: Role) -> Result<()>;

    async fn reset_unread(&self, id: Uuid, owner: Role) -> Result<()>;
}

#[derive(Clone)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for ConversationRepository {
    async fn find_or_create(&self, doctor_email: &str, patient_email: &str) -> Result<Conversation> {
        let existing = observe(
            "conversation_find",
            sqlx::query_as::<_, Conversation>(
                "SELECT * FROM conversations WHERE doctor_email = $1 AND patient_email = $2",
            )
            .bind(doctor_email)
            .bind(patient_email)
            .fetch_optional(&self.pool),
        )
        .await?;

        if let Some(conversation) = existing {
            return Ok(conversation);
        }

        // A racing insert loses on the unique pair; the no-op update makes RETURNING yield the winner
        let conversation = observe(
            "conversation_create",
            sqlx::query_as::<_, Conversation>(
                "INSERT INTO conversations (doctor_email, patient_email)
                 VALUES ($1, $2)
                 ON CONFLICT ON CONSTRAINT conversations_participants_key
                 DO UPDATE SET doctor_email = EXCLUDED.doctor_email
                 RETURNING *",
            )
            .bind(doctor_email)
            .bind(patient_email)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(conversation)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Conversation>> {
        let conversation = observe(
            "conversation_get",
            sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;

        Ok(conversation)
    }

    async fn update_last_message(
        &self,
        id: Uuid,
        text: &str,
        sender_email: &str,
        time: DateTime<Utc>,
    ) -> Result<()> {
        observe(
            "conversation_update_last_message",
            sqlx::query(
                "UPDATE conversations
                 SET last_message = $1, last_message_sender_email = $2, last_message_time = $3
                 WHERE id = $4",
            )
            .bind(text)
            .bind(sender_email)
            .bind(time)
            .bind(id)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn clear_last_message(&self, id: Uuid) -> Result<()> {
        observe(
            "conversation_clear_last_message",
            sqlx::query(
                "UPDATE conversations
                 SET last_message = '', last_message_sender_email = '', last_message_time = created_at
                 WHERE id = $1",
            )
            .bind(id)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn increment_unread(&self, id: Uuid, owner: Role) -> Result<()> {
        let query = match owner {
            Role::Doctor => {
                "UPDATE conversations SET unread_count_doctor = unread_count_doctor + 1 WHERE id = $1"
            }
            Role::Patient => {
                "UPDATE conversations SET unread_count_patient = unread_count_patient + 1 WHERE id = $1"
            }
        };

        observe("conversation_increment_unread", sqlx::query(query).bind(id).execute(&self.pool))
            .await?;

        Ok(())
    }

    async fn reset_unread(&self, id: Uuid, owner: Role) -> Result<()> {
        let query = match owner {
            Role::Doctor => "UPDATE conversations SET unread_count_doctor = 0 WHERE id = $1",
            Role::Patient => "UPDATE conversations SET unread_count_patient = 0 WHERE id = $1",
        };

        observe("conversation_reset_unread", sqlx::query(query).bind(id).execute(&self.pool))
            .await?;

        Ok(())
    }
}
