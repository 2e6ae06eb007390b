use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::message::message_repository::MessageStore;
use crate::user::{Role, StaticUsers};
use super::conversation_dto::ConversationSummary;
use super::conversation_models::{parse_conversation_id, Conversation};
use super::conversation_repository::ConversationStore;

#[derive(Clone)]
pub struct ConversationService {
    repo: Arc<dyn ConversationStore>,
    message_repo: Arc<dyn MessageStore>,
    users: Arc<StaticUsers>,
}

impl ConversationService {
    pub fn new(
        repo: Arc<dyn ConversationStore>,
        message_repo: Arc<dyn MessageStore>,
        users: Arc<StaticUsers>,
    ) -> Self {
        Self {
            repo,
            message_repo,
            users,
        }
    }

    pub async fn get_or_create_conversation(&self) -> Result<Conversation> {
        let conversation = self
            .repo
            .find_or_create(&self.users.doctor.email, &self.users.patient.email)
            .await?;

        tracing::debug!("Using conversation {}", conversation.id);

        Ok(conversation)
    }

    pub async fn list_conversations(&self, viewer_role: &str) -> Result<Vec<ConversationSummary>> {
        let viewer: Role = viewer_role.parse()?;
        let conversation = self.get_or_create_conversation().await?;

        Ok(vec![self.summarize(&conversation, viewer)])
    }

    /// Rebuilds the last-message fields from the newest stored message.
    ///
    /// A send that fails between inserting the message and updating the
    /// conversation leaves the summary stale; this brings it back in line.
    /// Unread counters are not touched since they cannot be derived from
    /// message history.
    pub async fn reconcile_summary(&self, conversation_id: &str, viewer_role: &str) -> Result<ConversationSummary> {
        let id = parse_conversation_id(conversation_id)?;
        let viewer: Role = viewer_role.parse()?;
        self.require(id).await?;

        match self.message_repo.latest(id).await? {
            Some(latest) => {
                self.repo
                    .update_last_message(id, &latest.message, &latest.sender_email, latest.timestamp)
                    .await?
            }
            None => self.repo.clear_last_message(id).await?,
        }

        let conversation = self.require(id).await?;
        tracing::info!("Reconciled summary of conversation {}", id);

        Ok(self.summarize(&conversation, viewer))
    }

    async fn require(&self, id: Uuid) -> Result<Conversation> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::ConversationNotFound)
    }

    fn summarize(&self, conversation: &Conversation, viewer: Role) -> ConversationSummary {
        let other_user = self.users.get(viewer.other());

        ConversationSummary {
            id: conversation.id,
            conversation_id: conversation.id,
            other_user_name: other_user.name.clone(),
            other_user_email: other_user.email.clone(),
            other_user_role: other_user.role,
            last_message: conversation.last_message.clone(),
            last_message_time: conversation.last_message_time,
            last_message_sender_email: conversation.last_message_sender_email.clone(),
            unread_count: conversation.unread_count(viewer),
        }
    }
}
