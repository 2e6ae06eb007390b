use std::sync::Arc;

use chrono::Utc;

use crate::conversation::conversation_models::parse_conversation_id;
use crate::conversation::conversation_repository::ConversationStore;
use crate::error::{AppError, Result};
use crate::user::{Role, StaticUsers, DEFAULT_ROLE};
use super::message_dto::{page_offset, MessagePage, Pagination, SendMessageRequest};
use super::message_models::{Message, MessageResponse, NewMessage};
use super::message_repository::MessageStore;

#[derive(Clone)]
pub struct MessageService {
    repo: Arc<dyn MessageStore>,
    conversation_repo: Arc<dyn ConversationStore>,
    users: Arc<StaticUsers>,
}

impl MessageService {
    pub fn new(
        repo: Arc<dyn MessageStore>,
        conversation_repo: Arc<dyn ConversationStore>,
        users: Arc<StaticUsers>,
    ) -> Self {
        Self {
            repo,
            conversation_repo,
            users,
        }
    }

    pub async fn send_message(&self, conversation_id: &str, payload: SendMessageRequest) -> Result<Message> {
        if payload.message.trim().is_empty() {
            return Err(AppError::EmptyMessage);
        }

        let sender_type: Role = payload.sender_type.as_deref().unwrap_or(DEFAULT_ROLE).parse()?;
        let id = parse_conversation_id(conversation_id)?;

        let conversation = self
            .conversation_repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::ConversationNotFound)?;

        let sender = self.users.get(sender_type);
        let now = Utc::now();

        let message = self
            .repo
            .append(NewMessage::from_sender(conversation.id, sender, payload.message, now))
            .await?;

        // Not atomic with the insert above; reconcile_summary repairs a partial send
        self.conversation_repo
            .update_last_message(conversation.id, &message.message, &sender.email, now)
            .await?;
        self.conversation_repo
            .increment_unread(conversation.id, sender_type.other())
            .await?;

        tracing::debug!(
            "Message {} sent by {} in conversation {}",
            message.id,
            sender_type,
            conversation.id
        );

        Ok(message)
    }

    /// Fetches one page of history and marks the conversation read for the viewer.
    ///
    /// Pages are selected newest-first, but each page is returned oldest-first.
    pub async fn get_messages(
        &self,
        conversation_id: &str,
        viewer_role: &str,
        page: u32,
        limit: u32,
    ) -> Result<MessagePage> {
        let id = parse_conversation_id(conversation_id)?;
        let viewer: Role = viewer_role.parse()?;

        if page < 1 || limit < 1 {
            return Err(AppError::BadRequest(
                "page and limit must be at least 1".to_string(),
            ));
        }

        let conversation = self
            .conversation_repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::ConversationNotFound)?;

        let (messages, total) = self
            .repo
            .page(conversation.id, i64::from(limit), page_offset(page, limit))
            .await?;

        let messages: Vec<MessageResponse> = messages
            .into_iter()
            .rev()
            .map(|message| {
                let sender = self.users.get(message.sender_type);
                MessageResponse::project(message, sender)
            })
            .collect();

        self.conversation_repo
            .reset_unread(conversation.id, viewer)
            .await?;

        Ok(MessagePage {
            messages,
            pagination: Pagination::new(page, limit, total),
        })
    }
}
