use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::user::{Role, StaticUser};

pub const TEXT_MESSAGE_TYPE: &str = "text";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_email: String,
    pub sender_type: Role,
    pub sender_role: String,
    pub message: String,
    #[sqlx(rename = "sent_at")]
    pub timestamp: DateTime<Utc>,
    // Written but never consulted; unread state lives on the conversation.
    pub read: bool,
    pub message_type: String,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation_id: Uuid,
    pub sender_type: Role,
    pub sender_email: String,
    pub sender_role: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl NewMessage {
    pub fn from_sender(
        conversation_id: Uuid,
        sender: &StaticUser,
        text: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            conversation_id,
            sender_type: sender.role,
            sender_email: sender.email.clone(),
            sender_role: sender.role.to_string(),
            text,
            timestamp,
        }
    }
}

/// A message projected for display, with the sender resolved from the static users.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_email: String,
    pub sender_name: String,
    pub sender_role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub message_type: String,
}

impl MessageResponse {
    pub fn project(message: Message, sender: &StaticUser) -> Self {
        Self {
            id: message.id,
            sender_email: sender.email.clone(),
            sender_name: sender.name.clone(),
            sender_role: sender.role,
            message: message.message,
            timestamp: message.timestamp,
            read: message.read,
            message_type: message.message_type,
        }
    }
}
