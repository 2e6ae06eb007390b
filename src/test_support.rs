//! In-memory stores and state builders shared by unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{cmp::Reverse, sync::Arc, sync::Mutex};
use uuid::Uuid;

use crate::{
    conversation::{conversation_models::Conversation, conversation_repository::ConversationStore},
    error::{AppError, Result},
    message::{
        message_models::{Message, NewMessage, TEXT_MESSAGE_TYPE},
        message_repository::MessageStore,
    },
    user::Role,
};

#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: Mutex<Vec<Conversation>>,
}

impl InMemoryConversationStore {
    pub fn len(&self) -> usize {
        self.conversations.lock().unwrap().len()
    }

    fn with_conversation(&self, id: Uuid, f: impl FnOnce(&mut Conversation)) -> Result<()> {
        let mut conversations = self.conversations.lock().unwrap();
        if let Some(conversation) = conversations.iter_mut().find(|c| c.id == id) {
            f(conversation);
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn find_or_create(&self, doctor_email: &str, patient_email: &str) -> Result<Conversation> {
        let mut conversations = self.conversations.lock().unwrap();
        if let Some(existing) = conversations
            .iter()
            .find(|c| c.doctor_email == doctor_email && c.patient_email == patient_email)
        {
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let conversation = Conversation {
            id: Uuid::new_v4(),
            doctor_email: doctor_email.to_string(),
            patient_email: patient_email.to_string(),
            created_at: now,
            last_message: String::new(),
            last_message_time: now,
            last_message_sender_email: String::new(),
            unread_count_doctor: 0,
            unread_count_patient: 0,
        };
        conversations.push(conversation.clone());
        Ok(conversation)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Conversation>> {
        let conversations = self.conversations.lock().unwrap();
        Ok(conversations.iter().find(|c| c.id == id).cloned())
    }

    async fn update_last_message(
        &self,
        id: Uuid,
        text: &str,
        sender_email: &str,
        time: DateTime<Utc>,
    ) -> Result<()> {
        self.with_conversation(id, |c| {
            c.last_message = text.to_string();
            c.last_message_sender_email = sender_email.to_string();
            c.last_message_time = time;
        })
    }

    async fn clear_last_message(&self, id: Uuid) -> Result<()> {
        self.with_conversation(id, |c| {
            c.last_message.clear();
            c.last_message_sender_email.clear();
            c.last_message_time = c.created_at;
        })
    }

    async fn increment_unread(&self, id: Uuid, owner: Role) -> Result<()> {
        self.with_conversation(id, |c| match owner {
            Role::Doctor => c.unread_count_doctor += 1,
            Role::Patient => c.unread_count_patient += 1,
        })
    }

    async fn reset_unread(&self, id: Uuid, owner: Role) -> Result<()> {
        self.with_conversation(id, |c| match owner {
            Role::Doctor => c.unread_count_doctor = 0,
            Role::Patient => c.unread_count_patient = 0,
        })
    }
}

#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<Message>>,
}

impl InMemoryMessageStore {
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Matching messages newest first; ties keep the later insert first.
    fn newest_first(&self, conversation_id: Uuid) -> Vec<Message> {
        let messages = self.messages.lock().unwrap();
        let mut matching: Vec<(usize, Message)> = messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .enumerate()
            .collect();
        matching.sort_by_key(|(idx, m)| Reverse((m.timestamp, *idx)));
        matching.into_iter().map(|(_, m)| m).collect()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: NewMessage) -> Result<Message> {
        let stored = Message {
            id: Uuid::new_v4(),
            conversation_id: message.conversation_id,
            sender_email: message.sender_email,
            sender_type: message.sender_type,
            sender_role: message.sender_role,
            message: message.text,
            timestamp: message.timestamp,
            read: false,
            message_type: TEXT_MESSAGE_TYPE.to_string(),
        };
        self.messages.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn page(&self, conversation_id: Uuid, limit: i64, offset: i64) -> Result<(Vec<Message>, i64)> {
        let all = self.newest_first(conversation_id);
        let total = all.len() as i64;
        let page = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn count(&self, conversation_id: Uuid) -> Result<i64> {
        Ok(self.newest_first(conversation_id).len() as i64)
    }

    async fn latest(&self, conversation_id: Uuid) -> Result<Option<Message>> {
        Ok(self.newest_first(conversation_id).into_iter().next())
    }
}

/// Message store whose every call fails like an unreachable database.
pub struct UnavailableMessageStore;

#[async_trait]
impl MessageStore for UnavailableMessageStore {
    async fn append(&self, _message: NewMessage) -> Result<Message> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn page(&self, _conversation_id: Uuid, _limit: i64, _offset: i64) -> Result<(Vec<Message>, i64)> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self, _conversation_id: Uuid) -> Result<i64> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn latest(&self, _conversation_id: Uuid) -> Result<Option<Message>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub struct Stores {
    pub conversations: Arc<InMemoryConversationStore>,
    pub messages: Arc<InMemoryMessageStore>,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            conversations: Arc::new(InMemoryConversationStore::default()),
            messages: Arc::new(InMemoryMessageStore::default()),
        }
    }
}
