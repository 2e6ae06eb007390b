use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    user::Role,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Conversation {
    pub id: Uuid,
    pub doctor_email: String,
    pub patient_email: String,
    pub created_at: DateTime<Utc>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub last_message_sender_email: String,
    pub unread_count_doctor: i64,
    pub unread_count_patient: i64,
}

impl Conversation {
    /// Messages from the counterpart that `owner` has not fetched yet.
    pub fn unread_count(&self, owner: Role) -> i64 {
        match owner {
            Role::Doctor => self.unread_count_doctor,
            Role::Patient => self.unread_count_patient,
        }
    }
}

pub fn parse_conversation_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::MalformedIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Conversation {
        let now = Utc::now();
        Conversation {
            id: Uuid::new_v4(),
            doctor_email: "doctor@example.com".into(),
            patient_email: "patient@example.com".into(),
            created_at: now,
            last_message: String::new(),
            last_message_time: now,
            last_message_sender_email: String::new(),
            unread_count_doctor: 3,
            unread_count_patient: 7,
        }
    }

    #[test]
    fn test_unread_count_by_owner() {
        let conversation = sample();
        assert_eq!(conversation.unread_count(Role::Doctor), 3);
        assert_eq!(conversation.unread_count(Role::Patient), 7);
    }

    #[test]
    fn test_parse_conversation_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_conversation_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_conversation_id("not-an-id"),
            Err(AppError::MalformedIdentifier(raw)) if raw == "not-an-id"
        ));
    }
}
