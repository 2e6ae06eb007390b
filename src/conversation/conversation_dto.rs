use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::user::Role;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConversationQuery {
    /// `patient` or `doctor` (default: patient)
    pub user_type: Option<String>,
}

/// A conversation as seen by one participant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub other_user_name: String,
    pub other_user_email: String,
    pub other_user_role: Role,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub last_message_sender_email: String,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StartConversationResponse {
    pub conversation_id: Uuid,
    pub message: String,
}
