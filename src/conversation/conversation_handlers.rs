use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{error::Result, state::AppState, user::DEFAULT_ROLE};
use super::conversation_dto::{ConversationQuery, ConversationsResponse, StartConversationResponse};

/// List the viewer's conversations (always the single patient/doctor pair)
#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "conversations",
    params(ConversationQuery),
    responses(
        (status = 200, description = "Conversation summaries for the viewer", body = ConversationsResponse),
        (status = 400, description = "Invalid user type")
    )
)]
pub async fn get_conversations(
    State(state): State<AppState>,
    query: std::result::Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let user_type = query.user_type.as_deref().unwrap_or(DEFAULT_ROLE);

    let conversations = state
        .conversation_service
        .list_conversations(user_type)
        .await?;

    Ok((StatusCode::OK, Json(ConversationsResponse { conversations })))
}

/// Start or fetch the conversation between the static users
#[utoipa::path(
    post,
    path = "/api/conversations/start",
    tag = "conversations",
    responses(
        (status = 200, description = "Conversation ready", body = StartConversationResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn start_conversation(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let conversation = state
        .conversation_service
        .get_or_create_conversation()
        .await?;

    let response = StartConversationResponse {
        conversation_id: conversation.id,
        message: "Conversation ready".to_string(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Rebuild a conversation's last-message summary from its stored messages
#[utoipa::path(
    post,
    path = "/api/conversations/{id}/reconcile",
    tag = "conversations",
    params(
        ("id" = String, Path, description = "Conversation ID"),
        ConversationQuery
    ),
    responses(
        (status = 200, description = "Reconciled summary", body = ConversationSummary),
        (status = 400, description = "Invalid conversation id or user type"),
        (status = 404, description = "Conversation not found")
    )
)]
pub async fn reconcile_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    query: std::result::Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let user_type = query.user_type.as_deref().unwrap_or(DEFAULT_ROLE);

    let summary = state
        .conversation_service
        .reconcile_summary(&conversation_id, user_type)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}
