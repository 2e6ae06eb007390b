use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{error::Result, state::AppState, user::DEFAULT_ROLE};
use super::message_dto::{
    MessageQuery, SendMessageRequest, SendMessageResponse, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

/// Send a message in a conversation
#[utoipa::path(
    post,
    path = "/api/conversations/{id}/send",
    tag = "messages",
    params(
        ("id" = String, Path, description = "Conversation ID")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent successfully", body = SendMessageResponse),
        (status = 400, description = "Empty message, invalid sender type or malformed id"),
        (status = 404, description = "Conversation not found")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    state
        .message_service
        .send_message(&conversation_id, payload)
        .await?;

    let response = SendMessageResponse {
        message: "Message sent successfully".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a page of conversation messages
///
/// Page 1 holds the newest messages; each page is ordered oldest-first.
/// Fetching resets the viewer's unread count.
#[utoipa::path(
    get,
    path = "/api/conversations/{id}/messages",
    tag = "messages",
    params(
        ("id" = String, Path, description = "Conversation ID"),
        MessageQuery
    ),
    responses(
        (status = 200, description = "Paginated conversation messages", body = MessagePage),
        (status = 400, description = "Invalid user type, paging or conversation id"),
        (status = 404, description = "Conversation not found")
    )
)]
pub async fn get_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    query: std::result::Result<Query<MessageQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    query.validate()?;

    let user_type = query.user_type.as_deref().unwrap_or(DEFAULT_ROLE);
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    let messages = state
        .message_service
        .get_messages(&conversation_id, user_type, page, limit)
        .await?;

    Ok((StatusCode::OK, Json(messages)))
}
