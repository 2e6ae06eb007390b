use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;
use super::user_models::StaticUsersResponse;

/// Get the two static chat participants
#[utoipa::path(
    get,
    path = "/api/get-static-users",
    tag = "users",
    responses(
        (status = 200, description = "Static users keyed by role", body = StaticUsersResponse)
    )
)]
pub async fn get_static_users(State(state): State<AppState>) -> impl IntoResponse {
    let response = StaticUsersResponse {
        users: state.config.users.clone(),
    };

    (StatusCode::OK, Json(response))
}
