use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::message_models::MessageResponse;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
    /// `patient` or `doctor` (default: patient)
    pub sender_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendMessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessageQuery {
    /// `patient` or `doctor` (default: patient)
    pub user_type: Option<String>,
    /// Page number, newest page first (default: 1)
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    /// Messages per page (default: 20)
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub current_page: u32,
    pub messages_per_page: u32,
    pub total_messages: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    /// `page` and `limit` must both be at least 1.
    pub fn new(page: u32, limit: u32, total_messages: i64) -> Self {
        let limit_i64 = i64::from(limit);
        let skip = page_offset(page, limit);

        Self {
            current_page: page,
            messages_per_page: limit,
            total_messages,
            total_pages: (total_messages + limit_i64 - 1) / limit_i64,
            has_next: skip.saturating_add(limit_i64) < total_messages,
            has_previous: page > 1,
        }
    }
}

/// Number of newest messages skipped before `page`.
pub fn page_offset(page: u32, limit: u32) -> i64 {
    i64::from(page.saturating_sub(1)).saturating_mul(i64::from(limit))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessagePage {
    pub messages: Vec<MessageResponse>,
    pub pagination: Pagination,
}
