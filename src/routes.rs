use crate::{
    conversation::{
        conversation_handlers, ConversationSummary, ConversationsResponse,
        StartConversationResponse,
    },
    handlers,
    message::{
        message_handlers, MessagePage, MessageResponse, Pagination, SendMessageRequest,
        SendMessageResponse,
    },
    middleware::{metrics_handle, security_headers, track_http_metrics, SecurityHeadersState},
    state::AppState,
    user::{user_handlers, Role, StaticUser, StaticUsers, StaticUsersResponse},
};
use axum::{
    http::{header::{AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::time::Duration;
use tower_http::{
    compression::{predicate::SizeAbove, CompressionLayer, CompressionLevel},
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::user::user_handlers::get_static_users,
        crate::conversation::conversation_handlers::get_conversations,
        crate::conversation::conversation_handlers::start_conversation,
        crate::conversation::conversation_handlers::reconcile_conversation,
        crate::message::message_handlers::get_messages,
        crate::message::message_handlers::send_message,
    ),
    components(
        schemas(
            Role,
            StaticUser,
            StaticUsers,
            StaticUsersResponse,
            ConversationSummary,
            ConversationsResponse,
            StartConversationResponse,
            SendMessageRequest,
            SendMessageResponse,
            MessageResponse,
            Pagination,
            MessagePage,
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "users", description = "Static chat participants"),
        (name = "conversations", description = "Patient/doctor conversation endpoints"),
        (name = "messages", description = "Messaging endpoints")
    )
)]
struct ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(600))
}

/// Gzip at level 6 for bodies over 1 KiB.
fn compression_layer() -> CompressionLayer<SizeAbove> {
    CompressionLayer::new()
        .gzip(true)
        .quality(CompressionLevel::Precise(6))
        .compress_when(SizeAbove::new(1024))
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let security = SecurityHeadersState::from_config(&state.config);

    let conversation_routes = Router::new()
        .route("/", get(conversation_handlers::get_conversations))
        .route("/start", post(conversation_handlers::start_conversation))
        .route("/:id/messages", get(message_handlers::get_messages))
        .route("/:id/send", post(message_handlers::send_message))
        .route("/:id/reconcile", post(conversation_handlers::reconcile_conversation));

    let api_routes = Router::new()
        .route("/get-static-users", get(user_handlers::get_static_users))
        .nest("/conversations", conversation_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(security, security_headers))
        .layer(middleware::from_fn(track_http_metrics))
        .layer(Extension(metrics_handle()))
        .layer(TraceLayer::new_for_http())
        .layer(compression_layer())
        .layer(cors)
        .with_state(state)
}
