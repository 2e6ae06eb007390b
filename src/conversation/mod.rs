pub mod conversation_models;
pub mod conversation_dto;
pub mod conversation_repository;
pub mod conversation_service;
pub mod conversation_handlers;

pub use conversation_dto::{ConversationSummary, ConversationsResponse, StartConversationResponse};
pub use conversation_repository::ConversationRepository;
pub use conversation_service::ConversationService;
