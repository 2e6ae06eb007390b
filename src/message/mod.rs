pub mod message_models;
pub mod message_dto;
pub mod message_repository;
pub mod message_service;
pub mod message_handlers;

pub use message_models::MessageResponse;
pub use message_dto::{MessagePage, Pagination, SendMessageRequest, SendMessageResponse};
pub use message_repository::MessageRepository;
pub use message_service::MessageService;
