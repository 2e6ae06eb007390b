use crate::db::DbPool;
use std::sync::Arc;

use crate::{
    conversation::{ConversationRepository, ConversationService},
    message::{MessageRepository, MessageService},
    user::{StaticUser, StaticUsers},
};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub conversation_service: ConversationService,
    pub message_service: MessageService,
}

impl AppState {
    /// Wires the PostgreSQL-backed stores into the services.
    pub fn new(db: DbPool, config: Arc<Config>) -> Self {
        let users = Arc::new(config.users.clone());
        let conversation_repository = Arc::new(ConversationRepository::new(db.clone()));
        let message_repository = Arc::new(MessageRepository::new(db.clone()));

        let conversation_service = ConversationService::new(
            conversation_repository.clone(),
            message_repository.clone(),
            users.clone(),
        );
        let message_service =
            MessageService::new(message_repository, conversation_repository, users);

        Self {
            db,
            config,
            conversation_service,
            message_service,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_max_connections: u32,
    pub cors_origins: Vec<String>,
    pub users: StaticUsers,
}

const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:3001",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            database_max_connections: 20,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            users: StaticUsers::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            cors_origins,
            users: StaticUsers {
                patient: user_from_lookup(&lookup, "PATIENT", defaults.users.patient),
                doctor: user_from_lookup(&lookup, "DOCTOR", defaults.users.doctor),
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("{} has invalid value {:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}

fn user_from_lookup(
    lookup: &impl Fn(&str) -> Option<String>,
    prefix: &str,
    default: StaticUser,
) -> StaticUser {
    StaticUser {
        id: lookup(&format!("{prefix}_ID")).unwrap_or(default.id),
        email: lookup(&format!("{prefix}_EMAIL")).unwrap_or(default.email),
        name: lookup(&format!("{prefix}_NAME")).unwrap_or(default.name),
        role: default.role,
    }
}
