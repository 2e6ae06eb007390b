pub mod health;
pub mod prometheus;

pub use health::health_check;
pub use prometheus::metrics_endpoint;
