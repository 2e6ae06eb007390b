pub mod http_metrics;
pub mod security_headers;

pub use http_metrics::{metrics_handle, track_http_metrics};
pub use security_headers::{security_headers, SecurityHeadersState};
