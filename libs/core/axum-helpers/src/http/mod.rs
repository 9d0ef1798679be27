//! HTTP-level building blocks: CORS, security headers and streamed JSON bodies.

pub mod cors;
pub mod json_stream;
pub mod security;

pub use cors::{cors_layer_from_env, create_cors_layer};
pub use json_stream::JsonArrayStream;
pub use security::security_headers;
