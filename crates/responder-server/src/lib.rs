//! HTTP server for Responder.
//!
//! Exposes the question store over REST. Each route maps to exactly one
//! store operation and returns its result as JSON, rejections included.

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use extract::Payload;
pub use router::build_router;
pub use server::ResponderServer;
