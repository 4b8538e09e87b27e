//! Lake Dillon store server.
//!
//! Serves the timeline and packing-list documents and the uploaded photo
//! bytes that the `dillon` CLI reads and writes in hosted mode.

pub mod server;

pub use server::{router, AppState, ServerConfig};
