//! Request handler module
//!
//! Responsible for request dispatch: method and size guards, health
//! endpoints, then vanity rule matching and document rendering.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
