//! Routing module
//!
//! Provides package rule matching:
//! - Request path normalization
//! - First-match prefix lookup with path-segment boundaries

mod matcher;

pub use matcher::{ensure_leading_slash, match_rule};
