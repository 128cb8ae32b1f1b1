//! URL handling module for Site-Searcher
//!
//! Ranked lists usually carry bare hosts (`wikipedia.org`). This module turns
//! such targets into the URL a worker requests.

mod normalize;

// Re-export main functions
pub use normalize::{has_scheme, request_url, DEFAULT_SCHEME};
