//! notepin - Terminal client for a personal notes server
//!
//! Lists, filters, pins and reorders rich-text notes fetched from the notes
//! REST API, with groups, tags and attachments. Pins, manual order and theme
//! are kept locally per workspace.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::NotepinError;
