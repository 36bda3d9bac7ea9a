//! Tag system

pub mod filter;

pub use filter::{join_list, split_list, TagFilter, TagMode};
