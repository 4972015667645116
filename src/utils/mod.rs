//! Utility modules.

pub mod text;

pub use text::{CommentRef, clean_text, is_meaningful, is_separator};
