//! Utility modules shared by the content pipeline.

pub mod date;
pub mod slug;
