//! `voxnote-notion` — persist resolved memos as rows in a Notion database.

pub mod client;
pub mod format;

pub use client::{NotionClient, WriteOutcome};
pub use format::format_row;
