//! `voxnote-pipeline` — the end-to-end memo pipeline.

pub mod orchestrator;

pub use orchestrator::{MemoPipeline, MemoReport};
