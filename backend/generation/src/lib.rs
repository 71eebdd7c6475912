//! `voxnote-generation` — turn routed memo text into database-ready fields.
//!
//! The field vocabulary is a descriptor table: each field name maps to a
//! recipe (dependency list, prompt templates, model tier) executed by a
//! uniform dispatcher. The resolver walks a destination's field list in
//! order, threading side-channel values (mood, events, tasks, keywords,
//! target) into fields that depend on them.

pub mod completion;
pub mod dispatch;
pub mod fields;
pub mod providers;
pub mod resolver;

pub use completion::CompletionClient;
pub use dispatch::{GenerationContext, Generator};
pub use fields::{Dep, FieldRegistry, FieldSpec, ModelTier, OutputKind, Recipe};
pub use providers::mock::MockProvider;
pub use providers::openai::OpenAiProvider;
