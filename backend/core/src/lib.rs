pub mod error;
pub mod traits;
pub mod types;

pub use error::VoxError;
pub use traits::{CompletionProvider, CompletionReply, CompletionRequest};
pub use types::{FieldValue, PropertyMap};
