//! Field resolver — walk a destination's field list in order and assemble
//! the property map for persistence.

use tracing::{debug, info};

use voxnote_config::Destination;
use voxnote_core::{PropertyMap, VoxError};

use crate::dispatch::{GenerationContext, Generator};

impl Generator {
    /// Resolve every field of `destination` for the given working text.
    ///
    /// Fields run strictly in configured order; fields that depend on others
    /// (Followup, Preparation, Recommendations) must be listed after their
    /// dependencies. The resolver does not reorder or validate this.
    /// All-or-nothing: the first generation failure aborts the pass and
    /// nothing is persisted.
    pub async fn resolve(
        &self,
        text: &str,
        destination: &Destination,
    ) -> Result<PropertyMap, VoxError> {
        info!(
            destination = %destination.name,
            fields = destination.fields.len(),
            "Resolving fields"
        );

        let mut ctx = GenerationContext::new(text);
        let mut properties = PropertyMap::new();

        for field in &destination.fields {
            let value = self.generate(field, &ctx, &destination.language).await?;
            debug!(field = %field, kind = value.kind(), "Field resolved");
            if let Some(content) = value.as_text() {
                ctx.record(field, content);
            }
            properties.insert(field.clone(), value);
        }

        Ok(properties)
    }
}
