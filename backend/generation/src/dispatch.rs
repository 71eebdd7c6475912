//! Generation dispatch — map a field name to its recipe and execute it.

use std::sync::Arc;

use chrono::Local;
use tracing::debug;

use voxnote_config::ModelsConfig;
use voxnote_core::{CompletionProvider, FieldValue, VoxError};

use crate::completion::CompletionClient;
use crate::fields::{Dep, FieldRegistry, ModelTier, OutputKind, Recipe};

/// Working state for one resolution pass: the routed memo text plus
/// side-channel values produced by earlier fields.
///
/// A dependent field reads an absent dependency as the empty string,
/// never a failure.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub text: String,
    pub mood: String,
    pub events: String,
    pub tasks: String,
    pub keywords: String,
    pub target: String,
}

impl GenerationContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub(crate) fn dep_value(&self, dep: Dep) -> &str {
        match dep {
            Dep::Mood => &self.mood,
            Dep::Events => &self.events,
            Dep::Tasks => &self.tasks,
            Dep::Keywords => &self.keywords,
            Dep::Target => &self.target,
        }
    }

    /// Record a produced value into its side channel, if the field has one.
    pub(crate) fn record(&mut self, field: &str, content: &str) {
        match field {
            "Mood" => self.mood = content.to_string(),
            "Events" => self.events = content.to_string(),
            "Tasks" => self.tasks = content.to_string(),
            "Keywords" => self.keywords = content.to_string(),
            "Target" => self.target = content.to_string(),
            _ => {}
        }
    }
}

/// Executes field recipes against a completion provider.
pub struct Generator {
    client: CompletionClient,
    fields: FieldRegistry,
    models: ModelsConfig,
}

impl Generator {
    pub fn new(provider: Arc<dyn CompletionProvider>, models: ModelsConfig) -> Self {
        Self {
            client: CompletionClient::new(provider),
            fields: FieldRegistry::new(),
            models,
        }
    }

    /// Produce the value for one field.
    ///
    /// Unknown field names fall back to a verbatim-text passthrough.
    pub async fn generate(
        &self,
        field: &str,
        ctx: &GenerationContext,
        language: &str,
    ) -> Result<FieldValue, VoxError> {
        let Some(spec) = self.fields.find(field) else {
            debug!(field, "Unknown field; passing text through verbatim");
            return Ok(FieldValue::RichText(ctx.text.clone()));
        };

        match &spec.recipe {
            Recipe::Completion {
                kind,
                system,
                user,
                tier,
                deps,
            } => {
                let system = system.replace("{language}", language);
                let mut prompt = user.replace("{text}", &ctx.text);
                for dep in *deps {
                    prompt = prompt.replace(&format!("{{{}}}", dep.var()), ctx.dep_value(*dep));
                }
                let model = match tier {
                    ModelTier::Light => &self.models.light,
                    ModelTier::Heavy => &self.models.heavy,
                };
                let content = self
                    .client
                    .complete(&system, &prompt, model)
                    .await
                    .map_err(|e| VoxError::generation(field, e.to_string()))?;
                Ok(match kind {
                    OutputKind::Title => FieldValue::Title(content),
                    OutputKind::RichText => FieldValue::RichText(content),
                })
            }
            Recipe::Timestamp => Ok(FieldValue::Date {
                start: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            }),
            Recipe::Passthrough => Ok(FieldValue::RichText(ctx.text.clone())),
            Recipe::Fixed(value) => Ok(FieldValue::RichText((*value).to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;

    fn generator(provider: MockProvider) -> Generator {
        Generator::new(Arc::new(provider), ModelsConfig::default())
    }

    #[tokio::test]
    async fn test_title_produces_title_kind() {
        let gen = generator(MockProvider::new("mock").with_response("Great Title"));
        let ctx = GenerationContext::new("an idea");
        let value = gen.generate("Title", &ctx, "english").await.unwrap();
        assert_eq!(value, FieldValue::Title("Great Title".into()));
    }

    #[tokio::test]
    async fn test_prompt_templates_are_rendered() {
        let gen = generator(MockProvider::new("mock").echoing());
        let ctx = GenerationContext::new("ranger le garage");
        let value = gen.generate("Tasks", &ctx, "french").await.unwrap();
        assert_eq!(
            value.as_text().unwrap(),
            "Extract the tasks from this text: ranger le garage"
        );
    }

    #[tokio::test]
    async fn test_dependent_field_reads_context() {
        let gen = generator(MockProvider::new("mock").echoing());
        let mut ctx = GenerationContext::new("unused here");
        ctx.tasks = "1. ranger le garage".to_string();
        let value = gen.generate("Followup", &ctx, "french").await.unwrap();
        assert_eq!(
            value.as_text().unwrap(),
            "Suggest followup from these tasks: 1. ranger le garage"
        );
    }

    #[tokio::test]
    async fn test_absent_dependency_defaults_to_empty() {
        let gen = generator(MockProvider::new("mock").echoing());
        let ctx = GenerationContext::new("texte");
        let value = gen.generate("Recommendations", &ctx, "french").await.unwrap();
        assert_eq!(
            value.as_text().unwrap(),
            "Suggest recommandation for user feeling:  and having these events today: "
        );
    }

    #[tokio::test]
    async fn test_input_is_verbatim_passthrough() {
        let gen = generator(MockProvider::new("mock").failing(u32::MAX));
        let ctx = GenerationContext::new("exact input text");
        let value = gen.generate("Input", &ctx, "english").await.unwrap();
        assert_eq!(value, FieldValue::RichText("exact input text".into()));
    }

    #[tokio::test]
    async fn test_unknown_field_is_passthrough_not_error() {
        let gen = generator(MockProvider::new("mock").failing(u32::MAX));
        let ctx = GenerationContext::new("the text");
        let value = gen.generate("Whatever", &ctx, "english").await.unwrap();
        assert_eq!(value, FieldValue::RichText("the text".into()));
    }

    #[tokio::test]
    async fn test_weather_is_fixed_placeholder() {
        let gen = generator(MockProvider::new("mock").failing(u32::MAX));
        let ctx = GenerationContext::new("whatever");
        let value = gen.generate("Weather", &ctx, "english").await.unwrap();
        assert_eq!(value, FieldValue::RichText("No implementation yet".into()));
    }

    #[tokio::test]
    async fn test_date_is_local_timestamp() {
        let gen = generator(MockProvider::new("mock").failing(u32::MAX));
        let ctx = GenerationContext::new("whatever");
        let value = gen.generate("Date", &ctx, "english").await.unwrap();
        match value {
            FieldValue::Date { start } => assert!(start.contains('T'), "{start}"),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generation_failure_names_the_field() {
        let gen = generator(MockProvider::new("mock").failing(u32::MAX));
        let ctx = GenerationContext::new("an idea");
        let err = gen.generate("Concept", &ctx, "english").await.unwrap_err();
        match err {
            VoxError::Generation { field, .. } => assert_eq!(field, "Concept"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_is_deterministic_against_stub() {
        let gen = generator(MockProvider::new("mock").echoing());
        let ctx = GenerationContext::new("same input");
        let a = gen.generate("Concept", &ctx, "english").await.unwrap();
        let b = gen.generate("Concept", &ctx, "english").await.unwrap();
        assert_eq!(a, b);
    }
}
