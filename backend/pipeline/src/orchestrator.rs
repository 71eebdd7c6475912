//! Orchestrator — compose transcription, routing, field resolution, and
//! persistence into one request flow.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use voxnote_config::VoxConfig;
use voxnote_core::{CompletionProvider, PropertyMap, VoxError};
use voxnote_generation::{Generator, OpenAiProvider};
use voxnote_notion::{NotionClient, WriteOutcome};
use voxnote_routing::{route, DestinationRegistry};
use voxnote_transcribe::Transcriber;

/// Result of processing one memo.
#[derive(Debug)]
pub struct MemoReport {
    pub destination: String,
    pub database_id: String,
    /// Full transcribed text (equal to the input for text-only runs).
    pub transcript: String,
    /// Working text after the routing keyword was consumed.
    pub remainder: String,
    pub properties: PropertyMap,
    pub write: WriteOutcome,
}

/// One-request-at-a-time memo pipeline. Collaborator handles are created
/// once at startup and shared read-only across requests.
pub struct MemoPipeline {
    registry: DestinationRegistry,
    generator: Generator,
    transcriber: Transcriber,
    notion: NotionClient,
}

impl MemoPipeline {
    pub fn new(
        config: &VoxConfig,
        provider: Arc<dyn CompletionProvider>,
        transcriber: Transcriber,
        notion: NotionClient,
    ) -> Self {
        Self {
            registry: DestinationRegistry::new(config.destinations.clone()),
            generator: Generator::new(provider, config.models.clone()),
            transcriber,
            notion,
        }
    }

    /// Build a pipeline with real collaborators, checking every credential
    /// eagerly before any network call.
    pub fn from_env(config: &VoxConfig) -> Result<Self, VoxError> {
        let provider = OpenAiProvider::from_env()?;
        let transcriber = Transcriber::from_env()?;
        let notion = NotionClient::from_env()?;
        Ok(Self::new(config, Arc::new(provider), transcriber, notion))
    }

    /// Transcribe an uploaded audio file to text.
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String, VoxError> {
        self.transcriber.transcribe(audio_path).await
    }

    /// Full flow for an audio file: transcribe, then process the text.
    pub async fn process(&self, audio_path: &Path) -> Result<MemoReport, VoxError> {
        let transcript = self.transcribe(audio_path).await?;
        self.process_text(&transcript).await
    }

    /// Route the text, resolve the destination's fields, and persist the row.
    pub async fn process_text(&self, text: &str) -> Result<MemoReport, VoxError> {
        let routed = route(text, &self.registry)?;
        let destination = routed.destination;
        info!(
            destination = %destination.name,
            db_id = %destination.db_id,
            "Processing memo"
        );

        let properties = self
            .generator
            .resolve(&routed.remainder, destination)
            .await?;

        let write = self.notion.create_row(&destination.db_id, &properties).await;
        if !write.is_confirmed() {
            warn!(
                destination = %destination.name,
                "Database write outcome unknown; row may not have been created"
            );
        }

        Ok(MemoReport {
            destination: destination.name.clone(),
            database_id: destination.db_id.clone(),
            transcript: text.to_string(),
            remainder: routed.remainder,
            properties,
            write,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnote_config::Destination;
    use voxnote_generation::MockProvider;

    fn test_config() -> VoxConfig {
        VoxConfig {
            destinations: vec![
                Destination {
                    name: "journal".to_string(),
                    db_id: "db-journal".to_string(),
                    language: "french".to_string(),
                    keywords: vec!["journal".to_string()],
                    fields: vec!["Title".to_string(), "Input".to_string()],
                },
                Destination {
                    name: "hunt".to_string(),
                    db_id: "db1".to_string(),
                    language: "fr".to_string(),
                    keywords: vec!["chasse".to_string()],
                    fields: vec!["Title".to_string(), "Concept".to_string()],
                },
            ],
            ..Default::default()
        }
    }

    fn pipeline(provider: MockProvider) -> MemoPipeline {
        MemoPipeline::new(
            &test_config(),
            Arc::new(provider),
            Transcriber::new("test-key"),
            // Unroutable port: writes resolve quickly to Unknown.
            NotionClient::new("test-key").with_base_url("http://127.0.0.1:9"),
        )
    }

    #[tokio::test]
    async fn test_routed_memo_resolves_configured_fields_in_order() {
        let pipeline = pipeline(MockProvider::new("mock").with_response("generated"));
        let report = pipeline
            .process_text("chasse au trésor. Je veux...")
            .await
            .unwrap();

        assert_eq!(report.destination, "hunt");
        assert_eq!(report.database_id, "db1");
        assert_eq!(report.remainder, "au trésor. Je veux...");
        let keys: Vec<_> = report.properties.keys().collect();
        assert_eq!(keys, vec!["Title", "Concept"]);
        assert_eq!(report.properties.get("Title").unwrap().kind(), "title");
        assert_eq!(report.properties.get("Concept").unwrap().kind(), "rich_text");
    }

    #[tokio::test]
    async fn test_unmatched_memo_falls_back_to_first_destination() {
        let pipeline = pipeline(MockProvider::new("mock").with_response("generated"));
        let report = pipeline.process_text("une pensée libre").await.unwrap();

        assert_eq!(report.destination, "journal");
        assert_eq!(report.remainder, "une pensée libre");
        assert_eq!(
            report.properties.get("Input").unwrap().as_text().unwrap(),
            "une pensée libre"
        );
    }

    #[tokio::test]
    async fn test_write_outcome_ambiguity_is_surfaced() {
        let pipeline = pipeline(MockProvider::new("mock").with_response("generated"));
        let report = pipeline.process_text("journal ma journée").await.unwrap();
        assert!(!report.write.is_confirmed());
        assert_eq!(report.write.label(), "unknown");
    }

    #[tokio::test]
    async fn test_exhausted_generation_aborts_before_any_write() {
        let pipeline = pipeline(MockProvider::new("mock").failing(u32::MAX));
        let err = pipeline
            .process_text("chasse au trésor")
            .await
            .unwrap_err();
        assert!(matches!(err, VoxError::Generation { .. }));
    }

    #[tokio::test]
    async fn test_empty_registry_is_config_error() {
        let config = VoxConfig::default();
        let pipeline = MemoPipeline::new(
            &config,
            Arc::new(MockProvider::new("mock")),
            Transcriber::new("test-key"),
            NotionClient::new("test-key").with_base_url("http://127.0.0.1:9"),
        );
        let err = pipeline.process_text("anything").await.unwrap_err();
        assert!(matches!(err, VoxError::Config(_)));
    }
}
