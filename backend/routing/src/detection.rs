//! Keyword detection — scan a memo's opening tokens for a destination match.

use tracing::debug;

use voxnote_config::Destination;
use voxnote_core::VoxError;

use crate::registry::{normalize, DestinationRegistry};

/// Result of routing one memo: the selected destination and the working
/// text handed to field generation.
#[derive(Debug)]
pub struct RoutingResult<'r> {
    pub destination: &'r Destination,
    /// Input text after the matched keyword token, or the full input when
    /// no keyword matched.
    pub remainder: String,
}

/// Select a destination for the given text.
///
/// Tokens are scanned in input order, profiles in configured order;
/// first match wins. The search window ends at the first token containing
/// a sentence boundary (`.`); anything after it cannot trigger a match.
/// On a match the keyword token is consumed: the remainder starts right
/// after it. Otherwise the first configured destination is the fallback and
/// the remainder is the full text.
pub fn route<'r>(
    text: &str,
    registry: &'r DestinationRegistry,
) -> Result<RoutingResult<'r>, VoxError> {
    if registry.is_empty() {
        return Err(VoxError::Config("no destinations configured".into()));
    }

    for token in text.split_whitespace() {
        // Sentence boundary ends the search window.
        if token.contains('.') {
            break;
        }
        let normalized = normalize(token);
        for profile in &registry.profiles {
            if profile.keywords.contains(&normalized) {
                // Token subslices borrow from `text`, so pointer arithmetic
                // gives the byte offset of the matched token.
                let start = token.as_ptr() as usize - text.as_ptr() as usize;
                let remainder = text[start + token.len()..].trim_start();
                debug!(
                    destination = %profile.destination.name,
                    keyword = %normalized,
                    "Routed memo"
                );
                return Ok(RoutingResult {
                    destination: &profile.destination,
                    remainder: remainder.to_string(),
                });
            }
        }
    }

    let fallback = &registry.profiles[0].destination;
    debug!(destination = %fallback.name, "No keyword matched; using fallback destination");
    Ok(RoutingResult {
        destination: fallback,
        remainder: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnote_config::Destination;

    fn destination(name: &str, keywords: &[&str]) -> Destination {
        Destination {
            name: name.to_string(),
            db_id: format!("db-{name}"),
            language: "french".to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            fields: vec![],
        }
    }

    fn registry(dests: &[(&str, &[&str])]) -> DestinationRegistry {
        DestinationRegistry::new(
            dests
                .iter()
                .map(|(name, kws)| destination(name, kws))
                .collect(),
        )
    }

    #[test]
    fn test_empty_registry_is_config_error() {
        let registry = DestinationRegistry::new(vec![]);
        let err = route("anything", &registry).unwrap_err();
        assert!(matches!(err, VoxError::Config(_)));
    }

    #[test]
    fn test_keyword_match_consumes_token() {
        let registry = registry(&[("journal", &["journal"]), ("hunt", &["chasse"])]);
        let result = route("chasse au trésor. Je veux...", &registry).unwrap();
        assert_eq!(result.destination.name, "hunt");
        assert_eq!(result.remainder, "au trésor. Je veux...");
    }

    #[test]
    fn test_match_is_case_and_punctuation_insensitive() {
        let registry = registry(&[("journal", &["journal"])]);
        let result = route("Journal, quelle journée", &registry).unwrap();
        assert_eq!(result.destination.name, "journal");
        assert_eq!(result.remainder, "quelle journée");
    }

    #[test]
    fn test_no_match_falls_back_to_first() {
        let registry = registry(&[("journal", &["journal"]), ("hunt", &["chasse"])]);
        let result = route("une pensée sans mot-clé", &registry).unwrap();
        assert_eq!(result.destination.name, "journal");
        assert_eq!(result.remainder, "une pensée sans mot-clé");
    }

    #[test]
    fn test_empty_text_falls_back() {
        let registry = registry(&[("journal", &["journal"])]);
        let result = route("", &registry).unwrap();
        assert_eq!(result.destination.name, "journal");
        assert_eq!(result.remainder, "");
    }

    #[test]
    fn test_keyword_after_sentence_boundary_is_ignored() {
        let registry = registry(&[("journal", &["journal"]), ("hunt", &["chasse"])]);
        // "chasse" only appears after the first period; the window is closed.
        let result = route("une idée simple. chasse au trésor", &registry).unwrap();
        assert_eq!(result.destination.name, "journal");
        assert_eq!(result.remainder, "une idée simple. chasse au trésor");
    }

    #[test]
    fn test_keyword_fused_to_period_does_not_match() {
        let registry = registry(&[("journal", &["journal"]), ("hunt", &["chasse"])]);
        // The token "chasse." contains the sentence boundary itself.
        let result = route("chasse. au trésor", &registry).unwrap();
        assert_eq!(result.destination.name, "journal");
    }

    #[test]
    fn test_token_order_beats_profile_order() {
        // Both keywords appear; the earlier token wins even though its
        // profile is configured later.
        let registry = registry(&[("journal", &["journal"]), ("hunt", &["chasse"])]);
        let result = route("chasse puis journal", &registry).unwrap();
        assert_eq!(result.destination.name, "hunt");
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let registry = registry(&[("journal", &["journal"]), ("hunt", &["chasse"])]);
        let a = route("chasse au trésor", &registry).unwrap();
        let b = route("chasse au trésor", &registry).unwrap();
        assert_eq!(a.destination.name, b.destination.name);
        assert_eq!(a.remainder, b.remainder);
    }
}
