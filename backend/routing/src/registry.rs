//! Destination registry — configured profiles with normalized keyword sets.

use std::collections::HashSet;

use voxnote_config::Destination;

/// Trailing punctuation stripped from tokens and keywords before matching.
const TRAILING_PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Normalize a token or keyword for matching: lowercase, trailing
/// punctuation stripped.
pub(crate) fn normalize(token: &str) -> String {
    token.trim_end_matches(TRAILING_PUNCTUATION).to_lowercase()
}

pub(crate) struct Profile {
    pub destination: Destination,
    pub keywords: HashSet<String>,
}

/// Read-only set of destination profiles, in configured priority order.
///
/// The first profile doubles as the fallback when no keyword matches.
pub struct DestinationRegistry {
    pub(crate) profiles: Vec<Profile>,
}

impl DestinationRegistry {
    /// Build a registry from configured destinations, normalizing every
    /// keyword once up front.
    pub fn new(destinations: Vec<Destination>) -> Self {
        let profiles = destinations
            .into_iter()
            .map(|destination| {
                let keywords = destination
                    .keywords
                    .iter()
                    .map(|k| normalize(k))
                    .collect();
                Profile {
                    destination,
                    keywords,
                }
            })
            .collect();
        Self { profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// The fallback destination (first configured), if any.
    pub fn fallback(&self) -> Option<&Destination> {
        self.profiles.first().map(|p| &p.destination)
    }

    pub fn destinations(&self) -> impl Iterator<Item = &Destination> {
        self.profiles.iter().map(|p| &p.destination)
    }
}
