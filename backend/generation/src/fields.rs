//! Field vocabulary — the closed set of generatable fields and their recipes.
//!
//! Each field name maps to a descriptor: a templated completion call
//! (output kind, prompt templates, dependency list, model tier) or a local
//! recipe (timestamp, passthrough, fixed value). Dispatch is a lookup plus
//! a uniform executor.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Descriptor pieces
// ---------------------------------------------------------------------------

/// Which model tier a completion recipe runs on. Short label-style fields
/// use the light tier; everything else uses the heavy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Light,
    Heavy,
}

/// Database property kind the field produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Title,
    RichText,
}

/// A side-channel value produced by an earlier field in the same pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dep {
    Mood,
    Events,
    Tasks,
    Keywords,
    Target,
}

impl Dep {
    /// Template variable name this dependency substitutes.
    pub fn var(&self) -> &'static str {
        match self {
            Dep::Mood => "moods",
            Dep::Events => "events",
            Dep::Tasks => "tasks",
            Dep::Keywords => "keywords",
            Dep::Target => "target",
        }
    }
}

/// How a field's value is produced.
#[derive(Debug, Clone)]
pub enum Recipe {
    /// Templated completion call. `system` may reference `{language}`;
    /// `user` may reference `{text}` and the `deps` variables.
    Completion {
        kind: OutputKind,
        system: &'static str,
        user: &'static str,
        tier: ModelTier,
        deps: &'static [Dep],
    },
    /// Current timestamp (date kind); no model call.
    Timestamp,
    /// Verbatim passthrough of the working text; no model call.
    Passthrough,
    /// Fixed value; no model call.
    Fixed(&'static str),
}

/// A fully-defined field entry in the vocabulary.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub recipe: Recipe,
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

fn completion(
    name: &'static str,
    kind: OutputKind,
    tier: ModelTier,
    deps: &'static [Dep],
    system: &'static str,
    user: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        recipe: Recipe::Completion {
            kind,
            system,
            user,
            tier,
            deps,
        },
    }
}

/// Build the full field vocabulary.
pub fn builtin_fields() -> Vec<FieldSpec> {
    vec![
        completion(
            "Title",
            OutputKind::Title,
            ModelTier::Light,
            &[],
            "You are a motivational title generator. You write powerfull title \
             yet simple and concise. You use {language} as output language.",
            "Write me a title for this text: {text}",
        ),
        completion(
            "Name",
            OutputKind::RichText,
            ModelTier::Light,
            &[],
            "You are an expert to summarize content. You write a simple and \
             concise title about a content, it should be no longer than a \
             sentence. You use {language} as output language.",
            "Summarize this text in a title: {text}",
        ),
        completion(
            "Concept",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert in adding value to idea. You improve the clarity \
             of an idea by describing its concept and the related reasons. You do \
             not add a title, a plan or an how to do this. You are concise yet \
             clear. You use simple text for the output. You use {language} as \
             output language.",
            "Describe the concept of this idea: {text}",
        ),
        completion(
            "Goals",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert in adding value to idea. You improve the clarity \
             of an idea by describing its goals. You do not add a title, a plan \
             or an how to do this. You are concise yet clear. You use {language} \
             as output language.",
            "Describe the goals of this idea: {text}",
        ),
        completion(
            "Results",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert in adding value to idea. You improve the clarity \
             of an idea by describing its expected result for the end-user. You \
             do not add a title, a plan or an how to do this. You are concise yet \
             clear. You use simple text for the output. You use {language} as \
             output language.",
            "Describe the expected results of this idea: {text}",
        ),
        completion(
            "Improvements",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert in adding value to idea. You improve an idea by \
             suggesting improvements to it, mainly quick wins. You do not add a \
             title, a plan or an how to do this. You are concise yet clear. You \
             use simple text for the output. You use {language} as output \
             language.",
            "Suggest improvement to this idea: {text}",
        ),
        completion(
            "Events",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert to understand content. You extract from the \
             texts all the described events. You rephrase them and create an \
             ordererd list of them. You are concise yet clear. You use simple \
             list for the output without formatting. You use {language} as \
             output language.",
            "Extract the events from this text: {text}",
        ),
        completion(
            "Mood",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert to understand emotions and feelings from the diary \
             of a user. You extract from the texts written by the narator his \
             general moods and feeling. You create a list of them and limit to \
             2-3 main moods. You are concise yet clear. You use simple list for \
             the output without formatting. You use {language} as output language",
            "Extract the moods from this text: {text}",
        ),
        completion(
            "Tasks",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert to understand content. You extract from the \
             texts all the described tasks. You rephrase them and create an \
             ordererd list of them. You are concise yet clear. You use simple \
             list for the output without formatting. You use {language} \
             as output language.",
            "Extract the tasks from this text: {text}",
        ),
        completion(
            "Followup",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[Dep::Tasks],
            "You are an expert in productivity. You suggest follow-ups for \
             lists of tasks, helping me to avoid missing the big picture or todo. \
             You create an ordererd list of them. You are concise yet clear. You \
             use simple list for the output without formatting. You use \
             {language} as output language",
            "Suggest followup from these tasks: {tasks}",
        ),
        completion(
            "Preparation",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[Dep::Tasks],
            "You are an expert in productivity. You suggest preparation to do in \
             order to easily handle a task, helping me to avoid missing the big \
             picture or todo. You create an ordererd list of them. You are \
             concise yet clear. You use simple list for the output without \
             formatting. You use {language} as output language",
            "Suggest preparation to do in order to handle these tasks: {tasks}",
        ),
        completion(
            "Recommendations",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[Dep::Mood, Dep::Events],
            "You are an expert to helping person with theirs emotions and \
             feelings. You suggest recommandations to self improve based \
             moods and the events occured during the day. The recommandations \
             are limited to one or two, excluding writing in a diary as it's \
             already done. The recommendations are easy to put in place. \
             You create a list of them. You are concise yet clear. You use simple \
             list for the output without formatting. You use {language} as \
             output language.",
            "Suggest recommandation for user feeling: {moods} and having \
             these events today: {events}",
        ),
        completion(
            "Keywords",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert to understand content. You extract from the texts \
             the main keywords and limit to 5 of them. You are concise yet clear. \
             You use simple list for the output without formatting. You use \
             {language} as output language.",
            "Extract the keywords from this text: {text}",
        ),
        completion(
            "Target",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert in marketing. You identify the target audience of \
             a content and limit to 3 main audiences. You are concise yet clear. \
             You use simple list for the output without formatting. You use \
             {language} as output language.",
            "Identify the target audience of this text: {text}",
        ),
        completion(
            "Excerpt",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[Dep::Keywords],
            "You are an expert in writing. You write a short excerpt that \
             introduces a content and makes the reader want to read more. You \
             include the given keywords. You are concise yet clear. You use \
             simple text for the output. You use {language} as output language.",
            "Write an excerpt for this text: {text} using these keywords: \
             {keywords}",
        ),
        completion(
            "Draft",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[Dep::Target, Dep::Keywords],
            "You are an expert in writing. You write the draft of an article \
             developing an idea for a target audience. You include the given \
             keywords. You do not add a title. You use simple text for the \
             output. You use {language} as output language.",
            "Write a draft article for this idea: {text} for this audience: \
             {target} using these keywords: {keywords}",
        ),
        completion(
            "Interpretation",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert to understand content. You give an interpretation \
             of the meaning of a text. You are concise yet clear. You use simple \
             text for the output. You use {language} as output language.",
            "Interpret the meaning of this text: {text}",
        ),
        completion(
            "FurtherReading",
            OutputKind::RichText,
            ModelTier::Heavy,
            &[],
            "You are an expert librarian. You suggest books and articles to \
             explore a topic further. You create a list of them without \
             commentary. You use simple list for the output without formatting. \
             You use {language} as output language.",
            "Suggest further reading for this text: {text}",
        ),
        FieldSpec {
            name: "Date",
            recipe: Recipe::Timestamp,
        },
        FieldSpec {
            name: "Input",
            recipe: Recipe::Passthrough,
        },
        FieldSpec {
            name: "Weather",
            // TODO: call the OpenWeatherMap day_summary API once a location
            // source exists for memos.
            recipe: Recipe::Fixed("No implementation yet"),
        },
    ]
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct FieldRegistry {
    fields: Vec<FieldSpec>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            fields: builtin_fields(),
        }
    }

    /// Find a field by its configured name. Unknown names return `None`;
    /// dispatch treats them as a verbatim passthrough, never an error.
    pub fn find(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn all(&self) -> &[FieldSpec] {
        &self.fields
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_field() {
        let registry = FieldRegistry::new();
        let spec = registry.find("Title").unwrap();
        match &spec.recipe {
            Recipe::Completion { kind, tier, deps, .. } => {
                assert_eq!(*kind, OutputKind::Title);
                assert_eq!(*tier, ModelTier::Light);
                assert!(deps.is_empty());
            }
            other => panic!("unexpected recipe: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_is_none() {
        let registry = FieldRegistry::new();
        assert!(registry.find("NotAField").is_none());
    }

    #[test]
    fn test_dependent_field_declarations() {
        let registry = FieldRegistry::new();
        let followup = registry.find("Followup").unwrap();
        match &followup.recipe {
            Recipe::Completion { deps, .. } => assert_eq!(*deps, [Dep::Tasks].as_slice()),
            other => panic!("unexpected recipe: {other:?}"),
        }
        let recommendations = registry.find("Recommendations").unwrap();
        match &recommendations.recipe {
            Recipe::Completion { deps, .. } => {
                assert_eq!(*deps, [Dep::Mood, Dep::Events].as_slice())
            }
            other => panic!("unexpected recipe: {other:?}"),
        }
    }

    #[test]
    fn test_completion_templates_reference_their_deps() {
        // Every dependency a recipe declares must appear in its user template,
        // and templates must not reference undeclared dependency variables.
        let registry = FieldRegistry::new();
        for spec in registry.all() {
            if let Recipe::Completion { user, deps, .. } = &spec.recipe {
                for dep in *deps {
                    let var = format!("{{{}}}", dep.var());
                    assert!(
                        user.contains(&var),
                        "{}: template missing {var}",
                        spec.name
                    );
                }
                if deps.is_empty() {
                    assert!(
                        user.contains("{text}"),
                        "{}: dependency-free template must use {{text}}",
                        spec.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_only_title_uses_title_kind() {
        let registry = FieldRegistry::new();
        let titles: Vec<_> = registry
            .all()
            .iter()
            .filter(|f| {
                matches!(
                    f.recipe,
                    Recipe::Completion {
                        kind: OutputKind::Title,
                        ..
                    }
                )
            })
            .map(|f| f.name)
            .collect();
        assert_eq!(titles, vec!["Title"]);
    }
}
