//! Question graph schema and normalization
//!
//! Two configuration shapes are accepted:
//!
//! ```yaml
//! # Canonical form
//! questions:
//!   order: [app, env, cluster]
//!   template_question: app
//!   definitions:
//!     app:
//!       prompt: "Which workload?"
//!       choices: [deployment, job]
//! ```
//!
//! ```yaml
//! # Legacy inline form (no order/definitions wrapper)
//! questions:
//!   app:
//!     prompt: "Which workload?"
//!     choices: [deployment, job]
//! ```
//!
//! `normalize` lifts the legacy form into the canonical one and synthesizes
//! an order (sorted by key, for output stability only) when none is given.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dynamic choice dependencies for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicSpec {
    /// Prior question keys, evaluated in order, each descending one level
    /// into the nested choices mapping
    pub dependency_questions: Vec<String>,
}

/// Behavioral flags for a question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBehavior {
    /// Choices depend on answers to prior questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicSpec>,

    /// Offer free-text search-style entry
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub interactive: bool,

    /// Allow multiple selections
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
}

/// A single question definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// Prompt text shown to the user
    pub prompt: String,

    /// Behavioral flags (`type:` in the config document)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<QuestionBehavior>,

    /// Flat choice list, or a dependency-keyed nested mapping
    pub choices: serde_yaml_ng::Value,
}

impl QuestionSpec {
    /// Whether this question allows multiple selections
    pub fn is_multiple(&self) -> bool {
        self.behavior.as_ref().is_some_and(|b| b.multiple)
    }

    /// Whether this question offers search-style entry
    pub fn is_interactive(&self) -> bool {
        self.behavior.as_ref().is_some_and(|b| b.interactive)
    }

    /// The dynamic descriptor, if any
    pub fn dynamic(&self) -> Option<&DynamicSpec> {
        self.behavior.as_ref().and_then(|b| b.dynamic.as_ref())
    }

    /// The immediate parent question key for hierarchical choices
    /// (the last dependency in the chain)
    pub fn parent_key(&self) -> Option<&str> {
        self.dynamic()
            .and_then(|d| d.dependency_questions.last())
            .map(String::as_str)
    }
}

/// The `questions` section as it appears on disk, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsSection {
    /// Explicit question order (canonical form)
    #[serde(default)]
    pub order: Option<Vec<String>>,

    /// Key of the question whose answer names the template
    #[serde(default)]
    pub template_question: Option<String>,

    /// Question definitions (canonical form)
    #[serde(default)]
    pub definitions: Option<BTreeMap<String, QuestionSpec>>,

    /// Legacy inline form: questions directly under `questions:`
    #[serde(flatten, default)]
    pub inline: BTreeMap<String, QuestionSpec>,
}

impl QuestionsSection {
    /// Normalize into the canonical [`QuestionGraph`]
    ///
    /// Definitions win over the inline map when both are present. An explicit
    /// order must match the definition keys exactly, in both directions.
    pub fn normalize(self) -> Result<QuestionGraph> {
        let definitions = match self.definitions {
            Some(definitions) if !definitions.is_empty() => definitions,
            _ if !self.inline.is_empty() => self.inline,
            _ => return Err(Error::NoQuestionDefinitions),
        };

        let order = match self.order {
            Some(order) if !order.is_empty() => {
                for key in &order {
                    if !definitions.contains_key(key) {
                        return Err(Error::UnknownQuestion {
                            question: key.clone(),
                        });
                    }
                }
                for key in definitions.keys() {
                    if !order.contains(key) {
                        return Err(Error::UnorderedQuestion {
                            question: key.clone(),
                        });
                    }
                }
                order
            }
            // Synthesized order: sorted keys, for stable output naming only
            _ => definitions.keys().cloned().collect(),
        };

        if let Some(template_question) = &self.template_question {
            if !definitions.contains_key(template_question) {
                return Err(Error::UnknownQuestion {
                    question: template_question.clone(),
                });
            }
        }

        Ok(QuestionGraph {
            order,
            definitions,
            template_question: self.template_question,
        })
    }
}

/// Normalized question graph: ordered keys plus definitions
#[derive(Debug, Clone, Serialize)]
pub struct QuestionGraph {
    order: Vec<String>,
    definitions: BTreeMap<String, QuestionSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_question: Option<String>,
}

impl QuestionGraph {
    /// Question keys in traversal order
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Look up a question definition by key
    pub fn get(&self, key: &str) -> Option<&QuestionSpec> {
        self.definitions.get(key)
    }

    /// The configured template question key, if any
    pub fn template_question(&self) -> Option<&str> {
        self.template_question.as_deref()
    }

    /// Iterate questions in traversal order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QuestionSpec)> {
        self.order.iter().filter_map(|key| {
            self.definitions
                .get(key)
                .map(|spec| (key.as_str(), spec))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(choices: serde_yaml_ng::Value) -> QuestionSpec {
        QuestionSpec {
            prompt: "pick one".to_string(),
            behavior: None,
            choices,
        }
    }

    fn flat_choices() -> serde_yaml_ng::Value {
        serde_yaml_ng::from_str("[a, b]").unwrap()
    }

    #[test]
    fn test_normalize_canonical_form() {
        let yaml = r#"
order: [app, env]
template_question: app
definitions:
  app:
    prompt: "Which app?"
    choices: [deployment, job]
  env:
    prompt: "Which env?"
    type:
      multiple: true
    choices: [dev, staging]
"#;
        let section: QuestionsSection = serde_yaml_ng::from_str(yaml).unwrap();
        let graph = section.normalize().unwrap();

        assert_eq!(graph.order(), ["app", "env"]);
        assert_eq!(graph.template_question(), Some("app"));
        assert!(!graph.get("app").unwrap().is_multiple());
        assert!(graph.get("env").unwrap().is_multiple());
    }

    #[test]
    fn test_normalize_legacy_inline_form() {
        let yaml = r#"
app:
  prompt: "Which app?"
  choices: [deployment, job]
env:
  prompt: "Which env?"
  choices: [dev, staging]
"#;
        let section: QuestionsSection = serde_yaml_ng::from_str(yaml).unwrap();
        let graph = section.normalize().unwrap();

        // Synthesized order is sorted by key
        assert_eq!(graph.order(), ["app", "env"]);
        assert!(graph.get("app").is_some());
        assert!(graph.get("env").is_some());
        assert_eq!(graph.template_question(), None);
    }

    #[test]
    fn test_legacy_and_canonical_normalize_equivalently() {
        let canonical = r#"
definitions:
  app:
    prompt: "Which app?"
    choices: [deployment, job]
"#;
        let legacy = r#"
app:
  prompt: "Which app?"
  choices: [deployment, job]
"#;
        let canonical: QuestionsSection = serde_yaml_ng::from_str(canonical).unwrap();
        let legacy: QuestionsSection = serde_yaml_ng::from_str(legacy).unwrap();

        let canonical = canonical.normalize().unwrap();
        let legacy = legacy.normalize().unwrap();

        assert_eq!(canonical.order(), legacy.order());
        assert_eq!(
            canonical.get("app").unwrap().prompt,
            legacy.get("app").unwrap().prompt
        );
    }

    #[test]
    fn test_normalize_empty_section_fails() {
        let section = QuestionsSection::default();
        assert!(matches!(
            section.normalize(),
            Err(Error::NoQuestionDefinitions)
        ));
    }

    #[test]
    fn test_normalize_order_references_unknown_question() {
        let mut definitions = BTreeMap::new();
        definitions.insert("app".to_string(), question(flat_choices()));

        let section = QuestionsSection {
            order: Some(vec!["app".to_string(), "ghost".to_string()]),
            definitions: Some(definitions),
            ..Default::default()
        };

        assert!(matches!(
            section.normalize(),
            Err(Error::UnknownQuestion { question }) if question == "ghost"
        ));
    }

    #[test]
    fn test_normalize_definition_missing_from_order() {
        let mut definitions = BTreeMap::new();
        definitions.insert("app".to_string(), question(flat_choices()));
        definitions.insert("env".to_string(), question(flat_choices()));

        let section = QuestionsSection {
            order: Some(vec!["app".to_string()]),
            definitions: Some(definitions),
            ..Default::default()
        };

        assert!(matches!(
            section.normalize(),
            Err(Error::UnorderedQuestion { question }) if question == "env"
        ));
    }

    #[test]
    fn test_normalize_template_question_must_exist() {
        let mut definitions = BTreeMap::new();
        definitions.insert("app".to_string(), question(flat_choices()));

        let section = QuestionsSection {
            template_question: Some("missing".to_string()),
            definitions: Some(definitions),
            ..Default::default()
        };

        assert!(matches!(
            section.normalize(),
            Err(Error::UnknownQuestion { question }) if question == "missing"
        ));
    }

    #[test]
    fn test_parent_key_is_last_dependency() {
        let yaml = r#"
prompt: "Which cluster?"
type:
  multiple: true
  dynamic:
    dependency_questions: [app, env]
choices:
  web:
    dev: [c1]
"#;
        let spec: QuestionSpec = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(spec.parent_key(), Some("env"));
    }
}
