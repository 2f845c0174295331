//! Choice resolution for static and dependency-keyed questions
//!
//! Flat choice lists are returned verbatim. Dependency-keyed mappings are
//! resolved by recursive descent: each entry of `dependency_questions`
//! descends one level into the nested mapping using the corresponding prior
//! answer as the lookup key. When a prior answer is multi-valued the descent
//! fans out across every selected value and the result is the de-duplicated,
//! first-seen-order union of the reachable choices; leaf choices reached
//! through a multi-valued final step carry a structured tag naming the parent
//! value they came from, so combination expansion can preserve the pairing.

use std::collections::HashSet;
use std::fmt;

use serde_yaml_ng::Value;

use crate::answers::Answers;
use crate::config::QuestionSpec;
use crate::error::{Error, Result};

/// Separator used when a tagged choice is formatted for display
pub const HIERARCHY_SEPARATOR: &str = ": ";

/// The parent selection a hierarchical choice originated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    /// Question key of the immediate parent (last dependency)
    pub key: String,
    /// The parent answer value that produced this choice
    pub value: String,
}

/// One resolved choice, optionally tagged with its originating parent
///
/// The tag is structured data; the `"<parent>: <child>"` string form exists
/// only at the UI/CLI boundary, via [`Choice::display`] and
/// [`Choice::from_display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The selectable value
    pub value: String,
    /// Originating parent, when resolved through a multi-valued dependency
    pub parent: Option<ParentRef>,
}

impl Choice {
    /// A plain, untagged choice
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            parent: None,
        }
    }

    /// A choice tagged with its originating parent
    pub fn tagged(
        value: impl Into<String>,
        parent_key: impl Into<String>,
        parent_value: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            parent: Some(ParentRef {
                key: parent_key.into(),
                value: parent_value.into(),
            }),
        }
    }

    /// Format for presentation: `"<parent>: <child>"` when tagged
    pub fn display(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}{}{}", parent.value, HIERARCHY_SEPARATOR, self.value),
            None => self.value.clone(),
        }
    }

    /// Parse a display-form selection back into a structured choice
    ///
    /// The separator is only treated as a tag when the question actually has
    /// a dynamic parent; otherwise the whole string is the value.
    pub fn from_display(raw: &str, parent_key: Option<&str>) -> Self {
        if let Some(key) = parent_key {
            if let Some((parent_value, value)) = raw.split_once(HIERARCHY_SEPARATOR) {
                return Self::tagged(value, key, parent_value);
            }
        }
        Self::plain(raw)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Resolve the available choices for a question given the answers so far
pub fn resolve_choices(key: &str, spec: &QuestionSpec, answers: &Answers) -> Result<Vec<Choice>> {
    match &spec.choices {
        Value::Sequence(values) => values
            .iter()
            .map(|value| {
                scalar_to_string(value)
                    .map(Choice::plain)
                    .ok_or_else(|| Error::invalid_choices(key, "choice values must be scalars"))
            })
            .collect(),
        Value::Mapping(_) => {
            let dynamic = spec.dynamic().ok_or_else(|| Error::MissingDynamicConfig {
                question: key.to_string(),
            })?;

            let mut choices = Vec::new();
            let mut seen = HashSet::new();
            descend(
                key,
                &spec.choices,
                &dynamic.dependency_questions,
                answers,
                &mut choices,
                &mut seen,
            )?;
            Ok(choices)
        }
        _ => Err(Error::invalid_choices(
            key,
            "choices must be a list or a dependency-keyed mapping",
        )),
    }
}

/// One descent step: consume the next dependency, fanning out across every
/// selected value of a multi-valued answer
fn descend(
    question: &str,
    node: &Value,
    deps: &[String],
    answers: &Answers,
    out: &mut Vec<Choice>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    let Some((dep, rest)) = deps.split_first() else {
        // Dependencies exhausted: only a leaf list is acceptable here
        return match node {
            Value::Sequence(values) => emit(question, values, None, out, seen),
            _ => Err(Error::UnresolvedDependencies {
                question: question.to_string(),
            }),
        };
    };

    let mapping = node.as_mapping().ok_or_else(|| {
        Error::invalid_choices(question, format!("expected a mapping keyed by '{dep}' answers"))
    })?;

    let answer = answers
        .get(dep)
        .ok_or_else(|| Error::dependency_answer_not_found(question, dep))?;
    let values = answer.values();
    let fan_out = values.len() > 1;

    for value in values {
        let next = mapping
            .iter()
            .find(|(k, _)| scalar_to_string(k).as_deref() == Some(value))
            .map(|(_, v)| v);

        match next {
            // Fan-out skips parents with no entry; a single-valued miss is an error
            None if fan_out => continue,
            None => return Err(Error::no_choices_for_answer(dep, value)),
            Some(Value::Sequence(leaf)) => {
                let parent = fan_out.then(|| ParentRef {
                    key: dep.clone(),
                    value: value.clone(),
                });
                emit(question, leaf, parent, out, seen)?;
            }
            Some(next @ Value::Mapping(_)) => {
                descend(question, next, rest, answers, out, seen)?;
            }
            Some(_) => {
                return Err(Error::invalid_choices(
                    question,
                    format!("invalid nested choices for {dep} = {value}"),
                ));
            }
        }
    }

    Ok(())
}

/// Append leaf choices, de-duplicating on the display form
fn emit(
    question: &str,
    values: &[Value],
    parent: Option<ParentRef>,
    out: &mut Vec<Choice>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    for value in values {
        let value = scalar_to_string(value)
            .ok_or_else(|| Error::invalid_choices(question, "choice values must be scalars"))?;
        let choice = Choice {
            value,
            parent: parent.clone(),
        };
        if seen.insert(choice.display()) {
            out.push(choice);
        }
    }
    Ok(())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Answer;

    fn spec(yaml: &str) -> QuestionSpec {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn displays(choices: &[Choice]) -> Vec<String> {
        choices.iter().map(Choice::display).collect()
    }

    #[test]
    fn test_flat_choices_returned_verbatim() {
        let spec = spec(
            r#"
prompt: "Which app?"
choices: [deployment, job, 8080, true]
"#,
        );
        let choices = resolve_choices("app", &spec, &Answers::new()).unwrap();
        assert_eq!(displays(&choices), ["deployment", "job", "8080", "true"]);
        assert!(choices.iter().all(|c| c.parent.is_none()));
    }

    #[test]
    fn test_flat_choices_ignore_prior_answers() {
        let spec = spec(
            r#"
prompt: "Which app?"
choices: [deployment, job]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("env".to_string(), Answer::Single("dev".to_string()));

        let choices = resolve_choices("app", &spec, &answers).unwrap();
        assert_eq!(displays(&choices), ["deployment", "job"]);
    }

    #[test]
    fn test_dynamic_single_dependency() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  dynamic:
    dependency_questions: [env]
choices:
  dev: [dev-cluster-1, dev-cluster-2]
  staging: [staging-cluster-1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("env".to_string(), Answer::Single("dev".to_string()));

        let choices = resolve_choices("cluster", &spec, &answers).unwrap();
        assert_eq!(displays(&choices), ["dev-cluster-1", "dev-cluster-2"]);
    }

    #[test]
    fn test_dynamic_single_element_multi_answer_navigates_untagged() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  dynamic:
    dependency_questions: [env]
choices:
  dev: [c1, c2]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("env".to_string(), Answer::Multi(vec!["dev".to_string()]));

        let choices = resolve_choices("cluster", &spec, &answers).unwrap();
        assert_eq!(displays(&choices), ["c1", "c2"]);
        assert!(choices[0].parent.is_none());
    }

    #[test]
    fn test_dynamic_multi_dependency_union_with_tags() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  multiple: true
  dynamic:
    dependency_questions: [env]
choices:
  dev: [dev-cluster-1, dev-cluster-2]
  staging: [staging-cluster-1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert(
            "env".to_string(),
            Answer::Multi(vec!["dev".to_string(), "staging".to_string()]),
        );

        let choices = resolve_choices("cluster", &spec, &answers).unwrap();
        assert_eq!(
            displays(&choices),
            [
                "dev: dev-cluster-1",
                "dev: dev-cluster-2",
                "staging: staging-cluster-1"
            ]
        );
        assert_eq!(
            choices[0].parent,
            Some(ParentRef {
                key: "env".to_string(),
                value: "dev".to_string()
            })
        );
    }

    #[test]
    fn test_dynamic_multi_dependency_deduplicates() {
        let spec = spec(
            r#"
prompt: "Which size?"
type:
  multiple: true
  dynamic:
    dependency_questions: [env]
choices:
  dev: [small, medium]
  staging: [medium, large]
"#,
        );
        let mut answers = Answers::new();
        answers.insert(
            "env".to_string(),
            Answer::Multi(vec!["dev".to_string(), "staging".to_string()]),
        );

        let choices = resolve_choices("size", &spec, &answers).unwrap();
        // Tagged values differ per parent, so nothing collapses here; but the
        // same (parent, value) pair never repeats
        assert_eq!(choices.len(), 4);

        // And untagged duplicates do collapse: first-seen order wins
        let mut answers = Answers::new();
        answers.insert("env".to_string(), Answer::Single("dev".to_string()));
        let choices = resolve_choices("size", &spec, &answers).unwrap();
        assert_eq!(displays(&choices), ["small", "medium"]);
    }

    #[test]
    fn test_dynamic_multi_dependency_skips_missing_parents() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  multiple: true
  dynamic:
    dependency_questions: [env]
choices:
  dev: [c1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert(
            "env".to_string(),
            Answer::Multi(vec!["dev".to_string(), "prod".to_string()]),
        );

        let choices = resolve_choices("cluster", &spec, &answers).unwrap();
        assert_eq!(displays(&choices), ["dev: c1"]);
    }

    #[test]
    fn test_dynamic_two_level_chain() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  dynamic:
    dependency_questions: [app, env]
choices:
  web:
    dev: [web-dev-1]
    staging: [web-staging-1]
  batch:
    dev: [batch-dev-1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("app".to_string(), Answer::Single("web".to_string()));
        answers.insert("env".to_string(), Answer::Single("staging".to_string()));

        let choices = resolve_choices("cluster", &spec, &answers).unwrap();
        assert_eq!(displays(&choices), ["web-staging-1"]);
    }

    #[test]
    fn test_dynamic_two_level_chain_with_multi_leaf_step() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  multiple: true
  dynamic:
    dependency_questions: [app, env]
choices:
  web:
    dev: [web-dev-1]
    staging: [web-staging-1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("app".to_string(), Answer::Single("web".to_string()));
        answers.insert(
            "env".to_string(),
            Answer::Multi(vec!["dev".to_string(), "staging".to_string()]),
        );

        let choices = resolve_choices("cluster", &spec, &answers).unwrap();
        assert_eq!(displays(&choices), ["dev: web-dev-1", "staging: web-staging-1"]);
    }

    #[test]
    fn test_missing_dependency_answer_is_an_error() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  dynamic:
    dependency_questions: [env]
choices:
  dev: [c1]
"#,
        );
        let result = resolve_choices("cluster", &spec, &Answers::new());
        assert!(matches!(
            result,
            Err(Error::DependencyAnswerNotFound { question, dependency })
                if question == "cluster" && dependency == "env"
        ));
    }

    #[test]
    fn test_unknown_single_answer_is_an_error() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  dynamic:
    dependency_questions: [env]
choices:
  dev: [c1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("env".to_string(), Answer::Single("prod".to_string()));

        let result = resolve_choices("cluster", &spec, &answers);
        assert!(matches!(
            result,
            Err(Error::NoChoicesForAnswer { dependency, value })
                if dependency == "env" && value == "prod"
        ));
    }

    #[test]
    fn test_mapping_without_dynamic_config_is_an_error() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
choices:
  dev: [c1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("env".to_string(), Answer::Single("dev".to_string()));

        let result = resolve_choices("cluster", &spec, &answers);
        assert!(matches!(result, Err(Error::MissingDynamicConfig { .. })));
    }

    #[test]
    fn test_unconsumed_nesting_is_an_error() {
        // Only one dependency declared, but two mapping levels present
        let spec = spec(
            r#"
prompt: "Which cluster?"
type:
  dynamic:
    dependency_questions: [env]
choices:
  dev:
    region-a: [c1]
"#,
        );
        let mut answers = Answers::new();
        answers.insert("env".to_string(), Answer::Single("dev".to_string()));

        let result = resolve_choices("cluster", &spec, &answers);
        assert!(matches!(result, Err(Error::UnresolvedDependencies { .. })));
    }

    #[test]
    fn test_scalar_choices_value_is_an_error() {
        let spec = spec(
            r#"
prompt: "Which cluster?"
choices: 42
"#,
        );
        let result = resolve_choices("cluster", &spec, &Answers::new());
        assert!(matches!(result, Err(Error::InvalidChoices { .. })));
    }

    #[test]
    fn test_choice_display_round_trip_at_boundary() {
        let tagged = Choice::tagged("c1", "env", "dev");
        assert_eq!(tagged.display(), "dev: c1");
        assert_eq!(Choice::from_display("dev: c1", Some("env")), tagged);

        // Without a dynamic parent the separator is plain data
        let plain = Choice::from_display("dev: c1", None);
        assert_eq!(plain, Choice::plain("dev: c1"));
    }
}
