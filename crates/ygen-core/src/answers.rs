//! Typed answer values collected from prompts or CLI flags
//!
//! Answers were an untyped `map[string]interface{}` in earlier tooling; the
//! discriminated union here removes the runtime type assertions. A
//! multi-select question always stores `Multi` (even for one selection) and
//! a single-select question always stores `Single`.

use std::collections::BTreeMap;

use serde::Serialize;

/// One answer value: a scalar or an ordered list of selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// Single-select answer
    Single(String),
    /// Multi-select answer, in selection order
    Multi(Vec<String>),
}

impl Answer {
    /// View the answer as a slice of values regardless of multiplicity
    pub fn values(&self) -> &[String] {
        match self {
            Answer::Single(value) => std::slice::from_ref(value),
            Answer::Multi(values) => values,
        }
    }

    /// The scalar value, if this is a single-select answer
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Answer::Single(value) => Some(value),
            Answer::Multi(_) => None,
        }
    }

    /// The selection list, if this is a multi-select answer
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Answer::Single(_) => None,
            Answer::Multi(values) => Some(values),
        }
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Single(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(values: Vec<String>) -> Self {
        Answer::Multi(values)
    }
}

/// Collected answers keyed by question key
///
/// BTreeMap keeps iteration deterministic, which keeps combination
/// enumeration and preview output stable across runs.
pub type Answers = BTreeMap<String, Answer>;

/// Delimiter used when multi-select answers are supplied on the command line
pub const MULTI_VALUE_DELIMITER: char = ',';

/// Parse a raw CLI-supplied answer string into an [`Answer`]
///
/// Multi-select questions accept delimiter-joined values
/// (`--answer env=dev,staging`); single-select questions take the string
/// verbatim.
pub fn parse_raw_answer(raw: &str, multiple: bool) -> Answer {
    if multiple {
        Answer::Multi(
            raw.split(MULTI_VALUE_DELIMITER)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
        )
    } else {
        Answer::Single(raw.to_string())
    }
}
