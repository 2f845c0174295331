//! # ygen-core
//!
//! Core library for the ygen CLI providing:
//! - Configuration file parsing and question-graph normalization
//! - Typed answer values (single vs multi-select)
//! - Static and dependency-keyed choice resolution
//! - Template-type determination and combination expansion

pub mod answers;
pub mod choices;
pub mod combinations;
pub mod config;
pub mod error;

pub use answers::{parse_raw_answer, Answer, Answers};
pub use choices::{resolve_choices, Choice, ParentRef};
pub use combinations::{
    determine_template_and_multi_values, expand_combinations, Combination, MultiValues,
};
pub use config::{Config, QuestionGraph, QuestionSpec, TemplateEntry, TemplateKind};
pub use error::{Error, Result};
