//! Error types for ygen-core

use thiserror::Error;

/// Result type alias using ygen-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for ygen
///
/// Everything here is terminal for the current generation run: the causes
/// are static configuration defects that retrying cannot fix.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found at an explicit path
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// No configuration file in any default location
    #[error("No config file found in default locations ({searched})")]
    NoConfigFound { searched: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// The questions section has neither `definitions` nor an inline map
    #[error("No question definitions found in config")]
    NoQuestionDefinitions,

    /// `order` lists a question that has no definition
    #[error("Question '{question}' is listed in order but has no definition")]
    UnknownQuestion { question: String },

    /// A defined question is missing from an explicit `order`
    #[error("Question '{question}' is defined but not listed in order")]
    UnorderedQuestion { question: String },

    /// Choices value has an unusable shape for the question
    #[error("Invalid choices for question '{question}': {message}")]
    InvalidChoices { question: String, message: String },

    /// Mapping-shaped choices without a dynamic descriptor
    #[error("Question '{question}' has dependency-keyed choices but no dynamic configuration")]
    MissingDynamicConfig { question: String },

    /// A dynamic question's dependency has not been answered yet
    #[error("Dependency answer for '{dependency}' not found (required by question '{question}')")]
    DependencyAnswerNotFound { question: String, dependency: String },

    /// A single-valued dependency answer does not key into the choices map
    #[error("No choices found for {dependency} = {value}")]
    NoChoicesForAnswer { dependency: String, value: String },

    /// Dependency list exhausted while mapping levels remain
    #[error("Incomplete dependency resolution for question '{question}': nested choices remain after all dependencies")]
    UnresolvedDependencies { question: String },

    /// The configured template question has no answer
    #[error("Template question '{question}' not answered")]
    TemplateQuestionUnanswered { question: String },

    /// The configured template question produced a list answer
    #[error("Template question '{question}' must have a single string answer")]
    TemplateQuestionNotScalar { question: String },

    /// No scalar-valued answer available to name the template
    #[error("No suitable template type found in answers")]
    NoTemplateType,

    /// A question was left unanswered in non-interactive mode
    #[error("Answer for question '{question}' is required")]
    UnansweredQuestion { question: String },

    /// The user interrupted the run
    #[error("Operation cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid choices error
    pub fn invalid_choices(question: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidChoices {
            question: question.into(),
            message: message.into(),
        }
    }

    /// Create a missing dependency answer error
    pub fn dependency_answer_not_found(
        question: impl Into<String>,
        dependency: impl Into<String>,
    ) -> Self {
        Self::DependencyAnswerNotFound {
            question: question.into(),
            dependency: dependency.into(),
        }
    }

    /// Create a no-choices-for-answer error
    pub fn no_choices_for_answer(
        dependency: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::NoChoicesForAnswer {
            dependency: dependency.into(),
            value: value.into(),
        }
    }

    /// Create an unanswered question error
    pub fn unanswered_question(question: impl Into<String>) -> Self {
        Self::UnansweredQuestion {
            question: question.into(),
        }
    }
}
