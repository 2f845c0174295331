//! Configuration file loading and parsing

mod questions;

pub use questions::{DynamicSpec, QuestionBehavior, QuestionGraph, QuestionSpec, QuestionsSection};

use std::collections::BTreeMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Configuration file names searched under the config directory
const CONFIG_FILE_NAMES: &[&str] = &["config.yaml", "config.yml"];

/// Directory holding the config file and the template root
pub const CONFIG_DIR: &str = ".ygen";

/// Template root directory, relative to the working directory
pub const TEMPLATE_DIR: &str = ".ygen/templates";

/// Storage type of a registered template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Single template file with a metadata header
    File,
    /// Directory of member templates with a manifest
    Directory,
}

/// One entry of the optional template registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Storage type
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    /// Path relative to the template root
    pub path: String,
}

/// Preview behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Show rendered output before writing (default true)
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// The raw configuration document
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Question graph, canonical or legacy form
    pub questions: QuestionsSection,

    /// Optional template registry (name -> storage type + path)
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateEntry>,

    /// Preview behavior
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Loaded and normalized ygen configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Normalized question graph
    pub graph: QuestionGraph,

    /// Template registry
    pub templates: BTreeMap<String, TemplateEntry>,

    /// Preview behavior
    pub preview: PreviewConfig,

    /// Path the configuration was loaded from
    pub config_path: Utf8PathBuf,
}

impl Config {
    /// Load configuration from an explicit path, or search the default
    /// locations under `workdir` (`.ygen/config.yaml`, `.ygen/config.yml`)
    pub fn load(workdir: &Utf8Path, path: Option<&Utf8Path>) -> Result<Self> {
        let (config_path, content) = if let Some(p) = path {
            let content = fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(p.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            (p.to_owned(), content)
        } else {
            Self::find_config(workdir)?
        };

        debug!("Loading config from {}", config_path);
        Self::parse(&content, config_path)
    }

    /// Parse and normalize a configuration document
    pub fn parse(content: &str, config_path: Utf8PathBuf) -> Result<Self> {
        let file: ConfigFile = serde_yaml_ng::from_str(content)?;
        let graph = file.questions.normalize()?;

        Ok(Self {
            graph,
            templates: file.templates,
            preview: file.preview,
            config_path,
        })
    }

    /// Search the default config locations under `workdir`
    fn find_config(workdir: &Utf8Path) -> Result<(Utf8PathBuf, String)> {
        let mut searched = Vec::new();

        for name in CONFIG_FILE_NAMES {
            let candidate = workdir.join(CONFIG_DIR).join(name);
            match fs::read_to_string(&candidate) {
                Ok(content) => return Ok((candidate, content)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    searched.push(candidate.to_string());
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }

        Err(Error::NoConfigFound {
            searched: searched.join(", "),
        })
    }
}
