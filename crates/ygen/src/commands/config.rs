//! Config command - validation and display of the question graph

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use ygen_core::config::{Config, PreviewConfig, TEMPLATE_DIR};
use ygen_core::{QuestionGraph, TemplateEntry};

use crate::cli::{ConfigCommands, ConfigShowArgs, ConfigValidateArgs};
use crate::output;

pub fn run(command: ConfigCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match command {
        ConfigCommands::Validate(args) => validate(args, config_path),
        ConfigCommands::Show(args) => show(args, config_path),
    }
}

fn validate(args: ConfigValidateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let workdir = Utf8PathBuf::from(".");
    let path = args.file.as_deref().or(config_path);
    let config = Config::load(&workdir, path)?;

    output::info(&format!("Validating {}", config.config_path));

    let problems = check_graph(&config.graph);
    for problem in &problems {
        output::error(problem);
    }

    check_registry(&config.templates, &workdir);

    if config.graph.template_question().is_none() {
        output::warning(
            "No template_question configured; the first single-select answer \
             will be used as the template name (legacy heuristic)",
        );
    }

    if !problems.is_empty() {
        bail!("Configuration has {} problem(s)", problems.len());
    }

    output::success(&format!(
        "Configuration valid ({} question(s), {} registered template(s))",
        config.graph.order().len(),
        config.templates.len()
    ));
    Ok(())
}

/// Structural checks beyond what normalization enforces
fn check_graph(graph: &QuestionGraph) -> Vec<String> {
    let mut problems = Vec::new();

    for (index, (key, spec)) in graph.iter().enumerate() {
        let is_mapping = spec.choices.is_mapping();

        if is_mapping && spec.dynamic().is_none() {
            problems.push(format!(
                "Question '{key}' has dependency-keyed choices but no dynamic configuration"
            ));
        }
        if !is_mapping && spec.dynamic().is_some() {
            problems.push(format!(
                "Question '{key}' has a dynamic configuration but flat choices"
            ));
        }

        if let Some(dynamic) = spec.dynamic() {
            for dependency in &dynamic.dependency_questions {
                match graph.order().iter().position(|k| k == dependency) {
                    None => problems.push(format!(
                        "Question '{key}' depends on unknown question '{dependency}'"
                    )),
                    Some(dep_index) if dep_index >= index => problems.push(format!(
                        "Question '{key}' depends on '{dependency}', which is asked later"
                    )),
                    Some(_) => {}
                }
            }
        }
    }

    problems
}

/// Registered template paths that do not exist are worth a warning, but the
/// registry may legitimately be ahead of the template tree
fn check_registry(registry: &BTreeMap<String, TemplateEntry>, workdir: &Utf8Path) {
    let root = workdir.join(TEMPLATE_DIR);
    for (name, entry) in registry {
        let path = root.join(&entry.path);
        if !path.exists() {
            output::warning(&format!("Template '{name}' points at missing path {path}"));
        }
    }
}

#[derive(Serialize)]
struct ConfigView<'a> {
    questions: &'a QuestionGraph,
    templates: &'a BTreeMap<String, TemplateEntry>,
    preview: &'a PreviewConfig,
}

fn show(args: ConfigShowArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let workdir = Utf8PathBuf::from(".");
    let config = Config::load(&workdir, config_path)?;

    let view = ConfigView {
        questions: &config.graph,
        templates: &config.templates,
        preview: &config.preview,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", serde_yaml_ng::to_string(&view)?);
    }
    Ok(())
}
