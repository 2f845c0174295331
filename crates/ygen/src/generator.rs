//! The generation workflow
//!
//! Walks the question graph in order, collects answers (from CLI flags or
//! the prompter), determines the template, expands multi-select answers into
//! combinations, and renders everything before the first write so a render
//! failure can never leave partial output. Cancellation is checked at each
//! question boundary and before each file write.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use console::style;
use tracing::debug;

use ygen_core::config::{Config, TEMPLATE_DIR};
use ygen_core::{
    determine_template_and_multi_values, expand_combinations, parse_raw_answer, resolve_choices,
    Answer, Answers, Choice,
};
use ygen_prompt::Prompter;
use ygen_templates::{render, RenderedFile, TemplateLocator};

use crate::output;

/// Options controlling one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Raw answers supplied on the command line, keyed by question key
    pub answers: BTreeMap<String, String>,

    /// Skip prompting entirely; every question must be answered up front
    pub assume_yes: bool,

    /// Show the preview but write nothing
    pub dry_run: bool,
}

/// Runs the question/render/write workflow
pub struct Generator<'a> {
    config: Config,
    prompter: &'a dyn Prompter,
    workdir: Utf8PathBuf,
    cancel: Arc<AtomicBool>,
}

impl<'a> Generator<'a> {
    pub fn new(
        config: Config,
        prompter: &'a dyn Prompter,
        workdir: impl Into<Utf8PathBuf>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            prompter,
            workdir: workdir.into(),
            cancel,
        }
    }

    /// Execute the generation workflow
    pub fn run(&self, options: &GenerateOptions) -> Result<()> {
        self.check_cancelled()?;

        let mut answers = self.seed_answers(&options.answers);

        if options.assume_yes {
            self.validate_complete(&answers)?;
        } else {
            self.collect_answers(&mut answers)?;
        }

        let (template_name, multi_values) =
            determine_template_and_multi_values(&self.config.graph, &answers)?;
        debug!("Resolved template name '{}'", template_name);

        let locator = TemplateLocator::new(
            self.workdir.join(TEMPLATE_DIR),
            self.config.templates.clone(),
        );
        let template = locator.load(&template_name)?;

        let combinations = expand_combinations(&self.config.graph, &answers, &multi_values);
        debug!("Expanded {} combination(s)", combinations.len());

        // Render every combination up front: a template defect aborts the
        // run before anything touches the output tree
        let mut rendered = Vec::new();
        for combination in &combinations {
            rendered.extend(render(&template, combination)?.files);
        }

        if self.config.preview.enabled {
            self.show_preview(&rendered);
        }

        if options.dry_run {
            output::info("Dry run: no files written");
            return Ok(());
        }

        if !options.assume_yes {
            let confirmed = self
                .prompter
                .confirm("Do you want to proceed with file generation?")?;
            if !confirmed {
                output::info("Generation cancelled");
                return Ok(());
            }
        }

        self.write_files(&rendered)?;

        if !options.assume_yes {
            self.show_cli_example(&answers);
        }

        output::success("generated!");
        Ok(())
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(ygen_core::Error::Cancelled.into());
        }
        Ok(())
    }

    /// Convert raw CLI answers into typed answers for known questions
    fn seed_answers(&self, raw: &BTreeMap<String, String>) -> Answers {
        let mut answers = Answers::new();
        for (key, value) in raw {
            match self.config.graph.get(key) {
                Some(spec) => {
                    answers.insert(key.clone(), parse_raw_answer(value, spec.is_multiple()));
                }
                None => output::warning(&format!("Ignoring answer for unknown question '{key}'")),
            }
        }
        answers
    }

    /// Every question must be answered when prompting is skipped
    fn validate_complete(&self, answers: &Answers) -> Result<()> {
        for key in self.config.graph.order() {
            if !answers.contains_key(key) {
                return Err(ygen_core::Error::unanswered_question(key).into());
            }
        }
        Ok(())
    }

    /// Ask the remaining questions in graph order
    fn collect_answers(&self, answers: &mut Answers) -> Result<()> {
        for (key, spec) in self.config.graph.iter() {
            self.check_cancelled()?;

            // Already answered via CLI flag
            if answers.contains_key(key) {
                continue;
            }

            let choices = resolve_choices(key, spec, answers)?;
            let options: Vec<String> = choices.iter().map(Choice::display).collect();

            let answer = if spec.is_multiple() {
                Answer::Multi(self.prompter.multi_select(&spec.prompt, &options)?)
            } else if spec.is_interactive() {
                Answer::Single(self.prompter.search(&spec.prompt, &options)?)
            } else {
                Answer::Single(self.prompter.select(&spec.prompt, &options)?)
            };

            answers.insert(key.to_string(), answer);
        }
        Ok(())
    }

    fn show_preview(&self, rendered: &[RenderedFile]) {
        output::header("Output:");
        for file in rendered {
            println!("{} {}\n", style("*").cyan().bold(), file.full_path());
            for line in file.content.lines().filter(|line| !line.is_empty()) {
                println!("{line}");
            }
            println!();
        }
    }

    /// Write each rendered file through a temp file + atomic rename
    fn write_files(&self, rendered: &[RenderedFile]) -> Result<()> {
        for file in rendered {
            self.check_cancelled()?;

            let dir = self.workdir.join(&file.path);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {dir}"))?;

            let target = dir.join(&file.filename);
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)
                .with_context(|| format!("Failed to create temp file in {dir}"))?;
            tmp.write_all(file.content.as_bytes())
                .with_context(|| format!("Failed to write {target}"))?;
            tmp.persist(&target)
                .with_context(|| format!("Failed to persist {target}"))?;

            debug!("Wrote {}", target);
        }
        Ok(())
    }

    /// Show the non-interactive equivalent of this session
    fn show_cli_example(&self, answers: &Answers) {
        output::header("CLI Example:");
        let mut command = String::from("ygen generate --yes");
        for key in self.config.graph.order() {
            if let Some(answer) = answers.get(key) {
                let value = match answer {
                    Answer::Single(value) => value.clone(),
                    Answer::Multi(values) => values.join(","),
                };
                command.push_str(&format!(" --answer {key}={value}"));
            }
        }
        println!("{command}\n");
    }
}
