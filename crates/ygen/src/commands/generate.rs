//! Generate command - the main question/render/write workflow

use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{bail, Result};
use camino::{Utf8Path, Utf8PathBuf};

use ygen_core::Config;
use ygen_prompt::TerminalPrompter;

use crate::cli::GenerateArgs;
use crate::generator::{GenerateOptions, Generator};

pub fn run(args: GenerateArgs, config_path: Option<&Utf8Path>, cancel: Arc<AtomicBool>) -> Result<()> {
    let workdir = Utf8PathBuf::from(".");
    let config = Config::load(&workdir, config_path)?;

    let options = GenerateOptions {
        answers: parse_answer_flags(&args.answers)?,
        assume_yes: args.yes,
        dry_run: args.dry_run,
    };

    let prompter = TerminalPrompter::new();
    let generator = Generator::new(config, &prompter, workdir, cancel);
    generator.run(&options)
}

/// Parse repeated `--answer key=value` flags
fn parse_answer_flags(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut answers = BTreeMap::new();
    for entry in raw {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("Invalid --answer '{entry}': expected key=value");
        };
        answers.insert(key.trim().to_string(), value.to_string());
    }
    Ok(answers)
}
