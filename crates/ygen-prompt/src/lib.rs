//! # ygen-prompt
//!
//! Interactive prompt abstraction for the ygen CLI. The generation engine
//! depends on the [`Prompter`] trait only, so tests can script answers and
//! the dialoguer widgets stay at the binary boundary.

use anyhow::{bail, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, MultiSelect, Select};

/// Asks the user questions. One method per widget shape.
pub trait Prompter {
    /// Select a single option
    fn select(&self, prompt: &str, options: &[String]) -> Result<String>;

    /// Select any number of options, in presentation order
    fn multi_select(&self, prompt: &str, options: &[String]) -> Result<Vec<String>>;

    /// Select a single option with free-text fuzzy filtering
    fn search(&self, prompt: &str, options: &[String]) -> Result<String>;

    /// Yes/no confirmation (defaults to no)
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, prompt: &str, options: &[String]) -> Result<String> {
        ensure_options(prompt, options)?;
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()
            .map_err(map_interrupt)?;
        Ok(options[index].clone())
    }

    fn multi_select(&self, prompt: &str, options: &[String]) -> Result<Vec<String>> {
        ensure_options(prompt, options)?;
        let indices = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .interact()
            .map_err(map_interrupt)?;
        Ok(indices.into_iter().map(|i| options[i].clone()).collect())
    }

    fn search(&self, prompt: &str, options: &[String]) -> Result<String> {
        ensure_options(prompt, options)?;
        let index = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()
            .map_err(map_interrupt)?;
        Ok(options[index].clone())
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(map_interrupt)?;
        Ok(confirmed)
    }
}

fn ensure_options(prompt: &str, options: &[String]) -> Result<()> {
    if options.is_empty() {
        bail!("no choices available for prompt: {prompt}");
    }
    Ok(())
}

/// Ctrl-C inside a raw-mode prompt surfaces as an interrupted IO error;
/// map it to the engine's cancellation error so the exit code is distinct
fn map_interrupt(error: dialoguer::Error) -> anyhow::Error {
    match error {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            ygen_core::Error::Cancelled.into()
        }
        other => other.into(),
    }
}
