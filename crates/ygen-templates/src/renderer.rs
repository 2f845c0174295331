//! Template rendering with Tera
//!
//! Each template fragment (path, filename, content, enable-condition) is
//! rendered independently against a context exposing the combination's
//! answers under `questions`, so templates read `{{ questions.app }}`.
//! Rendering is a pure function over the template and combination; nothing
//! touches the filesystem here.

use tera::{Context, Tera};
use tracing::debug;
use ygen_core::Combination;

use crate::error::{Error, Result};
use crate::types::{DirectoryTemplate, FileTemplate, RenderResult, RenderedFile, Template};

/// Render a template against one combination, producing all output files
pub fn render(template: &Template, combination: &Combination) -> Result<RenderResult> {
    let mut context = Context::new();
    context.insert("questions", combination);

    match template {
        Template::File(file) => render_file(file, &context),
        Template::Directory(directory) => render_directory(directory, &context),
    }
}

fn render_file(template: &FileTemplate, context: &Context) -> Result<RenderResult> {
    let path = render_fragment("path", &template.path, context)?;
    let filename = render_fragment("filename", &template.filename, context)?;
    let content = render_fragment("content", &template.content, context)?;

    Ok(RenderResult {
        files: vec![RenderedFile {
            path,
            filename,
            content,
        }],
    })
}

fn render_directory(template: &DirectoryTemplate, context: &Context) -> Result<RenderResult> {
    let base_path = render_fragment("base_path", &template.base_path, context)?;

    let mut result = RenderResult::default();
    for (member, file) in &template.files {
        if let Some(condition) = &file.enabled {
            let enabled =
                render_fragment(&format!("{member}.enabled"), condition, context)?;
            if enabled.trim() != "true" {
                debug!("Skipping member '{}': enabled = {}", member, enabled.trim());
                continue;
            }
        }

        let filename =
            render_fragment(&format!("{member}.filename"), &file.filename, context)?;
        let content = render_fragment(&format!("{member}.content"), &file.content, context)?;

        result.files.push(RenderedFile {
            path: base_path.clone(),
            filename,
            content,
        });
    }

    Ok(result)
}

/// Render one named fragment; errors carry the fragment name so a failure
/// points at the offending template string
fn render_fragment(fragment: &str, template: &str, context: &Context) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(fragment, template)
        .map_err(|e| Error::render(fragment, e))?;
    tera.render(fragment, context)
        .map_err(|e| Error::render(fragment, e))
}
