//! Template location and loading
//!
//! Template names resolve through the optional registry from the config
//! document (`templates.<name> = {type, path}`); unregistered names fall
//! back to a direct file path under the template root, with a `.yaml`
//! extension appended when the name has none.

use std::collections::BTreeMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use ygen_core::{TemplateEntry, TemplateKind};

use crate::error::{Error, Result};
use crate::types::{
    DirectoryManifest, DirectoryTemplate, FileTemplate, MemberTemplate, Template,
};

/// Manifest filename inside a directory template
const DIRECTORY_MANIFEST: &str = ".template.yaml";

/// Resolves template names to loaded [`Template`]s
#[derive(Debug, Clone)]
pub struct TemplateLocator {
    root: Utf8PathBuf,
    registry: BTreeMap<String, TemplateEntry>,
}

impl TemplateLocator {
    /// Create a locator over a template root directory and registry
    pub fn new(root: impl Into<Utf8PathBuf>, registry: BTreeMap<String, TemplateEntry>) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    /// Load the template for a resolved template name
    pub fn load(&self, name: &str) -> Result<Template> {
        match self.registry.get(name) {
            Some(entry) => {
                debug!("Template '{}' registered as {:?}", name, entry.kind);
                match entry.kind {
                    TemplateKind::File => self.load_file(&entry.path),
                    TemplateKind::Directory => self.load_directory(&entry.path),
                }
            }
            None => {
                // Unregistered names are direct file paths
                let path = if Utf8Path::new(name).extension().is_some() {
                    name.to_string()
                } else {
                    format!("{name}.yaml")
                };
                debug!("Template '{}' not registered; loading file {}", name, path);
                self.load_file(&path)
            }
        }
    }

    /// Load a single-file template: directive header, `---` line, body
    fn load_file(&self, path: &str) -> Result<Template> {
        let full_path = self.root.join(path);
        let content = fs::read_to_string(&full_path)
            .map_err(|e| Error::read_failed(full_path.as_str(), e))?;

        let (header, body) = split_on_separator(&content)
            .ok_or_else(|| Error::missing_separator(full_path.as_str()))?;

        let mut dir_template = None;
        let mut filename = None;
        for line in header.lines() {
            let line = line.trim();
            if let Some(value) = line.strip_prefix("path:") {
                dir_template = Some(value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("filename:") {
                filename = Some(value.trim().to_string());
            }
        }

        Ok(Template::File(FileTemplate {
            path: dir_template
                .ok_or_else(|| Error::missing_directive(full_path.as_str(), "path"))?,
            filename: filename
                .ok_or_else(|| Error::missing_directive(full_path.as_str(), "filename"))?,
            content: body.trim().to_string(),
        }))
    }

    /// Load a directory template: manifest plus raw member contents
    fn load_directory(&self, dir: &str) -> Result<Template> {
        let template_dir = self.root.join(dir);
        let manifest_path = template_dir.join(DIRECTORY_MANIFEST);

        let manifest_content = fs::read_to_string(&manifest_path)
            .map_err(|e| Error::read_failed(manifest_path.as_str(), e))?;
        let manifest: DirectoryManifest = serde_yaml_ng::from_str(&manifest_content)
            .map_err(|e| Error::ManifestParse {
                path: manifest_path.to_string(),
                source: e,
            })?;

        let mut files = BTreeMap::new();
        for (member, file_config) in manifest.files {
            let member_path = template_dir.join(&member);
            let content = fs::read_to_string(&member_path)
                .map_err(|e| Error::read_failed(member_path.as_str(), e))?;

            files.insert(
                member,
                MemberTemplate {
                    filename: file_config.filename,
                    content,
                    enabled: file_config.enabled,
                },
            );
        }

        Ok(Template::Directory(DirectoryTemplate {
            base_path: manifest.output.base_path,
            files,
        }))
    }
}

/// Split template content on the first line containing only `---`
fn split_on_separator(content: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == "---" {
            return Some((&content[..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
