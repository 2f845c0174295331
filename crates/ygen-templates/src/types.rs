//! Template data model
//!
//! A template is loaded fresh per generation run, never mutated, and
//! discarded after rendering. All fields hold unrendered Tera template
//! strings.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A loaded template, ready to render against one combination
#[derive(Debug, Clone)]
pub enum Template {
    /// Single-file template: path/filename/content triple
    File(FileTemplate),
    /// Directory template: shared base path plus member files
    Directory(DirectoryTemplate),
}

/// Single-file template parsed from a header + body resource
#[derive(Debug, Clone)]
pub struct FileTemplate {
    /// Output directory template (`path:` directive)
    pub path: String,
    /// Output filename template (`filename:` directive)
    pub filename: String,
    /// Body template
    pub content: String,
}

/// Directory template assembled from a manifest and member files
#[derive(Debug, Clone)]
pub struct DirectoryTemplate {
    /// Output base-path template shared by every member
    pub base_path: String,
    /// Member templates keyed by their name inside the template directory
    pub files: BTreeMap<String, MemberTemplate>,
}

/// One member of a directory template
#[derive(Debug, Clone)]
pub struct MemberTemplate {
    /// Output filename template
    pub filename: String,
    /// Body template (the member file's raw content)
    pub content: String,
    /// Optional enable-condition template; the member is included only when
    /// it renders to `"true"`
    pub enabled: Option<String>,
}

/// On-disk manifest of a directory template (`.template.yaml`)
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryManifest {
    pub output: ManifestOutput,
    pub files: BTreeMap<String, ManifestFile>,
}

/// `output` section of a directory manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestOutput {
    pub base_path: String,
}

/// One `files.<member>` entry of a directory manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestFile {
    pub filename: String,
    #[serde(default)]
    pub enabled: Option<String>,
}

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Output directory, relative to the working directory
    pub path: String,
    /// Output filename
    pub filename: String,
    /// Rendered content
    pub content: String,
}

impl RenderedFile {
    /// The full relative output path
    pub fn full_path(&self) -> String {
        if self.path.is_empty() {
            self.filename.clone()
        } else {
            format!("{}/{}", self.path.trim_end_matches('/'), self.filename)
        }
    }
}

/// All files produced by rendering one template against one combination
#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    pub files: Vec<RenderedFile>,
}
