//! # ygen-templates
//!
//! Template handling for the ygen CLI:
//! - Locating templates through the registry or direct file paths
//! - Parsing single-file templates (directive header + body) and directory
//!   templates (manifest + member files)
//! - Rendering templates against answer combinations with Tera

pub mod error;
pub mod locator;
pub mod renderer;
pub mod types;

pub use error::{Error, Result};
pub use locator::TemplateLocator;
pub use renderer::render;
pub use types::{
    DirectoryTemplate, FileTemplate, MemberTemplate, RenderResult, RenderedFile, Template,
};
