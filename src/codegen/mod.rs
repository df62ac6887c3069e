//! Rust source emission for one parsed schema file.
//!
//! Output is a pure function of the file, the type tree and the
//! configuration: identical input gives byte-identical text.
use std::path::Path;

use crate::ast::ModelFile;
use crate::config::GenerationConfig;
use crate::error::GenerateError;
use crate::type_tree::TypeTree;

mod class;
mod locator;
pub mod naming;
pub mod template;

use template::{combine_sections, normalize_line_endings, render};

/// Shared state of one emission run.
pub(crate) struct Emitter<'t, 'a> {
    tree: &'t TypeTree<'a>,
    config: &'t GenerationConfig,
}

impl Emitter<'_, '_> {
    fn runtime(&self) -> &str {
        &self.config.runtime_crate
    }
}

/// Generate the Rust module for `file`.
pub fn generate(tree: &TypeTree<'_>, file: &ModelFile, config: &GenerationConfig) -> Result<String, GenerateError> {
    let emitter = Emitter { tree, config };
    let mut sections = Vec::new();
    for declaration in &file.enums {
        sections.push(emitter.enum_decl(&declaration.name, &declaration.definition));
    }
    for declaration in &file.classes {
        sections.push(emitter.class_decl(
            &declaration.name,
            &declaration.definition,
            &declaration.attributes,
            &mut Vec::new(),
        ));
    }
    if let Some(locators) = emitter.locators(file)? {
        sections.push(locators);
    }
    let text = render(template::FILE, &[("Body", &combine_sections(&sections))]);
    Ok(normalize_line_endings(&text, config.line_ending))
}

/// Suffix of every file module. Class modules are plain snake case, so the
/// suffix keeps `common.model` from shadowing the module of class `Common`.
pub const FILE_MODULE_SUFFIX: &str = "_mdl";

/// Module name of a generated file: its relative path without extension,
/// separators turned into `_`, then [`FILE_MODULE_SUFFIX`].
pub fn file_module_ident(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let joined = stem
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("_");
    let cleaned: String = joined
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{}{FILE_MODULE_SUFFIX}", naming::snake_case(&cleaned))
}

/// The namespace `mod.rs` mounting every generated file module. `modules`
/// pairs the `#[path]` of each file (relative, `/`-separated) with its
/// module name.
pub fn namespace_module(modules: &[(String, String)], config: &GenerationConfig) -> String {
    let namespace = if config.namespace.is_empty() {
        String::new()
    } else {
        format!(" for namespace `{}`", config.namespace)
    };
    let entries: Vec<String> = modules
        .iter()
        .map(|(path, module)| render(template::MODULE_ENTRY, &[("Path", path), ("Module", module)]))
        .collect();
    let text = render(template::NAMESPACE_MODULE, &[
        ("Namespace", &namespace),
        ("Body", &combine_sections(&entries)),
    ]);
    normalize_line_endings(&text, config.line_ending)
}
