//! Whole model sets: discover schema files, generate every file against one
//! shared type tree, write the results.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::ast::ModelFile;
use crate::codegen::{self, naming};
use crate::config::GenerationConfig;
use crate::error::GenerateError;
use crate::parser;
use crate::type_tree::TypeTree;

pub const SCHEMA_EXTENSION: &str = "model";
pub const NAMESPACE_MODULE: &str = "mod.rs";

/// A schema file, `path` relative to the model set root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// Relative paths of every `*.model` file below `root`, sorted.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let pattern = format!(
        "{}/**/*.{SCHEMA_EXTENSION}",
        glob::Pattern::escape(&root.to_string_lossy())
    );
    let mut found = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let relative = path.strip_prefix(root).map(Path::to_path_buf).unwrap_or(path);
        found.push(relative);
    }
    found.sort();
    Ok(found)
}

/// Read and generate the model set at `root`. Keys of the result are output
/// paths relative to the output directory.
pub fn generate(root: &Path, config: &GenerationConfig) -> Result<IndexMap<PathBuf, String>, GenerateError> {
    let paths = discover(root)?;
    tracing::info!(root = %root.display(), files = paths.len(), "discovered schema files");
    let sources = paths
        .into_iter()
        .map(|path| {
            let full = root.join(&path);
            let text = std::fs::read_to_string(&full).map_err(|source| GenerateError::io(full, source))?;
            Ok(SourceFile { path, text })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;
    generate_sources(&sources, config)
}

/// Generate in-memory sources. All or nothing: the first error aborts.
pub fn generate_sources(
    sources: &[SourceFile],
    config: &GenerationConfig,
) -> Result<IndexMap<PathBuf, String>, GenerateError> {
    let files = sources
        .par_iter()
        .map(|source| {
            parser::parse(&source.text, &config.type_mappings)
                .map_err(|error| GenerateError::Schema { path: source.path.clone(), source: error })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;
    let tree = TypeTree::build(&files);

    let mut outputs = IndexMap::new();
    let mut modules: IndexMap<String, &Path> = IndexMap::new();
    let mut entries = Vec::new();
    for (source, file) in sources.iter().zip(&files) {
        let output = source.path.with_extension("rs");
        if output == Path::new(NAMESPACE_MODULE) {
            return Err(GenerateError::OutputCollision {
                output,
                first: source.path.clone(),
                second: PathBuf::from("<namespace module>"),
            });
        }
        let module = codegen::file_module_ident(&source.path);
        if let Some(first) = modules.insert(module.clone(), &source.path) {
            return Err(GenerateError::OutputCollision {
                output: PathBuf::from(format!("module `{module}`")),
                first: first.to_path_buf(),
                second: source.path.clone(),
            });
        }

        tracing::debug!(path = %source.path.display(), "generating");
        let text = codegen::generate(&tree, file, config)?;
        entries.push((module_path(&output), module));
        outputs.insert(output, text);
    }
    check_class_modules(sources, &files, &modules)?;
    outputs.insert(PathBuf::from(NAMESPACE_MODULE), codegen::namespace_module(&entries, config));
    Ok(outputs)
}

/// Replace the generated files in `dir` with `files`.
pub fn write_output(dir: &Path, files: &IndexMap<PathBuf, String>) -> Result<(), GenerateError> {
    if dir.is_dir() {
        let stale = format!("{}/**/*.rs", glob::Pattern::escape(&dir.to_string_lossy()));
        for entry in glob::glob(&stale)? {
            let path = entry?;
            std::fs::remove_file(&path).map_err(|source| GenerateError::io(&path, source))?;
        }
    }
    for (relative, text) in files {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| GenerateError::io(parent, source))?;
        }
        std::fs::write(&path, text).map_err(|source| GenerateError::io(&path, source))?;
    }
    tracing::info!(dir = %dir.display(), files = files.len(), "wrote generated files");
    Ok(())
}

/// Every file module is glob re-exported next to the top-level class
/// modules, so the two must not share a name.
fn check_class_modules(
    sources: &[SourceFile],
    files: &[ModelFile],
    modules: &IndexMap<String, &Path>,
) -> Result<(), GenerateError> {
    for (source, file) in sources.iter().zip(files) {
        for class in &file.classes {
            let module = naming::module_ident(&class.name);
            if let Some(first) = modules.get(&module) {
                return Err(GenerateError::OutputCollision {
                    output: PathBuf::from(format!("module `{module}`")),
                    first: first.to_path_buf(),
                    second: source.path.clone(),
                });
            }
        }
    }
    Ok(())
}

/// `#[path]` form of a relative output path: `/`-separated on every host.
fn module_path(output: &Path) -> String {
    output
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaErrorKind;

    fn source(path: &str, text: &str) -> SourceFile {
        SourceFile { path: PathBuf::from(path), text: text.to_owned() }
    }

    #[test]
    fn types_resolve_across_files() {
        let sources = [
            source("shared.model", "define Shared { int a; }"),
            source("ui/menu.model", "@BindTarget\ndefine Menu { Shared shared; }"),
        ];
        let outputs = generate_sources(&sources, &GenerationConfig::default()).unwrap();
        assert_eq!(
            outputs.keys().collect::<Vec<_>>(),
            [Path::new("shared.rs"), Path::new("ui/menu.rs"), Path::new("mod.rs")]
        );
        let menu = &outputs[Path::new("ui/menu.rs")];
        assert!(menu.contains("    shared: Shared,\n"));
        assert!(menu.contains("pub shared: ::mdl_runtime::ModelLocator<super::Menu, super::Shared>,"));
        let namespace = &outputs[Path::new("mod.rs")];
        assert!(namespace.contains("#[path = \"ui/menu.rs\"]\npub mod ui_menu_mdl;\npub use ui_menu_mdl::*;"));
    }

    #[test]
    fn schema_errors_name_the_file() {
        let sources = [source("good.model", "define A { int x; }"), source("bad.model", "int stray;")];
        let error = generate_sources(&sources, &GenerationConfig::default()).unwrap_err();
        match error {
            GenerateError::Schema { path, source } => {
                assert_eq!(path, Path::new("bad.model"));
                assert_eq!(source.kind, SchemaErrorKind::PropertyAtFileScope("stray".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_mappings_apply_to_every_file() {
        let config = GenerationConfig {
            type_mappings: [("Vector3".to_owned(), "glam.Vec3".to_owned())].into_iter().collect(),
            ..GenerationConfig::default()
        };
        let outputs = generate_sources(&[source("a.model", "define A { Vector3 at; }")], &config).unwrap();
        assert!(outputs[Path::new("a.rs")].contains("    at: glam::Vec3,\n"));
    }

    #[test]
    fn colliding_outputs_are_rejected() {
        let config = GenerationConfig::default();
        let error = generate_sources(&[source("mod.model", "")], &config).unwrap_err();
        assert!(matches!(error, GenerateError::OutputCollision { .. }));

        let sources = [source("ui/main.model", ""), source("ui_main.model", "")];
        let error = generate_sources(&sources, &config).unwrap_err();
        assert_eq!(error.to_string(), "ui/main.model and ui_main.model would both generate module `ui_main_mdl`");

        let sources = [source("game.model", ""), source("ui.model", "define GameMdl { Inner inner { int x; } }")];
        let error = generate_sources(&sources, &config).unwrap_err();
        assert_eq!(error.to_string(), "game.model and ui.model would both generate module `game_mdl`");
    }

    #[test]
    fn file_named_after_a_class_keeps_the_class_module_reachable() {
        let sources = [
            source("common.model", "define Common { Inner inner { int x; } }"),
            source("game.model", "@BindTarget\ndefine Game { Common common; }"),
        ];
        let outputs = generate_sources(&sources, &GenerationConfig::default()).unwrap();
        let namespace = &outputs[Path::new("mod.rs")];
        assert!(namespace.contains("pub mod common_mdl;\npub use common_mdl::*;"), "{namespace}");
        assert!(!namespace.contains("pub mod common;"));
        assert!(outputs[Path::new("common.rs")].contains("pub mod common {\n"));
        let game = &outputs[Path::new("game.rs")];
        assert!(game.contains("pub inner: ::mdl_runtime::ModelLocator<super::Game, super::common::Inner>,"), "{game}");
    }
}
