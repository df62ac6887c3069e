//! Minimal CLI: generate | ast
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::GenerationConfig;
use crate::project;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile model definition files into observable Rust models and locators
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate Rust modules for every *.model file below a root directory
    Generate(GenerateOut),
    /// parse schema files and print the JSON debug view of their declarations
    Ast(AstOut),
}

#[derive(Args, Debug, Clone)]
struct GenerateOut {
    /// model set root; searched recursively for *.model files
    #[arg(long, short)]
    root: PathBuf,

    /// configuration file (default: the single *.viewmodel file in the root, if any)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// output directory (default: <root>/Generated); previously generated *.rs files are removed
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// print the files that would be written instead of writing them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug, Clone)]
struct AstOut {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// configuration supplying type mappings
    #[arg(long, short)]
    config: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => target.run(),
            Command::Ast(target) => target.run(),
        }
    }
}

impl GenerateOut {
    fn run(&self) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref(), Some(&self.root))?;
        let files = project::generate(&self.root, &config)
            .with_context(|| format!("failed to generate model set {}", self.root.display()))?;
        let out = self.out.clone().unwrap_or_else(|| self.root.join("Generated"));

        if self.dry_run {
            for (path, text) in &files {
                eprintln!("{} {} ({} bytes)", "would write".yellow(), out.join(path).display(), text.len());
            }
            return Ok(());
        }

        project::write_output(&out, &files)?;
        eprintln!(
            "{} {} files into {}",
            "generated".green().bold(),
            files.len(),
            out.display()
        );
        Ok(())
    }
}

impl AstOut {
    fn run(&self) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref(), None)?;
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut parsed = serde_json::Map::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;
            let file = match crate::parser::parse(&source, &config.type_mappings) {
                Ok(file) => file,
                Err(error) => {
                    eprintln!("{} {source_path_str}:{error}", "error".red().bold());
                    bail!("failed to parse {source_path_str}");
                }
            };
            parsed.insert(source_path_str, serde_json::to_value(&file)?);
        }
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn load_config(explicit: Option<&Path>, root: Option<&Path>) -> anyhow::Result<GenerationConfig> {
    let config = match (explicit, root) {
        (Some(path), _) => GenerationConfig::load(path)?,
        (None, Some(root)) => GenerationConfig::discover(root)?,
        (None, None) => GenerationConfig::default(),
    };
    Ok(config)
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
