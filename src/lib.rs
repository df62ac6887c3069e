//! Compiler for the model definition language: schema files in, Rust
//! observable-model modules out. The generated code binds against the
//! `mdl-runtime` crate.
pub mod ast;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod project;
pub mod scanner;
pub mod type_tree;

pub use config::GenerationConfig;
pub use error::{GenerateError, SchemaError, SchemaErrorKind};
pub use parser::parse;
pub use type_tree::TypeTree;
