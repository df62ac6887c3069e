//! Cross-file declaration index used to resolve named type references.
//!
//! The root holds every file's top-level declarations as siblings. Below it,
//! each class node holds its `define` blocks, its inline class bodies (named
//! after the property's declared type) and its enum names.
use indexmap::{IndexMap, IndexSet};

use crate::ast::{ClassDefinition, ModelFile};
use crate::error::GenerateError;

#[derive(Debug, Default)]
pub struct TypeTreeClass<'a> {
    definition: Option<&'a ClassDefinition>,
    classes: IndexMap<String, TypeTreeClass<'a>>,
    enums: IndexSet<String>,
}

#[derive(Debug)]
pub struct TypeTree<'a> {
    root: TypeTreeClass<'a>,
}

/// What a name resolved to, and the full declaration path to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub path: Vec<String>,
    pub kind: ResolvedKind<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedKind<'a> {
    Class(&'a ClassDefinition),
    Enum,
}

impl<'a> TypeTreeClass<'a> {
    fn from_definition(definition: &'a ClassDefinition) -> Self {
        let mut node = Self { definition: Some(definition), ..Self::default() };
        node.add_members(definition);
        node
    }

    fn add_members(&mut self, definition: &'a ClassDefinition) {
        for declaration in &definition.enums {
            self.add_enum(&declaration.name);
        }
        for (name, nested, _) in definition.nested_classes() {
            self.add_class(name, nested);
        }
        for property in &definition.properties {
            if property.inline_enum().is_some() {
                self.add_enum(property.type_name());
            }
        }
    }

    fn add_class(&mut self, name: &str, definition: &'a ClassDefinition) {
        if self.classes.contains_key(name) {
            tracing::warn!(name, "duplicate class declaration; keeping the first");
            return;
        }
        self.classes.insert(name.to_owned(), Self::from_definition(definition));
    }

    fn add_enum(&mut self, name: &str) {
        if !self.enums.insert(name.to_owned()) {
            tracing::warn!(name, "duplicate enum declaration; keeping the first");
        }
    }

    pub fn definition(&self) -> Option<&'a ClassDefinition> {
        self.definition
    }

    pub fn class(&self, name: &str) -> Option<&TypeTreeClass<'a>> {
        self.classes.get(name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }
}

impl<'a> TypeTree<'a> {
    pub fn build<I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a ModelFile>,
    {
        let mut root = TypeTreeClass::default();
        for file in files {
            for declaration in &file.enums {
                root.add_enum(&declaration.name);
            }
            for declaration in &file.classes {
                root.add_class(&declaration.name, &declaration.definition);
            }
        }
        Self { root }
    }

    pub fn root(&self) -> &TypeTreeClass<'a> {
        &self.root
    }

    /// Node at the end of `path`, walking down from the root.
    pub fn find(&self, path: &[String]) -> Option<&TypeTreeClass<'a>> {
        path.iter().try_fold(&self.root, |node, name| node.classes.get(name))
    }

    /// Resolve `query` as seen from inside the class at `scope`: the class
    /// itself first, then each enclosing level out to the root. The
    /// innermost match wins; at one level a class shadows an enum.
    pub fn resolve(&self, scope: &[String], query: &str) -> Result<Resolved<'a>, GenerateError> {
        self.search(scope, query, true)
    }

    /// Like [`Self::resolve`] but only classes count.
    pub fn resolve_class(
        &self,
        scope: &[String],
        query: &str,
    ) -> Result<(Vec<String>, &'a ClassDefinition), GenerateError> {
        match self.search(scope, query, false)? {
            Resolved { path, kind: ResolvedKind::Class(definition) } => Ok((path, definition)),
            Resolved { .. } => Err(unresolved(scope, query)),
        }
    }

    fn search(&self, scope: &[String], query: &str, enums: bool) -> Result<Resolved<'a>, GenerateError> {
        for level in (0..=scope.len()).rev() {
            let Some(node) = self.find(&scope[..level]) else {
                continue;
            };
            let kind = match node.classes.get(query) {
                Some(class) => class.definition.map(ResolvedKind::Class),
                None if enums && node.enums.contains(query) => Some(ResolvedKind::Enum),
                None => None,
            };
            if let Some(kind) = kind {
                let mut path = scope[..level].to_vec();
                path.push(query.to_owned());
                return Ok(Resolved { path, kind });
            }
        }
        Err(unresolved(scope, query))
    }
}

fn unresolved(scope: &[String], query: &str) -> GenerateError {
    GenerateError::UnresolvedType { name: query.to_owned(), scope: scope.join(".") }
}
