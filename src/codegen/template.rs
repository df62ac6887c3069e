//! Named text templates and the helpers that assemble fragments.
//!
//! A template is plain text with `{Key}` placeholders. Rendering is one pass
//! over the template: only known keys are replaced, and inserted text is never
//! scanned again, so the order of the field list does not matter.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LineEnding;

// ————————————————————————————————————————————————————————————————————————————
// TEMPLATES
// ————————————————————————————————————————————————————————————————————————————

pub const FILE: &str = r#"// Generated by mdlc. Do not edit.
#![allow(dead_code, unused_imports, non_camel_case_types, clippy::new_without_default)]

use super::*;

{Body}
"#;

pub const NAMESPACE_MODULE: &str = r#"// Generated by mdlc{Namespace}. Do not edit.

{Body}
"#;

pub const MODULE_ENTRY: &str = r#"#[path = "{Path}"]
pub mod {Module};
pub use {Module}::*;"#;

pub const NESTED_MODULE: &str = r#"pub mod {Module} {
    use super::*;

{Body}
}"#;

pub const GROUP_MODULE: &str = r#"pub mod {Module} {
{Body}
}"#;

pub const ENUM: &str = r#"#[derive({Derives})]
pub enum {Name} {
{Body}}"#;

pub const CLASS_STRUCT: &str = r#"pub struct {ClassName} {
    base: {Runtime}::ModelBase<{ClassName}>,
{Fields}}"#;

pub const CLASS_IMPL: &str = r#"impl {ClassName} {
{Body}
}"#;

pub const CONSTRUCTOR: &str = r#"pub fn new() -> Self {
    let base = {Runtime}::ModelBase::new();
{Body}    Self {
        base,
{Fields}    }
}"#;

pub const CLASS_DEFAULT: &str = r#"impl Default for {ClassName} {
    fn default() -> Self {
        Self::new()
    }
}"#;

pub const MODEL_IMPL: &str = r#"impl {Runtime}::Model for {ClassName} {
    fn base(&self) -> &{Runtime}::ModelBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut {Runtime}::ModelBase<Self> {
        &mut self.base
    }
{Overrides}}"#;

pub const FORCE_MARK_DIRTY: &str = r#"fn force_mark_dirty(&mut self) {
    self.base.mark_dirty();
{Body}
}"#;

pub const INVOKE_ON_CHILDREN: &str = r#"fn invoke_callbacks_on_children(
    &mut self,
    force: bool,
    on_error: &mut dyn FnMut({Runtime}::ObserverFailure),
) {
{Body}
}"#;

pub const PRIMITIVE_PROPERTY: &str = r#"pub fn {Getter}(&self) -> {ReturnType} {
    {ReturnExpr}
}

pub fn {Setter}(&mut self, value: {TypeName}) {
    if self.{Field} != value {
        self.{Field} = value;
        self.base.self_changed();
        self.base.notify_parent();
    }
}"#;

pub const OBJECT_PROPERTY: &str = r#"pub fn {Getter}(&self) -> &{TypeName} {
    &self.{Field}
}

/// Replace the value through `{Setter}`, which carries its observers over.
pub fn {GetterMut}(&mut self) -> &mut {TypeName} {
    {Runtime}::Model::base(&self.{Field}).attach_to(&self.base);
    &mut self.{Field}
}

pub fn {Setter}(&mut self, value: {TypeName}) -> {TypeName} {
    let previous = {Runtime}::transplant(&mut self.{Field}, value);
    self.base.self_changed();
    self.base.notify_parent();
    previous
}"#;

pub const LIST_PROPERTY: &str = r#"pub fn {Getter}(&self) -> &{Runtime}::ModelList<{TypeName}> {
    &self.{Field}
}

pub fn {GetterMut}(&mut self) -> &mut {Runtime}::ModelList<{TypeName}> {
    {Runtime}::Model::base(&self.{Field}).attach_to(&self.base);
    &mut self.{Field}
}"#;

pub const CAPABILITY_IMPL: &str = r#"impl {Trait} for {ClassName} {}"#;

pub const LOCATOR_STRUCT: &str = r#"pub struct {Name} {
{Fields}}"#;

pub const LOCATOR_IMPL: &str = r#"impl {Name} {
    pub fn new() -> Self {
        Self {
{Fields}        }
    }
}"#;

pub const LOCATE_ROOT: &str = r#"impl {Runtime}::Locate<{Root}> for {Name} {
    type Target = {Root};

    fn locate<'a>(&self, root: &'a {Root}) -> Option<&'a Self::Target> {
        Some(root)
    }

    fn locate_mut<'a>(&self, root: &'a mut {Root}) -> Option<&'a mut Self::Target> {
        Some(root)
    }
}"#;

pub const LOCATE_NESTED: &str = r#"impl {Runtime}::Locate<{Root}> for {Name} {
    type Target = {Target};

    fn locate<'a>(&self, root: &'a {Root}) -> Option<&'a Self::Target> {
        {Runtime}::Locate::locate(&self.locator, root)
    }

    fn locate_mut<'a>(&self, root: &'a mut {Root}) -> Option<&'a mut Self::Target> {
        {Runtime}::Locate::locate_mut(&self.locator, root)
    }
}"#;

pub const LOCATOR_FIELD_GENERIC: &str = r#"{Field}: {Runtime}::ModelLocator::new(
    |model: &{Root}| model.{Path},
    |model: &mut {Root}| model.{PathMut},
),"#;

pub const LOCATOR_FIELD_LIST: &str = r#"{Field}: {Runtime}::ListModelLocator::new(
    |model: &{Root}| model.{Path},
    |model: &mut {Root}| model.{PathMut},
),"#;

pub const LOCATOR_ROOT_STATIC: &str =
    r#"pub static {Static}: ::std::sync::LazyLock<{Type}> = ::std::sync::LazyLock::new({Type}::new);"#;

// ————————————————————————————————————————————————————————————————————————————
// RENDERING
// ————————————————————————————————————————————————————————————————————————————

/// Substitute `{Key}` placeholders in one pass. Braces that do not enclose a
/// known key are copied through unchanged.
pub fn render(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let key_len = after.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(after.len());
        let value = fields.iter().find(|(key, _)| *key == &after[..key_len]).map(|(_, value)| *value);
        match value {
            Some(value) if key_len > 0 && after[key_len..].starts_with('}') => {
                out.push_str(value);
                rest = &after[key_len + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Prefix every non-empty line with four spaces per level.
pub fn indent(text: &str, levels: usize) -> String {
    let pad = " ".repeat(levels * 4);
    text.lines()
        .map(|line| if line.trim().is_empty() { String::new() } else { format!("{pad}{line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lines indented by `levels`, each ending in `\n`. Fills placeholders
/// that sit at the start of a line so an empty list leaves no blank line.
pub fn block<S: AsRef<str>>(lines: &[S], levels: usize) -> String {
    lines.iter().map(|line| indent(line.as_ref(), levels) + "\n").collect()
}

/// Join non-blank sections, each right-trimmed, with one blank line between.
pub fn combine_sections<S: AsRef<str>>(sections: &[S]) -> String {
    sections
        .iter()
        .map(|section| section.as_ref().trim_end())
        .filter(|section| !section.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n\r|\n|\r").expect("line break pattern"));

pub fn normalize_line_endings(text: &str, line_ending: LineEnding) -> String {
    LINE_BREAK.replace_all(text, line_ending.as_str()).into_owned()
}
