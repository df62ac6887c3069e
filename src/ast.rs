//! Parsed schema declarations. Produced once per parse and never mutated.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyKind {
    Bool,
    Int,
    Float,
    String,
    Object,
    List,
    Action,
    Enum,
    External,
}

impl PropertyKind {
    pub fn is_primitive(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::String)
    }

    /// Object and list properties hold child models and get locator fields.
    pub fn holds_model(self) -> bool {
        matches!(self, Self::Object | Self::List)
    }
}

/// Declaration modifier written as `@Tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Attribute {
    /// `@BindTarget`: the class gets a root locator.
    BindTarget,
    /// `@Interface:Name`: the class implements marker trait `Name`.
    Interface(String),
    /// Any other tag, kept as inert metadata.
    Opaque(String),
}

impl Attribute {
    pub fn parse(tag: &str) -> Self {
        if tag == "BindTarget" {
            return Self::BindTarget;
        }
        match tag.strip_prefix("Interface:") {
            Some(name) if !name.is_empty() => Self::Interface(name.to_owned()),
            _ => Self::Opaque(tag.to_owned()),
        }
    }
}

pub fn is_bind_target(attributes: &[Attribute]) -> bool {
    attributes.iter().any(|attribute| matches!(attribute, Attribute::BindTarget))
}

pub fn interfaces(attributes: &[Attribute]) -> impl Iterator<Item = &str> {
    attributes.iter().filter_map(|attribute| match attribute {
        Attribute::Interface(name) => Some(name.as_str()),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InlineBody {
    Class(ClassDefinition),
    Enum(EnumDefinition),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    /// Declared type name; `None` for primitives and `Action<>`.
    pub type_name: Option<String>,
    pub inline: Option<InlineBody>,
    pub attributes: Vec<Attribute>,
}

impl Property {
    pub fn inline_class(&self) -> Option<&ClassDefinition> {
        match &self.inline {
            Some(InlineBody::Class(definition)) => Some(definition),
            _ => None,
        }
    }

    pub fn inline_enum(&self) -> Option<&EnumDefinition> {
        match &self.inline {
            Some(InlineBody::Enum(definition)) => Some(definition),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassDefinition {
    pub enums: Vec<EnumDeclaration>,
    pub classes: Vec<ClassDeclaration>,
    pub properties: Vec<Property>,
}

impl ClassDefinition {
    /// True when some property holds a child model, i.e. locating into this
    /// class can go further than the class itself.
    pub fn needs_locators(&self) -> bool {
        self.properties.iter().any(|property| property.kind.holds_model())
    }

    /// Classes declared inside this one: `define` blocks first, then inline
    /// class bodies of properties, each with the attributes that apply to it.
    pub fn nested_classes(&self) -> impl Iterator<Item = (&str, &ClassDefinition, &[Attribute])> {
        let declared = self.classes.iter().map(|class| {
            (class.name.as_str(), &class.definition, class.attributes.as_slice())
        });
        let inline = self.properties.iter().filter_map(|property| {
            property
                .inline_class()
                .map(|definition| (property.type_name(), definition, property.attributes.as_slice()))
        });
        declared.chain(inline)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumDefinition {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    pub name: String,
    pub definition: ClassDefinition,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDeclaration {
    pub name: String,
    pub definition: EnumDefinition,
    pub attributes: Vec<Attribute>,
}

/// One parsed `*.model` file: top-level enums and classes only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelFile {
    pub enums: Vec<EnumDeclaration>,
    pub classes: Vec<ClassDeclaration>,
}
