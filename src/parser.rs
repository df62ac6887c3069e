//! Recursive-descent parser for `*.model` schema files.
//!
//! ```text
//! file        := member*
//! member      := attribute* (enumDecl | classDecl | property)
//! attribute   := '@' tag
//! enumDecl    := 'enum' identifier '{' enumValue (',' enumValue)* ','? '}'
//! classDecl   := 'define' identifier '{' member* '}'
//! property    := typeToken identifier? ( '{' member* '}' ';'? | ';' )
//! ```
use indexmap::{IndexMap, IndexSet};

use crate::ast::{
    Attribute, ClassDeclaration, ClassDefinition, EnumDeclaration, EnumDefinition, InlineBody,
    ModelFile, Property, PropertyKind,
};
use crate::error::{SchemaError, SchemaErrorKind};
use crate::scanner::{FIELD_BREAK, Scanner, is_identifier};

pub type TypeMappings = IndexMap<String, String>;

pub fn parse(text: &str, type_mappings: &TypeMappings) -> Result<ModelFile, SchemaError> {
    let parser = Parser { scanner: Scanner::new(text), type_mappings };
    parser.parse_file()
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNALS
// ————————————————————————————————————————————————————————————————————————————

struct Parser<'a> {
    scanner: Scanner<'a>,
    type_mappings: &'a TypeMappings,
}

/// Byte range of a `{ ... }` body, braces excluded.
#[derive(Debug, Clone, Copy)]
struct Body {
    start: usize,
    end: usize,
}

/// One member split into its parts, before kind resolution.
struct Member {
    start: usize,
    type_token: String,
    name: String,
    body: Option<Body>,
    attributes: Vec<Attribute>,
}

/// Enum body text between two top-level commas, comments removed.
#[derive(Default)]
struct EnumSegment {
    start: usize,
    text: String,
    had_comment: bool,
}

impl<'a> Parser<'a> {
    fn parse_file(&self) -> Result<ModelFile, SchemaError> {
        let (definition, first_property) = self.parse_members(0, self.scanner.len(), true)?;
        if let Some((start, name)) = first_property {
            return Err(self.scanner.error(start, SchemaErrorKind::PropertyAtFileScope(name)));
        }
        Ok(ModelFile { enums: definition.enums, classes: definition.classes })
    }

    fn parse_class_body(&self, body: Body) -> Result<ClassDefinition, SchemaError> {
        self.parse_members(body.start, body.end, false).map(|(definition, _)| definition)
    }

    /// Parse members in `start..end`. At file scope the position and name of
    /// the first property are reported back so the caller can reject it.
    fn parse_members(
        &self,
        start: usize,
        end: usize,
        file_scope: bool,
    ) -> Result<(ClassDefinition, Option<(usize, String)>), SchemaError> {
        let mut definition = ClassDefinition::default();
        let mut first_property = None;
        let mut cursor = start;
        loop {
            cursor = self.scanner.skip_trivia(cursor);
            if cursor >= end {
                break;
            }

            let mut attributes = Vec::new();
            let attributes_start = cursor;
            while self.scanner.byte(cursor) == Some(b'@') {
                let tag_end = self.scanner.token_end(cursor + 1, end, &[]);
                attributes.push(Attribute::parse(self.scanner.slice(cursor + 1, tag_end)));
                cursor = self.scanner.skip_trivia(tag_end);
            }
            if cursor >= end {
                if !attributes.is_empty() {
                    let tag_end = self.scanner.token_end(attributes_start + 1, end, &[]);
                    let tag = self.scanner.slice(attributes_start + 1, tag_end).to_owned();
                    return Err(self.scanner.error(attributes_start, SchemaErrorKind::DanglingAttribute(tag)));
                }
                break;
            }

            let (member, next) = self.split_member(cursor, end, attributes)?;
            cursor = next;

            if member.type_token == "enum" {
                let body = self.require_body(&member)?;
                definition.enums.push(EnumDeclaration {
                    name: member.name,
                    definition: self.parse_enum(body)?,
                    attributes: member.attributes,
                });
            } else if member.type_token == "define" {
                let body = self.require_body(&member)?;
                definition.classes.push(ClassDeclaration {
                    name: member.name,
                    definition: self.parse_class_body(body)?,
                    attributes: member.attributes,
                });
            } else {
                if file_scope && first_property.is_none() {
                    first_property = Some((member.start, member.name.clone()));
                }
                definition.properties.push(self.resolve_property(member)?);
            }
        }
        Ok((definition, first_property))
    }

    /// Read type token, optional name and terminator of the member at
    /// `start`. Returns the member and the position after it.
    fn split_member(
        &self,
        start: usize,
        end: usize,
        attributes: Vec<Attribute>,
    ) -> Result<(Member, usize), SchemaError> {
        let scanner = &self.scanner;
        if !scanner.byte(start).is_some_and(|b| b.is_ascii_alphabetic() || b == b'_') {
            let token_end = scanner.token_end(start, end, FIELD_BREAK).max(start + 1);
            let token = scanner.slice(start, token_end.min(scanner.len())).to_owned();
            return Err(scanner.error(start, SchemaErrorKind::InvalidIdentifier(token)));
        }

        let type_end = scanner.token_end(start, end, FIELD_BREAK);
        let mut type_token = scanner.slice(start, type_end).to_owned();
        let terminator = scanner.find_terminator(type_end, end)?;
        let name_start = scanner.skip_whitespace(type_end);
        let mut name = scanner.slice(type_end, terminator).trim().to_owned();

        let elided = name.is_empty();
        if elided {
            name = type_token.clone();
            type_token.push_str("Model");
        }
        if !is_identifier(&name) {
            let at = if elided { start } else { name_start };
            return Err(scanner.error(at, SchemaErrorKind::InvalidIdentifier(name)));
        }

        let (body, next) = if scanner.byte(terminator) == Some(b'{') {
            let close = scanner.block_end(terminator, end)?;
            let mut next = scanner.skip_whitespace(close + 1);
            if scanner.byte(next) == Some(b';') && next < end {
                next += 1;
            }
            (Some(Body { start: terminator + 1, end: close }), next)
        } else {
            (None, terminator + 1)
        };

        let member = Member { start, type_token, name, body, attributes };
        Ok((member, next))
    }

    fn require_body(&self, member: &Member) -> Result<Body, SchemaError> {
        member.body.ok_or_else(|| {
            self.scanner.error(member.start, SchemaErrorKind::MissingBody(member.name.clone()))
        })
    }

    /// Decide the property kind from the type token, in priority order.
    fn resolve_property(&self, member: Member) -> Result<Property, SchemaError> {
        let token = member.type_token.as_str();
        let error = |kind| self.scanner.error(member.start, kind);

        let (kind, type_name, inline) = if let Some(element) = token.strip_suffix("[]") {
            if primitive_kind(element).is_some() {
                return Err(error(SchemaErrorKind::UnsupportedPropertyKind(token.to_owned())));
            }
            if self.type_mappings.contains_key(element) || element.contains('.') {
                return Err(error(SchemaErrorKind::ExternalTypeAsArray(element.to_owned())));
            }
            if !is_identifier(element) {
                return Err(error(SchemaErrorKind::InvalidIdentifier(element.to_owned())));
            }
            let inline = self.inline_class(member.body)?;
            (PropertyKind::List, Some(element.to_owned()), inline)
        } else if let Some(argument) = token.strip_prefix("Action<") {
            let argument = self.type_argument(token, argument, &member)?;
            match argument {
                None => {
                    if member.body.is_some() {
                        return Err(error(SchemaErrorKind::InvalidIdentifier(token.to_owned())));
                    }
                    (PropertyKind::Action, None, None)
                }
                Some((name, true)) => (PropertyKind::Action, Some(name), None),
                Some((name, false)) => {
                    let inline = self.inline_class(member.body)?;
                    (PropertyKind::Action, Some(name), inline)
                }
            }
        } else if let Some(argument) = token.strip_prefix("Enum<") {
            match self.type_argument(token, argument, &member)? {
                None => return Err(error(SchemaErrorKind::InvalidIdentifier(token.to_owned()))),
                Some((name, true)) => (PropertyKind::Enum, Some(name), None),
                Some((name, false)) => {
                    let inline = match member.body {
                        Some(body) => Some(InlineBody::Enum(self.parse_enum(body)?)),
                        None => None,
                    };
                    (PropertyKind::Enum, Some(name), inline)
                }
            }
        } else if let Some(kind) = primitive_kind(token) {
            if member.body.is_some() {
                return Err(error(SchemaErrorKind::InlineBodyOnPrimitive(member.name)));
            }
            (kind, None, None)
        } else if is_bare_kind_keyword(token) {
            return Err(error(SchemaErrorKind::UnsupportedPropertyKind(token.to_owned())));
        } else if let Some(mapped) = self.type_mappings.get(token) {
            if member.body.is_some() {
                return Err(error(SchemaErrorKind::InlineBodyOnExternalType(token.to_owned())));
            }
            (PropertyKind::External, Some(mapped.clone()), None)
        } else if token.contains('.') {
            if member.body.is_some() {
                return Err(error(SchemaErrorKind::InlineBodyOnExternalType(token.to_owned())));
            }
            (PropertyKind::External, Some(token.to_owned()), None)
        } else {
            if !is_identifier(token) {
                return Err(error(SchemaErrorKind::InvalidIdentifier(token.to_owned())));
            }
            let inline = self.inline_class(member.body)?;
            (PropertyKind::Object, Some(token.to_owned()), inline)
        };

        Ok(Property {
            name: member.name,
            kind,
            type_name,
            inline,
            attributes: member.attributes,
        })
    }

    /// The `T` of `Action<T>` / `Enum<T>`, substituted through the type
    /// mappings. `None` for an empty argument; the flag tells whether the
    /// name came from a mapping (and so may not carry a body).
    fn type_argument(
        &self,
        token: &str,
        after_open: &str,
        member: &Member,
    ) -> Result<Option<(String, bool)>, SchemaError> {
        let Some(argument) = after_open.strip_suffix('>') else {
            return Err(self.scanner.error(
                member.start,
                SchemaErrorKind::UnclosedTypeArgument(token.to_owned()),
            ));
        };
        if argument.is_empty() {
            return Ok(None);
        }
        if let Some(mapped) = self.type_mappings.get(argument) {
            if member.body.is_some() {
                return Err(self.scanner.error(
                    member.start,
                    SchemaErrorKind::InlineBodyOnExternalType(argument.to_owned()),
                ));
            }
            return Ok(Some((mapped.clone(), true)));
        }
        if member.body.is_some() && !is_identifier(argument) {
            return Err(self.scanner.error(
                member.start,
                SchemaErrorKind::InvalidIdentifier(argument.to_owned()),
            ));
        }
        Ok(Some((argument.to_owned(), false)))
    }

    fn inline_class(&self, body: Option<Body>) -> Result<Option<InlineBody>, SchemaError> {
        match body {
            Some(body) => Ok(Some(InlineBody::Class(self.parse_class_body(body)?))),
            None => Ok(None),
        }
    }

    /// Comma-separated values. `//` comments are stripped (commas inside them
    /// do not split); a segment left empty is dropped when it held a comment
    /// or is the last one, which covers a trailing comma and `{}`.
    fn parse_enum(&self, body: Body) -> Result<EnumDefinition, SchemaError> {
        let segments = split_enum_body(self.scanner.slice(body.start, body.end));
        let last = segments.len() - 1;
        let mut values = IndexSet::new();

        for (index, segment) in segments.into_iter().enumerate() {
            let value = segment.text.trim().to_owned();
            let leading = segment.text.len() - segment.text.trim_start().len();
            let at = body.start + segment.start + leading;
            if value.is_empty() && (segment.had_comment || index == last) {
                continue;
            }
            if !is_identifier(&value) {
                return Err(self.scanner.error(at, SchemaErrorKind::InvalidIdentifier(value)));
            }
            if values.contains(&value) {
                return Err(self.scanner.error(at, SchemaErrorKind::DuplicateEnumValue(value)));
            }
            values.insert(value);
        }

        Ok(EnumDefinition { values: values.into_iter().collect() })
    }
}

fn split_enum_body(raw: &str) -> Vec<EnumSegment> {
    let mut segments = vec![EnumSegment::default()];
    let mut chars = raw.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        let Some(current) = segments.last_mut() else { break };
        match c {
            '/' if chars.peek().is_some_and(|&(_, next)| next == '/') => {
                current.had_comment = true;
                while chars.next_if(|&(_, next)| next != '\n').is_some() {}
            }
            ',' => segments.push(EnumSegment { start: index + 1, ..EnumSegment::default() }),
            _ => current.text.push(c),
        }
    }
    segments
}

fn primitive_kind(token: &str) -> Option<PropertyKind> {
    match token.to_ascii_lowercase().as_str() {
        "bool" => Some(PropertyKind::Bool),
        "int" => Some(PropertyKind::Int),
        "float" => Some(PropertyKind::Float),
        "string" => Some(PropertyKind::String),
        _ => None,
    }
}

/// Kind names that need a type argument or a declared type to mean anything.
fn is_bare_kind_keyword(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "object" | "list" | "action" | "external" | "enum"
    )
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
