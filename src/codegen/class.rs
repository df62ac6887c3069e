//! Emission of model structs and enums.
use crate::ast::{self, Attribute, ClassDefinition, EnumDefinition, Property, PropertyKind};
use crate::type_tree::ResolvedKind;

use super::Emitter;
use super::naming::{field_ident, getter_mut_ident, module_ident, rust_ident, setter_ident};
use super::template::{self, block, combine_sections, indent, render};

/// Accessor flavour of a non-model property.
enum Access {
    /// Returned by value (`Copy` types).
    Value,
    /// `String`, returned as `&str`.
    Str,
    /// Returned by reference.
    Ref,
}

impl Emitter<'_, '_> {
    pub(crate) fn enum_decl(&self, name: &str, definition: &EnumDefinition) -> String {
        let derives = if definition.values.is_empty() {
            "Debug, Clone, Copy, PartialEq, Eq, Hash"
        } else {
            "Debug, Clone, Copy, PartialEq, Eq, Hash, Default"
        };
        let values: Vec<String> = definition
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let value = rust_ident(value);
                if i == 0 { format!("#[default]\n{value},") } else { format!("{value},") }
            })
            .collect();
        render(template::ENUM, &[
            ("Derives", derives),
            ("Name", &rust_ident(name)),
            ("Body", &block(&values, 1)),
        ])
    }

    /// Emit class `name` declared inside the classes on `scope`.
    pub(crate) fn class_decl(
        &self,
        name: &str,
        definition: &ClassDefinition,
        attributes: &[Attribute],
        scope: &mut Vec<String>,
    ) -> String {
        scope.push(name.to_owned());
        let nested = self.nested_decls(definition, scope);
        let members = self.members(definition, scope);
        scope.pop();

        let rt = self.runtime();
        let class_name = rust_ident(name);

        let nested_module = if nested.is_empty() {
            String::new()
        } else {
            render(template::NESTED_MODULE, &[
                ("Module", &module_ident(name)),
                ("Body", &indent(&combine_sections(&nested), 1)),
            ])
        };

        let structure = render(template::CLASS_STRUCT, &[
            ("ClassName", &class_name),
            ("Runtime", rt),
            ("Fields", &block(&members.fields, 1)),
        ]);

        let constructor = render(template::CONSTRUCTOR, &[
            ("Runtime", rt),
            ("Body", &block(&members.constructor_lets, 1)),
            ("Fields", &block(&members.constructor_fields, 2)),
        ]);
        let mut impl_sections = vec![constructor];
        impl_sections.extend(members.accessors);
        let inherent = render(template::CLASS_IMPL, &[
            ("ClassName", &class_name),
            ("Body", &indent(&combine_sections(&impl_sections), 1)),
        ]);

        let default = render(template::CLASS_DEFAULT, &[("ClassName", &class_name)]);

        let overrides = if members.force_mark_dirty.is_empty() {
            String::new()
        } else {
            let force = render(template::FORCE_MARK_DIRTY, &[
                ("Body", &indent(&members.force_mark_dirty.join("\n"), 1)),
            ]);
            let invoke = render(template::INVOKE_ON_CHILDREN, &[
                ("Runtime", rt),
                ("Body", &indent(&members.invoke_on_children.join("\n"), 1)),
            ]);
            format!("\n{}\n", indent(&combine_sections(&[force, invoke]), 1))
        };
        let model = render(template::MODEL_IMPL, &[
            ("Runtime", rt),
            ("ClassName", &class_name),
            ("Overrides", &overrides),
        ]);

        let mut capabilities = Vec::new();
        if ast::is_bind_target(attributes) {
            capabilities.push(format!("{rt}::BindTarget"));
        }
        capabilities.extend(ast::interfaces(attributes).map(external_path));
        let capabilities = capabilities
            .iter()
            .map(|capability| {
                render(template::CAPABILITY_IMPL, &[("Trait", capability), ("ClassName", &class_name)])
            })
            .collect::<Vec<_>>()
            .join("\n");

        combine_sections(&[nested_module, structure, inherent, default, model, capabilities])
    }

    /// Inner enums, inner classes, then inline types of properties in
    /// declaration order. `scope` ends with the owning class.
    fn nested_decls(&self, definition: &ClassDefinition, scope: &mut Vec<String>) -> Vec<String> {
        let mut nested = Vec::new();
        for declaration in &definition.enums {
            nested.push(self.enum_decl(&declaration.name, &declaration.definition));
        }
        for declaration in &definition.classes {
            nested.push(self.class_decl(&declaration.name, &declaration.definition, &declaration.attributes, scope));
        }
        for property in &definition.properties {
            if let Some(inline) = property.inline_class() {
                nested.push(self.class_decl(property.type_name(), inline, &property.attributes, scope));
            }
            if let Some(inline) = property.inline_enum() {
                nested.push(self.enum_decl(property.type_name(), inline));
            }
        }
        nested
    }

    fn members(&self, definition: &ClassDefinition, scope: &[String]) -> Members {
        let rt = self.runtime();
        let mut members = Members::default();
        for property in &definition.properties {
            let field = field_ident(&property.name);
            match property.kind {
                PropertyKind::Object => {
                    let type_name = self.type_ref(property.type_name(), scope).0;
                    members.fields.push(format!("{field}: {type_name},"));
                    members.constructor_lets.push(format!("let {field} = {type_name}::new();"));
                    members.constructor_lets.push(format!("{rt}::Model::base(&{field}).attach_to(&base);"));
                    members.constructor_fields.push(format!("{field},"));
                    members.accessors.push(render(template::OBJECT_PROPERTY, &[
                        ("Getter", &field),
                        ("GetterMut", &getter_mut_ident(&property.name)),
                        ("Setter", &setter_ident(&property.name)),
                        ("Field", &field),
                        ("TypeName", &type_name),
                        ("Runtime", rt),
                    ]));
                    self.forward_to_child(&mut members, &field);
                }
                PropertyKind::List => {
                    let type_name = self.type_ref(property.type_name(), scope).0;
                    members.fields.push(format!("{field}: {rt}::ModelList<{type_name}>,"));
                    members.constructor_lets.push(format!("let {field} = {rt}::ModelList::new();"));
                    members.constructor_lets.push(format!("{rt}::Model::base(&{field}).attach_to(&base);"));
                    members.constructor_fields.push(format!("{field},"));
                    members.accessors.push(render(template::LIST_PROPERTY, &[
                        ("Getter", &field),
                        ("GetterMut", &getter_mut_ident(&property.name)),
                        ("Field", &field),
                        ("TypeName", &type_name),
                        ("Runtime", rt),
                    ]));
                    self.forward_to_child(&mut members, &field);
                }
                _ => {
                    let (type_name, access) = self.value_type(property, scope);
                    let (return_type, return_expr) = match access {
                        Access::Value => (type_name.clone(), format!("self.{field}")),
                        Access::Str => ("&str".to_owned(), format!("&self.{field}")),
                        Access::Ref => (format!("&{type_name}"), format!("&self.{field}")),
                    };
                    members.fields.push(format!("{field}: {type_name},"));
                    members.constructor_fields.push(format!("{field}: Default::default(),"));
                    members.accessors.push(render(template::PRIMITIVE_PROPERTY, &[
                        ("Getter", &field),
                        ("Setter", &setter_ident(&property.name)),
                        ("Field", &field),
                        ("TypeName", &type_name),
                        ("ReturnType", &return_type),
                        ("ReturnExpr", &return_expr),
                    ]));
                }
            }
        }
        members
    }

    fn forward_to_child(&self, members: &mut Members, field: &str) {
        let rt = self.runtime();
        members.force_mark_dirty.push(format!("{rt}::Model::force_mark_dirty(&mut self.{field});"));
        members.invoke_on_children.push(format!(
            "{rt}::Model::invoke_model_updated_callbacks(&mut self.{field}, force, on_error);"
        ));
    }

    fn value_type(&self, property: &Property, scope: &[String]) -> (String, Access) {
        match property.kind {
            PropertyKind::Bool => ("bool".to_owned(), Access::Value),
            PropertyKind::Int => ("i32".to_owned(), Access::Value),
            PropertyKind::Float => ("f32".to_owned(), Access::Value),
            PropertyKind::String => ("String".to_owned(), Access::Str),
            PropertyKind::Enum => match self.type_ref(property.type_name(), scope) {
                (type_name, Some(ResolvedKind::Enum)) => (type_name, Access::Value),
                (type_name, _) => (type_name, Access::Ref),
            },
            PropertyKind::Action => {
                let action = match &property.type_name {
                    Some(argument) => format!("{}::Action<{}>", self.runtime(), self.type_ref(argument, scope).0),
                    None => format!("{}::Action", self.runtime()),
                };
                (action, Access::Ref)
            }
            PropertyKind::External | PropertyKind::Object | PropertyKind::List => {
                (external_path(property.type_name()), Access::Ref)
            }
        }
    }

    /// Rust path of the type named `name` as written inside the class at the
    /// end of `scope`: `module::Name` when declared inside that class, the
    /// bare name when declared further out (in scope through the
    /// `use super::*` chain).
    pub(crate) fn type_ref(&self, name: &str, scope: &[String]) -> (String, Option<ResolvedKind<'_>>) {
        if let Some(primitive) = primitive_type(name) {
            return (primitive.to_owned(), None);
        }
        if name.contains('.') || name.contains("::") {
            return (external_path(name), None);
        }
        match self.tree.resolve(scope, name) {
            Ok(resolved) => {
                let declared_inside = resolved.path.len() == scope.len() + 1;
                let path = match scope.last() {
                    Some(owner) if declared_inside => format!("{}::{}", module_ident(owner), rust_ident(name)),
                    _ => rust_ident(name),
                };
                (path, Some(resolved.kind))
            }
            Err(_) => {
                if !self.config.type_mappings.values().any(|mapped| mapped == name) {
                    tracing::warn!(name, scope = %scope.join("."), "unresolved type reference; emitting it verbatim");
                }
                (name.to_owned(), None)
            }
        }
    }
}

#[derive(Default)]
struct Members {
    fields: Vec<String>,
    constructor_lets: Vec<String>,
    constructor_fields: Vec<String>,
    accessors: Vec<String>,
    force_mark_dirty: Vec<String>,
    invoke_on_children: Vec<String>,
}

fn primitive_type(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "bool" => Some("bool"),
        "int" => Some("i32"),
        "float" => Some("f32"),
        "string" => Some("String"),
        _ => None,
    }
}

/// `UnityEngine.Vector3` → `UnityEngine::Vector3`; `::` paths pass through.
pub(crate) fn external_path(name: &str) -> String {
    name.replace('.', "::")
}
