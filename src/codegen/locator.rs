//! Locator emission.
//!
//! Every bind target gets a root locator struct with one field per object or
//! list property. An object whose class holds further models gets its own
//! nested struct, so `GAME.player.stats` reads like the model path. Locators
//! of top-level bind targets live directly in the umbrella module; those of
//! nested bind targets go into `<owner>_locators` (structs) and
//! `<owner>_bind_targets` (statics) sub-modules, one level per owner.
use indexmap::IndexMap;

use crate::ast::{self, Attribute, ClassDefinition, ModelFile, PropertyKind};
use crate::error::GenerateError;

use super::Emitter;
use super::naming::{
    field_ident, getter_mut_ident, module_ident, pascal_case, rust_ident, screaming_snake_case, snake_case,
};
use super::template::{self, block, combine_sections, indent, render};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Sections of one module plus its sub-modules, keyed by owner class name.
#[derive(Default)]
struct Group {
    items: Vec<String>,
    children: IndexMap<String, Group>,
}

/// A locator struct being emitted: where it starts and how it got there.
struct Frame<'p> {
    /// Struct name without the `Locator` suffix.
    base: String,
    /// Declaration path of the class the struct locates.
    class_path: Vec<String>,
    definition: &'p ClassDefinition,
    /// Getter calls from the root to the located class.
    path: Vec<String>,
    path_mut: Vec<String>,
}

/// What the locator structs of one bind target share.
struct Root {
    /// `super::` prefix from the defining module up to the file module.
    prefix: String,
    type_path: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Emitter<'_, '_> {
    /// The umbrella locator module of `file`, or `None` when it declares no
    /// bind target.
    pub(crate) fn locators(&self, file: &ModelFile) -> Result<Option<String>, GenerateError> {
        let mut targets = Vec::new();
        for class in &file.classes {
            collect_bind_targets(
                vec![class.name.clone()],
                &class.definition,
                &class.attributes,
                &mut targets,
            );
        }
        if targets.is_empty() {
            return Ok(None);
        }

        let mut definitions = Group::default();
        let mut statics = Group::default();
        for (class_path, definition) in targets {
            let owners = &class_path[..class_path.len() - 1];
            let name = &class_path[class_path.len() - 1];
            tracing::debug!(class = %class_path.join("."), "emitting locators");

            let prefix = "super::".repeat(class_path.len());
            let root = Root { type_path: format!("{prefix}{}", model_path(&class_path)), prefix };
            let frame = Frame {
                base: name.clone(),
                class_path: class_path.clone(),
                definition,
                path: Vec::new(),
                path_mut: Vec::new(),
            };
            let mut visiting = Vec::new();
            let sections = self.locator_struct(&root, frame, &mut visiting)?;
            definitions.at(owners).items.extend(sections);

            let struct_path = format!(
                "{}{}{}Locator",
                "super::".repeat(owners.len()),
                owners.iter().map(|owner| format!("{}_locators::", snake_case(owner))).collect::<String>(),
                name,
            );
            statics.at(owners).items.push(render(template::LOCATOR_ROOT_STATIC, &[
                ("Static", &screaming_snake_case(name)),
                ("Type", &struct_path),
            ]));
        }

        let mut sections = definitions.items;
        sections.extend(statics.items);
        sections.extend(render_children(definitions.children, "locators"));
        sections.extend(render_children(statics.children, "bind_targets"));
        Ok(Some(render(template::NESTED_MODULE, &[
            ("Module", &module_ident(&self.config.locators_class_name)),
            ("Body", &indent(&combine_sections(&sections), 1)),
        ])))
    }

    /// The struct for `frame` followed by the nested structs it refers to.
    fn locator_struct(
        &self,
        root: &Root,
        frame: Frame<'_>,
        visiting: &mut Vec<Vec<String>>,
    ) -> Result<Vec<String>, GenerateError> {
        let rt = self.runtime();
        let name = format!("{}Locator", frame.base);
        let target_type = format!("{}{}", root.prefix, model_path(&frame.class_path));
        visiting.push(frame.class_path.clone());

        let mut fields = Vec::new();
        let mut inits = Vec::new();
        let mut nested = Vec::new();
        let locate = if frame.path.is_empty() {
            render(template::LOCATE_ROOT, &[("Runtime", rt), ("Root", &root.type_path), ("Name", &name)])
        } else {
            fields.push(format!("locator: {rt}::ModelLocator<{}, {target_type}>,", root.type_path));
            inits.push(accessor_field(template::LOCATOR_FIELD_GENERIC, rt, "locator", root, &frame.path, &frame.path_mut));
            render(template::LOCATE_NESTED, &[
                ("Runtime", rt),
                ("Root", &root.type_path),
                ("Name", &name),
                ("Target", &target_type),
            ])
        };

        for property in &frame.definition.properties {
            if !property.kind.holds_model() {
                continue;
            }
            let field = field_ident(&property.name);
            let (class_path, definition) = match property.inline_class() {
                Some(inline) => {
                    let mut path = frame.class_path.clone();
                    path.push(property.type_name().to_owned());
                    (path, inline)
                }
                None => self.tree.resolve_class(&frame.class_path, property.type_name())?,
            };
            let element_type = format!("{}{}", root.prefix, model_path(&class_path));
            let mut path = frame.path.clone();
            path.push(format!("{field}()"));
            let mut path_mut = frame.path_mut.clone();
            path_mut.push(format!("{}()", getter_mut_ident(&property.name)));

            match property.kind {
                PropertyKind::List => {
                    fields.push(format!("pub {field}: {rt}::ListModelLocator<{}, {element_type}>,", root.type_path));
                    inits.push(accessor_field(template::LOCATOR_FIELD_LIST, rt, &field, root, &path, &path_mut));
                }
                _ if definition.needs_locators() => {
                    if visiting.contains(&class_path) {
                        return Err(GenerateError::RecursiveType {
                            name: property.type_name().to_owned(),
                            path: visiting
                                .iter()
                                .map(|path| path.join("."))
                                .chain([class_path.join(".")])
                                .collect::<Vec<_>>()
                                .join(" → "),
                        });
                    }
                    let base = format!("{}{}", frame.base, pascal_case(&property.name));
                    fields.push(format!("pub {field}: {base}Locator,"));
                    inits.push(format!("{field}: {base}Locator::new(),"));
                    let child = Frame { base, class_path, definition, path, path_mut };
                    nested.extend(self.locator_struct(root, child, visiting)?);
                }
                _ => {
                    fields.push(format!("pub {field}: {rt}::ModelLocator<{}, {element_type}>,", root.type_path));
                    inits.push(accessor_field(template::LOCATOR_FIELD_GENERIC, rt, &field, root, &path, &path_mut));
                }
            }
        }
        visiting.pop();

        let mut sections = vec![
            render(template::LOCATOR_STRUCT, &[("Name", &name), ("Fields", &block(&fields, 1))]),
            render(template::LOCATOR_IMPL, &[("Name", &name), ("Fields", &block(&inits, 3))]),
            locate,
        ];
        sections.extend(nested);
        Ok(sections)
    }
}

impl Group {
    fn at(&mut self, owners: &[String]) -> &mut Group {
        owners.iter().fold(self, |group, owner| group.children.entry(owner.clone()).or_default())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Depth-first, declaration order: a class before the classes inside it.
fn collect_bind_targets<'p>(
    class_path: Vec<String>,
    definition: &'p ClassDefinition,
    attributes: &[Attribute],
    out: &mut Vec<(Vec<String>, &'p ClassDefinition)>,
) {
    if ast::is_bind_target(attributes) {
        out.push((class_path.clone(), definition));
    }
    for (name, nested, attributes) in definition.nested_classes() {
        let mut path = class_path.clone();
        path.push(name.to_owned());
        collect_bind_targets(path, nested, attributes, out);
    }
}

fn render_children(children: IndexMap<String, Group>, suffix: &str) -> Vec<String> {
    children
        .into_iter()
        .map(|(owner, group)| {
            let mut sections = group.items;
            sections.extend(render_children(group.children, suffix));
            render(template::GROUP_MODULE, &[
                ("Module", &format!("{}_{suffix}", snake_case(&owner))),
                ("Body", &indent(&combine_sections(&sections), 1)),
            ])
        })
        .collect()
}

/// `[Game, Player, Stats]` → `game::player::Stats`, relative to the file module.
fn model_path(class_path: &[String]) -> String {
    let Some((name, owners)) = class_path.split_last() else {
        return String::new();
    };
    owners
        .iter()
        .map(|owner| format!("{}::", module_ident(owner)))
        .chain([rust_ident(name)])
        .collect()
}

fn accessor_field(
    template: &str,
    rt: &str,
    field: &str,
    root: &Root,
    path: &[String],
    path_mut: &[String],
) -> String {
    render(template, &[
        ("Field", field),
        ("Runtime", rt),
        ("Root", &root.type_path),
        ("Path", &path.join(".")),
        ("PathMut", &path_mut.join(".")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::parser::{TypeMappings, parse};
    use crate::type_tree::TypeTree;
    use pretty_assertions::assert_eq;

    fn emit(source: &str) -> Result<Option<String>, GenerateError> {
        let file = parse(source, &TypeMappings::new()).unwrap();
        let tree = TypeTree::build([&file]);
        let config = GenerationConfig::default();
        Emitter { tree: &tree, config: &config }.locators(&file)
    }

    #[test]
    fn no_bind_target_no_module() {
        assert_eq!(emit("define Game { int score; }").unwrap(), None);
    }

    #[test]
    fn leaf_objects_get_generic_locators() {
        let out = emit("@BindTarget\ndefine Game { Player player { int hp; } }").unwrap().unwrap();
        assert_eq!(
            out,
            r#"pub mod locators {
    use super::*;

    pub struct GameLocator {
        pub player: ::mdl_runtime::ModelLocator<super::Game, super::game::Player>,
    }

    impl GameLocator {
        pub fn new() -> Self {
            Self {
                player: ::mdl_runtime::ModelLocator::new(
                    |model: &super::Game| model.player(),
                    |model: &mut super::Game| model.player_mut(),
                ),
            }
        }
    }

    impl ::mdl_runtime::Locate<super::Game> for GameLocator {
        type Target = super::Game;

        fn locate<'a>(&self, root: &'a super::Game) -> Option<&'a Self::Target> {
            Some(root)
        }

        fn locate_mut<'a>(&self, root: &'a mut super::Game) -> Option<&'a mut Self::Target> {
            Some(root)
        }
    }

    pub static GAME: ::std::sync::LazyLock<GameLocator> = ::std::sync::LazyLock::new(GameLocator::new);
}"#
        );
    }

    #[test]
    fn objects_with_children_get_nested_structs() {
        let out = emit(
            "@BindTarget\ndefine Game {\n  Player player { Stats stats { int hp; } Item[] bag { int n; } }\n}",
        )
        .unwrap()
        .unwrap();
        assert!(out.contains("        pub player: GamePlayerLocator,\n"));
        assert!(out.contains("                player: GamePlayerLocator::new(),\n"));
        assert!(out.contains(
            "        locator: ::mdl_runtime::ModelLocator<super::Game, super::game::Player>,\n        pub stats: ::mdl_runtime::ModelLocator<super::Game, super::game::player::Stats>,\n"
        ));
        assert!(out.contains("                    |model: &mut super::Game| model.player_mut().stats_mut(),\n"));
        assert!(out.contains(
            "        pub bag: ::mdl_runtime::ListModelLocator<super::Game, super::game::player::Item>,\n"
        ));
        assert!(out.contains("    impl ::mdl_runtime::Locate<super::Game> for GamePlayerLocator {\n        type Target = super::game::Player;\n"));
    }

    #[test]
    fn named_classes_resolve_through_the_tree() {
        let out = emit("define Shared { int a; }\n@BindTarget\ndefine Game { Shared shared; Shared[] many; }")
            .unwrap()
            .unwrap();
        assert!(out.contains("pub shared: ::mdl_runtime::ModelLocator<super::Game, super::Shared>,"));
        assert!(out.contains("pub many: ::mdl_runtime::ListModelLocator<super::Game, super::Shared>,"));
    }

    #[test]
    fn nested_bind_targets_get_grouped_modules() {
        let out = emit("define Ui {\n  @BindTarget\n  define Menu { Entry[] entries { string label; } }\n}")
            .unwrap()
            .unwrap();
        assert!(out.contains("    pub mod ui_locators {\n        pub struct MenuLocator {\n"));
        assert!(out.contains("ListModelLocator<super::super::ui::Menu, super::super::ui::menu::Entry>"));
        assert!(out.contains(
            "    pub mod ui_bind_targets {\n        pub static MENU: ::std::sync::LazyLock<super::ui_locators::MenuLocator> ="
        ));
    }

    #[test]
    fn unresolved_class_is_fatal() {
        let error = emit("@BindTarget\ndefine Game { Missing thing; }").unwrap_err();
        assert_eq!(
            error.to_string(),
            "failed to find reference to class type Missing (type tree path: Game)"
        );
    }

    #[test]
    fn self_containing_class_is_rejected() {
        let error = emit("@BindTarget\ndefine Node { Node next; }").unwrap_err();
        assert!(matches!(error, GenerateError::RecursiveType { ref name, .. } if name == "Node"));
    }
}
