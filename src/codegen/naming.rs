//! Schema names → Rust identifiers.

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

/// `onScore` → `on_score`, `HTTPServer` → `http_server`, `Player2D` → `player2_d`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                Some(_) => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn screaming_snake_case(name: &str) -> String {
    snake_case(name).to_ascii_uppercase()
}

/// `onScore` → `OnScore`, `hit_points` → `HitPoints`.
pub fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Make `name` usable as an identifier: raw form for keywords, a trailing
/// underscore for the few words that have no raw form.
pub fn rust_ident(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_owned()
    }
}

/// Field and getter name of a property.
pub fn field_ident(property: &str) -> String {
    rust_ident(&snake_case(property))
}

pub fn getter_mut_ident(property: &str) -> String {
    format!("{}_mut", snake_case(property))
}

pub fn setter_ident(property: &str) -> String {
    format!("set_{}", snake_case(property))
}

/// Module holding the declarations nested inside class `name`.
pub fn module_ident(name: &str) -> String {
    rust_ident(&snake_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_handles_acronyms_and_digits() {
        assert_eq!(snake_case("onScore"), "on_score");
        assert_eq!(snake_case("Game"), "game");
        assert_eq!(snake_case("HTTPServer"), "http_server");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case("UIRoot"), "ui_root");
        assert_eq!(snake_case("Player2D"), "player2_d");
        assert_eq!(snake_case("_Private"), "_private");
    }

    #[test]
    fn pascal_and_screaming() {
        assert_eq!(pascal_case("onScore"), "OnScore");
        assert_eq!(pascal_case("hit_points"), "HitPoints");
        assert_eq!(screaming_snake_case("MainMenu"), "MAIN_MENU");
    }

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("Self"), "self_");
        assert_eq!(getter_mut_ident("type"), "type_mut");
        assert_eq!(setter_ident("onScore"), "set_on_score");
        assert_eq!(module_ident("Mod"), "r#mod");
    }
}
