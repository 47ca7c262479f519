//! Key and value-type layout of the config file.
//!
//! Shared with `build.rs`, which rejects a bundled `default_config.toml`
//! that would not deserialize into `Config`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Integer,
    Float,
    String,
}

impl Kind {
    fn matches(self, value: &toml::Value) -> bool {
        match self {
            Kind::Bool => value.is_bool(),
            Kind::Integer => value.as_integer().is_some_and(|n| n >= 0),
            // TOML integers deserialize into f64 fields too
            Kind::Float => value.is_float() || value.is_integer(),
            Kind::String => value.is_str(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::Bool => "boolean",
            Kind::Integer => "non-negative integer",
            Kind::Float => "number",
            Kind::String => "string",
        }
    }
}

pub const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    ("page", &[("numbers", Kind::Bool), ("header", Kind::String)]),
    ("links", &[("color", Kind::String), ("underline", Kind::Bool)]),
    ("font", &[("family", Kind::String), ("body_size", Kind::Integer)]),
    ("layout", &[("indent", Kind::Float)]),
];

/// Check that every section and key is present with the right value type,
/// and that nothing unknown is set.
pub fn check(table: &toml::Table) -> Result<(), String> {
    for (section, keys) in SCHEMA {
        let Some(entries) = table.get(*section).and_then(toml::Value::as_table) else {
            return Err(format!("missing the [{section}] table"));
        };
        for (key, kind) in *keys {
            match entries.get(*key) {
                None => return Err(format!("missing {section}.{key}")),
                Some(value) if !kind.matches(value) => {
                    return Err(format!(
                        "{section}.{key} should be a {}, found {}",
                        kind.name(),
                        value.type_str()
                    ));
                }
                Some(_) => {}
            }
        }
        if let Some(unknown) = entries
            .keys()
            .find(|k| !keys.iter().any(|(key, _)| *key == k.as_str()))
        {
            return Err(format!("unknown key {section}.{unknown}"));
        }
    }
    if let Some(unknown) = table.keys().find(|k| !SCHEMA.iter().any(|(s, _)| *s == k.as_str())) {
        return Err(format!("unknown section [{unknown}]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_str(content: &str) -> Result<(), String> {
        check(&content.parse::<toml::Table>().unwrap())
    }

    const VALID: &str = "\
[page]
numbers = true
header = \"\"
[links]
color = \"#000000\"
underline = false
[font]
family = \"\"
body_size = 11
[layout]
indent = 1.2
";

    #[test]
    fn bundled_default_passes() {
        assert_eq!(check_str(include_str!("default_config.toml")), Ok(()));
    }

    #[test]
    fn complete_config_passes() {
        assert_eq!(check_str(VALID), Ok(()));
    }

    #[test]
    fn quoted_number_is_rejected() {
        let content = VALID.replace("body_size = 11", "body_size = \"11\"");
        assert_eq!(
            check_str(&content),
            Err("font.body_size should be a non-negative integer, found string".to_string())
        );
    }

    #[test]
    fn integer_indent_is_accepted() {
        let content = VALID.replace("indent = 1.2", "indent = 2");
        assert_eq!(check_str(&content), Ok(()));
    }

    #[test]
    fn missing_section_is_rejected() {
        let content = VALID.replace("[layout]\nindent = 1.2\n", "");
        assert_eq!(check_str(&content), Err("missing the [layout] table".to_string()));
    }

    #[test]
    fn missing_key_is_rejected() {
        let content = VALID.replace("underline = false\n", "");
        assert_eq!(check_str(&content), Err("missing links.underline".to_string()));
    }

    #[test]
    fn misspelled_key_is_rejected() {
        let content = VALID.replace("header = \"\"", "header = \"\"\nheadr = \"x\"");
        assert_eq!(check_str(&content), Err("unknown key page.headr".to_string()));
    }
}
