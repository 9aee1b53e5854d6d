//! `tm-*` utility classes backed by custom properties.
//!
//! Mirrors the TailMotion Tailwind plugin: four token tables, merged
//! defaults ← theme ← options, each utility forcing its custom property with
//! `!important`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub type TokenTable = IndexMap<String, String>;

/// Token tables for the utilities.
///
/// Tables missing from a config file deserialize empty, so a partial layer
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionTokens {
    #[serde(default)]
    pub durations: TokenTable,
    #[serde(default)]
    pub delays: TokenTable,
    #[serde(default)]
    pub easing: TokenTable,
    #[serde(default)]
    pub repeat: TokenTable,
}

fn table(entries: &[(&str, &str)]) -> TokenTable {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn millis(keys: &[u32]) -> TokenTable {
    keys.iter()
        .map(|key| (key.to_string(), format!("{}ms", key)))
        .collect()
}

impl Default for MotionTokens {
    fn default() -> Self {
        Self {
            durations: millis(&[150, 200, 300, 400, 500, 700, 900, 1000, 1200, 1400, 1600, 2000, 3000]),
            delays: millis(&[0, 75, 150, 200, 300, 400, 500, 700, 1000]),
            easing: table(&[
                ("linear", "linear"),
                ("in", "cubic-bezier(0.55, 0.085, 0.68, 0.53)"),
                ("out", "cubic-bezier(0.25, 0.46, 0.45, 0.94)"),
                ("in-out", "cubic-bezier(0.645, 0.045, 0.355, 1)"),
                ("soft", "cubic-bezier(0.4, 0, 0.2, 1)"),
                ("snappy", "cubic-bezier(0.34, 1.56, 0.64, 1)"),
                ("bouncy", "cubic-bezier(0.68, -0.55, 0.265, 1.55)"),
            ]),
            repeat: table(&[("1", "1"), ("2", "2"), ("3", "3"), ("infinite", "infinite")]),
        }
    }
}

impl MotionTokens {
    /// Tables with no entries, for use as an override layer.
    pub fn empty() -> Self {
        Self {
            durations: TokenTable::new(),
            delays: TokenTable::new(),
            easing: TokenTable::new(),
            repeat: TokenTable::new(),
        }
    }

    /// Layer `other` on top of `self`; later keys win, first-seen order kept.
    pub fn merge(mut self, other: &MotionTokens) -> Self {
        self.durations.extend(other.durations.clone());
        self.delays.extend(other.delays.clone());
        self.easing.extend(other.easing.clone());
        self.repeat.extend(other.repeat.clone());
        self
    }

    pub fn len(&self) -> usize {
        self.durations.len() + self.delays.len() + self.easing.len() + self.repeat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Defaults, then theme tokens, then option tokens.
pub fn resolve_tokens(theme: &MotionTokens, options: &MotionTokens) -> MotionTokens {
    MotionTokens::default().merge(theme).merge(options)
}

/// Append ` !important` unless already present.
pub fn with_important(value: &str) -> String {
    if value.trim().ends_with("!important") {
        value.to_string()
    } else {
        format!("{} !important", value)
    }
}

/// Utility families: class prefix and the property it sets.
pub const UTILITY_FAMILIES: [(&str, &str); 4] = [
    ("tm-duration", "--tm-duration"),
    ("tm-delay", "--tm-delay"),
    ("tm-ease", "--tm-easing"),
    ("tm-repeat", "--tm-iteration-count"),
];

/// One generated utility class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utility {
    pub class_name: String,
    pub property: &'static str,
    pub value: String,
}

impl Utility {
    pub fn to_css(&self) -> String {
        format!(".{} {{ {}: {}; }}", escape_class(&self.class_name), self.property, self.value)
    }
}

/// Every utility for `tokens`, family by family in table order.
pub fn generate_utilities(tokens: &MotionTokens) -> Vec<Utility> {
    let tables = [&tokens.durations, &tokens.delays, &tokens.easing, &tokens.repeat];
    UTILITY_FAMILIES
        .iter()
        .zip(tables)
        .flat_map(|(&(prefix, property), table)| {
            table.iter().map(move |(key, value)| Utility {
                class_name: format!("{}-{}", prefix, key),
                property,
                value: with_important(value),
            })
        })
        .collect()
}

/// Render the utilities as a stylesheet, one rule per line.
pub fn render_utilities(tokens: &MotionTokens) -> String {
    let mut css = String::new();
    for utility in generate_utilities(tokens) {
        let _ = writeln!(css, "{}", utility.to_css());
    }
    css
}

/// Escape a class name for use in a selector.
pub fn escape_class(class_name: &str) -> String {
    let mut escaped = String::with_capacity(class_name.len());
    for (i, ch) in class_name.chars().enumerate() {
        let leading_digit = i == 0 && ch.is_ascii_digit();
        if leading_digit {
            let _ = write!(escaped, "\\{:x} ", ch as u32);
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            escaped.push(ch);
        } else {
            escaped.push('\\');
            escaped.push(ch);
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tokens() {
        let tokens = MotionTokens::default();
        assert_eq!(tokens.durations.len(), 13);
        assert_eq!(tokens.delays.get("0").map(String::as_str), Some("0ms"));
        assert_eq!(tokens.easing.get("in-out").map(String::as_str), Some("cubic-bezier(0.645, 0.045, 0.355, 1)"));
        assert_eq!(tokens.repeat.keys().last().map(String::as_str), Some("infinite"));
    }

    #[test]
    fn test_merge_order() {
        let mut theme = MotionTokens::empty();
        theme.durations.insert("300".to_string(), "280ms".to_string());
        theme.durations.insert("5000".to_string(), "5s".to_string());
        let mut options = MotionTokens::empty();
        options.durations.insert("300".to_string(), "320ms".to_string());

        let tokens = resolve_tokens(&theme, &options);
        assert_eq!(tokens.durations["300"], "320ms");
        assert_eq!(tokens.durations["5000"], "5s");
        // Overridden keys keep their default position
        assert_eq!(tokens.durations.get_index_of("300"), Some(2));
        assert_eq!(tokens.durations.keys().last().map(String::as_str), Some("5000"));
    }

    #[test]
    fn test_with_important_is_idempotent() {
        assert_eq!(with_important("300ms"), "300ms !important");
        assert_eq!(with_important("300ms !important"), "300ms !important");
        assert_eq!(with_important("1 !important  "), "1 !important  ");
    }

    #[test]
    fn test_utility_properties() {
        let utilities = generate_utilities(&MotionTokens::default());
        assert_eq!(utilities.len(), MotionTokens::default().len());

        let ease = utilities.iter().find(|u| u.class_name == "tm-ease-snappy").unwrap();
        assert_eq!(ease.property, "--tm-easing");
        assert_eq!(ease.value, "cubic-bezier(0.34, 1.56, 0.64, 1) !important");

        let repeat = utilities.iter().find(|u| u.class_name == "tm-repeat-infinite").unwrap();
        assert_eq!(repeat.property, "--tm-iteration-count");
    }

    #[test]
    fn test_render_utilities_snapshot() {
        let tokens = MotionTokens {
            durations: table(&[("300", "300ms")]),
            delays: table(&[("75", "75ms")]),
            easing: table(&[("soft", "cubic-bezier(0.4, 0, 0.2, 1)")]),
            repeat: table(&[("infinite", "infinite !important")]),
        };
        insta::assert_snapshot!(render_utilities(&tokens), @r"
        .tm-duration-300 { --tm-duration: 300ms !important; }
        .tm-delay-75 { --tm-delay: 75ms !important; }
        .tm-ease-soft { --tm-easing: cubic-bezier(0.4, 0, 0.2, 1) !important; }
        .tm-repeat-infinite { --tm-iteration-count: infinite !important; }
        ");
    }

    #[test]
    fn test_escape_class() {
        assert_eq!(escape_class("tm-duration-300"), "tm-duration-300");
        assert_eq!(escape_class("tm-delay-0.5"), "tm-delay-0\\.5");
        assert_eq!(escape_class("tm-ease-a/b"), "tm-ease-a\\/b");
        assert_eq!(escape_class("3d"), "\\33 d");
    }
}
