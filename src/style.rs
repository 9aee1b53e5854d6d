//! CSS custom-property helpers.
//!
//! Everything emitted here lives in the `--tm-` namespace consumed by the
//! TailMotion stylesheet and by the `tm-*` utilities.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Prefix of every generated custom property.
pub const VAR_PREFIX: &str = "--tm-";

/// A style or class value: a number or a piece of text.
#[derive(Clone, Debug, PartialEq)]
pub enum CssValue {
    Number(f64),
    Text(String),
}

impl CssValue {
    /// JavaScript truthiness: non-zero numbers and non-empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            CssValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CssValue::Text(s) => !s.is_empty(),
        }
    }
}

/// Format a number the way JavaScript stringifies it in templates.
pub(crate) fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // Covers -0
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Number(n) => f.write_str(&js_number(*n)),
            CssValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for CssValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CssValue::Number(n) => serializer.serialize_f64(*n),
            CssValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

macro_rules! css_number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CssValue {
                fn from(n: $ty) -> Self {
                    CssValue::Number(n as f64)
                }
            }
        )*
    };
}

css_number_from!(i32, i64, u32, u64, usize, f32, f64);

impl From<&str> for CssValue {
    fn from(s: &str) -> Self {
        CssValue::Text(s.to_string())
    }
}

impl From<String> for CssValue {
    fn from(s: String) -> Self {
        CssValue::Text(s)
    }
}

/// Insertion-ordered set of style properties.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleMap(IndexMap<String, CssValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<CssValue>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&CssValue> {
        self.0.get(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<CssValue> {
        self.0.shift_remove(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CssValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render as the value of an HTML `style` attribute.
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K: Into<String>, V: Into<CssValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut style = StyleMap::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a String, &'a CssValue);
    type IntoIter = indexmap::map::Iter<'a, String, CssValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a style map of custom properties.
///
/// Keys already starting with `--` are kept; others get the `--tm-` prefix.
///
/// ```rust
/// use tailmotion::css_vars;
///
/// let style = css_vars([("duration", "300ms"), ("--brand", "teal")]);
/// assert_eq!(style.to_inline(), "--tm-duration: 300ms; --brand: teal");
/// ```
pub fn css_vars<I, K, V>(vars: I) -> StyleMap
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<CssValue>,
{
    vars.into_iter()
        .map(|(key, value)| {
            let key = key.as_ref();
            let name = if key.starts_with("--") {
                key.to_string()
            } else {
                format!("{}{}", VAR_PREFIX, key)
            };
            (name, value)
        })
        .collect()
}

/// Default delay between staggered siblings, in milliseconds.
pub const DEFAULT_STAGGER: f64 = 50.0;

/// Stagger variables for the child at `index`.
pub fn stagger_style(index: usize, stagger: f64) -> StyleMap {
    let mut style = StyleMap::new();
    style.set("--tm-stagger", index);
    style.set("--tm-delay", format!("{}ms", js_number(index as f64 * stagger)));
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_vars_prefixing() {
        let style = css_vars([("duration", CssValue::from("300ms")), ("--custom", CssValue::from(4))]);
        assert_eq!(style.get("--tm-duration"), Some(&CssValue::from("300ms")));
        assert_eq!(style.get("--custom"), Some(&CssValue::Number(4.0)));
        assert!(style.get("--tm---custom").is_none());
    }

    #[test]
    fn test_stagger_style() {
        let style = stagger_style(3, DEFAULT_STAGGER);
        assert_eq!(style.to_inline(), "--tm-stagger: 3; --tm-delay: 150ms");

        let style = stagger_style(3, 12.5);
        assert_eq!(style.get("--tm-delay"), Some(&CssValue::from("37.5ms")));
    }

    #[test]
    fn test_js_number_formatting() {
        assert_eq!(js_number(300.0), "300");
        assert_eq!(js_number(12.5), "12.5");
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(f64::NAN), "NaN");
        assert_eq!(js_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_truthiness() {
        assert!(CssValue::from(300).is_truthy());
        assert!(CssValue::from("infinite").is_truthy());
        assert!(CssValue::from("0").is_truthy());
        assert!(!CssValue::from(0).is_truthy());
        assert!(!CssValue::from("").is_truthy());
        assert!(!CssValue::Number(f64::NAN).is_truthy());
    }

    #[test]
    fn test_style_serializes_in_order() {
        let style = stagger_style(1, 50.0);
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r#"{"--tm-stagger":1.0,"--tm-delay":"50ms"}"#);
    }
}
