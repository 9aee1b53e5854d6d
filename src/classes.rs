//! `tm-*` class string builder.

use crate::style::CssValue;

/// Prefix shared by every TailMotion class.
pub const CLASS_PREFIX: &str = "tm-";

/// Optional modifiers for [`tm`]. Falsy values (`0`, `""`) are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TmModifiers {
    pub duration: Option<CssValue>,
    pub delay: Option<CssValue>,
    pub repeat: Option<CssValue>,
    pub ease: Option<CssValue>,
}

impl TmModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, value: impl Into<CssValue>) -> Self {
        self.duration = Some(value.into());
        self
    }

    pub fn delay(mut self, value: impl Into<CssValue>) -> Self {
        self.delay = Some(value.into());
        self
    }

    pub fn repeat(mut self, value: impl Into<CssValue>) -> Self {
        self.repeat = Some(value.into());
        self
    }

    pub fn ease(mut self, value: impl Into<CssValue>) -> Self {
        self.ease = Some(value.into());
        self
    }

    fn classes(&self) -> impl Iterator<Item = String> + '_ {
        [
            ("duration", &self.duration),
            ("delay", &self.delay),
            ("repeat", &self.repeat),
            ("ease", &self.ease),
        ]
        .into_iter()
        .filter_map(|(kind, value)| {
            value
                .as_ref()
                .filter(|value| value.is_truthy())
                .map(|value| format!("{}{}-{}", CLASS_PREFIX, kind, value))
        })
    }
}

/// Build a TailMotion class string.
///
/// ```rust
/// use tailmotion::{tm, TmModifiers};
///
/// let classes = tm("bounce", &TmModifiers::new().duration(300).repeat("infinite"));
/// assert_eq!(classes, "tm-bounce tm-duration-300 tm-repeat-infinite");
/// ```
pub fn tm(animation: &str, modifiers: &TmModifiers) -> String {
    std::iter::once(format!("{}{}", CLASS_PREFIX, animation))
        .chain(modifiers.classes())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_animation() {
        assert_eq!(tm("fade-in", &TmModifiers::default()), "tm-fade-in");
    }

    #[test]
    fn test_modifier_order_is_fixed() {
        let modifiers = TmModifiers::new()
            .ease("snappy")
            .repeat(2)
            .delay(150)
            .duration(700);
        assert_eq!(
            tm("pop", &modifiers),
            "tm-pop tm-duration-700 tm-delay-150 tm-repeat-2 tm-ease-snappy"
        );
    }

    #[test]
    fn test_falsy_modifiers_are_skipped() {
        let modifiers = TmModifiers::new().duration(0).delay("").ease("in-out");
        assert_eq!(tm("spin", &modifiers), "tm-spin tm-ease-in-out");
    }
}
