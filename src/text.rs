//! Text helpers for count displays.

use crate::style::{StyleMap, DEFAULT_STAGGER};
use serde::Serialize;

/// Options for [`create_count_spans`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountSpanOptions {
    /// Delay between characters in milliseconds.
    pub stagger: f64,
}

impl Default for CountSpanOptions {
    fn default() -> Self {
        Self {
            stagger: DEFAULT_STAGGER,
        }
    }
}

/// Render data for one character of a count reveal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountSpan {
    #[serde(rename = "char")]
    pub ch: char,
    pub index: usize,
    pub style: StyleMap,
    /// `index * stagger`, in milliseconds.
    pub delay: f64,
}

/// Split `text` into per-character span data carrying `--tm-stagger`.
pub fn create_count_spans(text: &str, options: CountSpanOptions) -> Vec<CountSpan> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            let mut style = StyleMap::new();
            style.set("--tm-stagger", index);
            CountSpan {
                ch,
                index,
                style,
                delay: index as f64 * options.stagger,
            }
        })
        .collect()
}

/// Round to an integer and group thousands with `separator`.
///
/// Rounding matches `Math.round` (halves go up, so `-2.5` becomes `-2`).
///
/// ```rust
/// use tailmotion::format_number;
///
/// assert_eq!(format_number(1234567.0, ","), "1,234,567");
/// assert_eq!(format_number(999.0, ","), "999");
/// assert_eq!(format_number(-9876.5, "."), "-9.876");
/// ```
pub fn format_number(num: f64, separator: &str) -> String {
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        let text = if num > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let rounded = (num + 0.5).floor();
    if rounded == 0.0 {
        return "0".to_string();
    }

    let digits = format!("{}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
