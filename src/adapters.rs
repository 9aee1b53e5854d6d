//! Element initializers for non-framework pages.
//!
//! These wire the count-span and rotator helpers to an [`Element`]. Framework
//! code should use the helpers directly and render the data itself.

use crate::dom::Element;
use crate::rotator::{create_text_rotator, FlipEvent, TextRotator, TextRotatorOptions};
use crate::scheduler::Scheduler;
use crate::text::{create_count_spans, CountSpanOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Split an element's text into staggered character spans.
///
/// Adds `tm-count-reveal` to the element; the stylesheet animates the spans
/// from their `--tm-stagger` index.
pub fn init_count_reveal_element(element: &Element, options: CountSpanOptions) {
    let text = element.text_content();
    let spans = create_count_spans(&text, options);

    element.clear_children();
    element.add_class("tm-count-reveal");

    for span_data in spans {
        let span = Element::span();
        span.set_text_content(&span_data.ch.to_string());
        for (property, value) in &span_data.style {
            span.set_style_property(property, value.clone());
        }
        element.append_child(&span);
    }
}

/// Visual treatment of a text flip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipVariant {
    #[default]
    Flip,
    Morph,
    Rotate,
    /// Per-character spans, replaced wholesale on every flip.
    Chars,
}

impl FlipVariant {
    pub fn container_class(&self) -> &'static str {
        match self {
            FlipVariant::Flip => "tm-text-flip",
            FlipVariant::Morph => "tm-text-morph",
            FlipVariant::Rotate => "tm-text-rotate",
            FlipVariant::Chars => "tm-text-flip-chars",
        }
    }

    /// Class of each word span; `None` for [`FlipVariant::Chars`].
    pub fn word_class(&self) -> Option<&'static str> {
        match self {
            FlipVariant::Flip => Some("tm-text-flip-word"),
            FlipVariant::Morph => Some("tm-text-morph-word"),
            FlipVariant::Rotate => Some("tm-text-rotate-word"),
            FlipVariant::Chars => None,
        }
    }

    pub fn out_class(&self) -> &'static str {
        match self {
            FlipVariant::Morph => "tm-morph-out",
            FlipVariant::Rotate => "tm-rotate-out",
            FlipVariant::Flip | FlipVariant::Chars => "tm-flip-out",
        }
    }
}

impl FromStr for FlipVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flip" => Ok(FlipVariant::Flip),
            "morph" => Ok(FlipVariant::Morph),
            "rotate" => Ok(FlipVariant::Rotate),
            "chars" => Ok(FlipVariant::Chars),
            other => Err(format!(
                "unknown text flip variant '{}' (expected flip, morph, rotate or chars)",
                other
            )),
        }
    }
}

impl fmt::Display for FlipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlipVariant::Flip => "flip",
            FlipVariant::Morph => "morph",
            FlipVariant::Rotate => "rotate",
            FlipVariant::Chars => "chars",
        };
        f.write_str(name)
    }
}

/// Options for [`init_text_flip_element`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextFlipOptions {
    pub words: Vec<String>,
    pub variant: FlipVariant,
    /// Transition length in milliseconds; also how long an outgoing word
    /// stays in the document.
    pub duration: f64,
    /// Milliseconds between flips.
    pub interval: f64,
    pub looping: bool,
}

impl TextFlipOptions {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            variant: FlipVariant::default(),
            duration: 500.0,
            interval: 2500.0,
            looping: true,
        }
    }

    pub fn variant(mut self, variant: FlipVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn interval(mut self, interval: f64) -> Self {
        self.interval = interval;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

fn char_spans(word: &str) -> Vec<Element> {
    word.chars()
        .enumerate()
        .map(|(index, ch)| {
            let span = Element::span();
            let ch = if ch == ' ' { '\u{00A0}' } else { ch };
            span.set_text_content(&ch.to_string());
            span.set_style_property("--tm-char-index", index);
            span
        })
        .collect()
}

fn word_span(word: &str, class: &str) -> Element {
    let span = Element::span();
    span.set_text_content(word);
    span.add_class(class);
    span
}

fn render_flip(scheduler: &Rc<dyn Scheduler>, element: &Element, options: &TextFlipOptions, event: &FlipEvent) {
    let Some(word_class) = options.variant.word_class() else {
        element.clear_children();
        for span in char_spans(&event.word) {
            element.append_child(&span);
        }
        return;
    };

    element.append_child(&word_span(&event.word, word_class));

    if event.prev_word.is_none() {
        return;
    }
    if let Some(old) = element.first_child_with_class_not_last(word_class) {
        old.add_class(options.variant.out_class());
        scheduler.set_timeout(options.duration, Box::new(move || old.remove()));
    }
}

/// Turn `element` into a rotating word display and start it.
///
/// Returns the running rotator, or `None` with fewer than two words.
pub fn init_text_flip_element(
    scheduler: Rc<dyn Scheduler>,
    element: &Element,
    options: TextFlipOptions,
) -> Option<TextRotator> {
    if options.words.len() < 2 {
        return None;
    }

    element.add_class(options.variant.container_class());
    element.set_style_property("--tm-duration", format!("{}ms", crate::style::js_number(options.duration)));

    let rotator_options = TextRotatorOptions::new(options.words.iter().cloned())
        .interval(options.interval)
        .looping(options.looping);

    let flip_scheduler = Rc::clone(&scheduler);
    let target = element.clone();
    let rotator = create_text_rotator(
        scheduler,
        rotator_options.on_flip(move |event| render_flip(&flip_scheduler, &target, &options, event)),
    )?;

    rotator.start();
    Some(rotator)
}
