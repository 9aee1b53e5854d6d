//! Terminal previews of the animators on the tokio scheduler.

use crate::animate::{animate_value, AnimateValueOptions};
use crate::easing::Easing;
use crate::errors::{MotionError, Result};
use crate::rotator::{create_text_rotator, TextRotatorOptions};
use crate::runtime::TokioScheduler;
use crate::text::format_number;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::sync::Notify;
use tokio::task::LocalSet;

/// Settings for [`preview_count`].
#[derive(Debug, Clone)]
pub struct CountPreview {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub easing: Easing,
    pub separator: String,
    /// Draw nothing; for tests and piped output.
    pub hidden: bool,
}

/// Settings for [`preview_flip`].
#[derive(Debug, Clone)]
pub struct FlipPreview {
    pub words: Vec<String>,
    pub interval: f64,
    pub looping: bool,
    /// Total flips to show, the initial word included.
    pub cycles: usize,
    pub hidden: bool,
}

fn progress_bar(len: u64, template: &str, hidden: bool) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if hidden {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
    bar.set_style(style);
    bar
}

/// Count from `from` to `to` in real time, showing the formatted value.
///
/// Returns the last formatted value.
pub async fn preview_count(preview: CountPreview) -> Result<String> {
    if !preview.from.is_finite() || !preview.to.is_finite() {
        return Err(MotionError::InvalidInput(
            "count preview bounds must be finite numbers".to_string(),
        ));
    }

    LocalSet::new()
        .run_until(async move {
            let bar = progress_bar(1000, "{bar:40.cyan/blue} {msg}", preview.hidden);
            let done = Rc::new(Notify::new());
            let shown = Rc::new(RefCell::new(String::new()));

            let (update_bar, finish_bar) = (bar.clone(), bar.clone());
            let (update_text, signal) = (shown.clone(), done.clone());
            let separator = preview.separator.clone();
            let options = AnimateValueOptions::new(preview.to)
                .from(preview.from)
                .duration(preview.duration)
                .easing(preview.easing)
                .on_update(move |value, progress| {
                    let text = format_number(value, &separator);
                    update_bar.set_position((progress * 1000.0).round() as u64);
                    update_bar.set_message(text.clone());
                    *update_text.borrow_mut() = text;
                })
                .on_complete(move || {
                    finish_bar.finish();
                    signal.notify_one();
                });

            let _handle = animate_value(Rc::new(TokioScheduler::new()), options);
            done.notified().await;

            let text = shown.borrow().clone();
            Ok::<_, MotionError>(text)
        })
        .await
}

/// Rotate through `words` in real time, one line per flip.
///
/// Returns the words shown, in order.
pub async fn preview_flip(preview: FlipPreview) -> Result<Vec<String>> {
    if preview.words.len() < 2 {
        return Err(MotionError::InvalidInput(
            "text flip preview needs at least two words".to_string(),
        ));
    }

    LocalSet::new()
        .run_until(async move {
            let total = preview.cycles.max(1);
            let bar = progress_bar(total as u64, "[{pos}/{len}] {msg}", preview.hidden);
            let done = Rc::new(Notify::new());
            let shown = Rc::new(RefCell::new(Vec::new()));
            let flips = Rc::new(Cell::new(0usize));

            let last_index = preview.words.len() - 1;
            let looping = preview.looping;
            let (flip_bar, flip_log, signal) = (bar.clone(), shown.clone(), done.clone());
            let options = TextRotatorOptions::new(preview.words.iter().cloned())
                .interval(preview.interval)
                .looping(preview.looping)
                .on_flip(move |event| {
                    flips.set(flips.get() + 1);
                    flip_bar.inc(1);
                    flip_bar.println(&event.word);
                    flip_log.borrow_mut().push(event.word.clone());
                    if flips.get() >= total || (!looping && event.index == last_index) {
                        signal.notify_one();
                    }
                });

            let Some(rotator) = create_text_rotator(Rc::new(TokioScheduler::new()), options) else {
                return Err(MotionError::InvalidInput("could not create rotator".to_string()));
            };
            rotator.start();
            done.notified().await;
            rotator.stop();
            bar.finish_and_clear();

            let words = shown.borrow().clone();
            Ok::<_, MotionError>(words)
        })
        .await
}
