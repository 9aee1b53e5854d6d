//! Fixed-period word rotation.

use crate::scheduler::{Scheduler, TaskId};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One transition of a [`TextRotator`].
///
/// The initial notification sent on creation has no previous word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlipEvent {
    pub word: String,
    pub index: usize,
    pub prev_word: Option<String>,
    pub prev_index: Option<usize>,
}

/// Flip callback. `Fn` so that it may call back into the rotator.
pub type FlipCallback = Rc<dyn Fn(&FlipEvent)>;

/// Options for [`create_text_rotator`].
pub struct TextRotatorOptions {
    pub words: Vec<String>,
    /// Milliseconds between automatic flips.
    pub interval: f64,
    /// Wrap around after the last word; otherwise rotation halts there.
    pub looping: bool,
    pub on_flip: Option<FlipCallback>,
}

impl TextRotatorOptions {
    /// Rotate `words` every 2500ms, looping.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            interval: 2500.0,
            looping: true,
            on_flip: None,
        }
    }

    pub fn interval(mut self, interval: f64) -> Self {
        self.interval = interval;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn on_flip(mut self, callback: impl Fn(&FlipEvent) + 'static) -> Self {
        self.on_flip = Some(Rc::new(callback));
        self
    }
}

struct RotatorState {
    scheduler: Rc<dyn Scheduler>,
    words: Vec<String>,
    interval: f64,
    looping: bool,
    current_index: Cell<usize>,
    is_running: Cell<bool>,
    timer: Cell<Option<TaskId>>,
    on_flip: FlipCallback,
}

/// Handle to a word rotator.
///
/// Clones share the same rotator. While running, the timer keeps the rotator
/// alive even if every handle is dropped; `stop()` releases it.
///
/// ```rust
/// use tailmotion::{create_text_rotator, TextRotatorOptions, VirtualClock};
/// use std::rc::Rc;
///
/// let clock = Rc::new(VirtualClock::new());
/// let options = TextRotatorOptions::new(["fast", "tiny", "framework-free"])
///     .interval(1000.0)
///     .on_flip(|event| println!("{} -> {}", event.prev_word.as_deref().unwrap_or("-"), event.word));
///
/// let rotator = create_text_rotator(clock.clone(), options).expect("two or more words");
/// rotator.start();
/// clock.advance(2000.0);
/// assert_eq!(rotator.current_word(), "framework-free");
/// ```
#[derive(Clone)]
pub struct TextRotator {
    state: Rc<RotatorState>,
}

impl TextRotator {
    /// Begin automatic rotation. No-op while running.
    pub fn start(&self) {
        let state = &self.state;
        if state.is_running.get() {
            return;
        }
        state.is_running.set(true);

        let rotator = self.clone();
        let id = state
            .scheduler
            .set_interval(state.interval, Box::new(move || rotator.next()));
        state.timer.set(Some(id));
    }

    /// Halt automatic rotation. Idempotent.
    pub fn stop(&self) {
        let state = &self.state;
        state.is_running.set(false);
        if let Some(id) = state.timer.take() {
            state.scheduler.cancel(id);
        }
    }

    /// Flip to the following word. A non-looping rotator on its last word
    /// stops instead.
    pub fn next(&self) {
        let next_index = self.state.current_index.get() + 1;
        if !self.state.looping && next_index >= self.state.words.len() {
            self.stop();
            return;
        }
        self.flip(next_index as i64);
    }

    /// Flip to the preceding word, wrapping to the end.
    pub fn prev(&self) {
        self.flip(self.state.current_index.get() as i64 - 1);
    }

    /// Flip straight to `index`, wrapped into range.
    ///
    /// Unlike [`next`](Self::next), this ignores the loop setting.
    pub fn go_to(&self, index: i64) {
        self.flip(index);
    }

    /// Same as [`stop`](Self::stop). The rotator can be started again.
    pub fn destroy(&self) {
        self.stop();
    }

    pub fn current_word(&self) -> &str {
        &self.state.words[self.state.current_index.get()]
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index.get()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running.get()
    }

    pub fn words(&self) -> &[String] {
        &self.state.words
    }

    pub fn interval(&self) -> f64 {
        self.state.interval
    }

    fn flip(&self, target: i64) {
        let state = &self.state;
        let prev_index = state.current_index.get();
        let index = wrap_index(target, state.words.len());
        state.current_index.set(index);

        let event = FlipEvent {
            word: state.words[index].clone(),
            index,
            prev_word: Some(state.words[prev_index].clone()),
            prev_index: Some(prev_index),
        };
        let on_flip = Rc::clone(&state.on_flip);
        on_flip(&event);
    }
}

/// `((n % len) + len) % len`, valid for negative `n`.
pub(crate) fn wrap_index(n: i64, len: usize) -> usize {
    n.rem_euclid(len as i64) as usize
}

/// Create a word rotator.
///
/// Fires `on_flip` once for the first word before returning. Returns `None`
/// (and logs a warning) with fewer than two words or without a callback. The
/// rotator is created stopped; call [`TextRotator::start`].
pub fn create_text_rotator(scheduler: Rc<dyn Scheduler>, options: TextRotatorOptions) -> Option<TextRotator> {
    let TextRotatorOptions {
        words,
        interval,
        looping,
        on_flip,
    } = options;

    let on_flip = match on_flip {
        Some(on_flip) if words.len() >= 2 => on_flip,
        _ => {
            tracing::warn!(
                words = words.len(),
                "create_text_rotator requires at least two words and an on_flip callback"
            );
            return None;
        }
    };

    let rotator = TextRotator {
        state: Rc::new(RotatorState {
            scheduler,
            words,
            interval,
            looping,
            current_index: Cell::new(0),
            is_running: Cell::new(false),
            timer: Cell::new(None),
            on_flip,
        }),
    };

    let initial = FlipEvent {
        word: rotator.state.words[0].clone(),
        index: 0,
        prev_word: None,
        prev_index: None,
    };
    (rotator.state.on_flip)(&initial);

    Some(rotator)
}

/// Collects flip events, for tests and headless rendering.
#[derive(Clone, Default)]
pub struct FlipRecorder {
    events: Rc<RefCell<Vec<FlipEvent>>>,
}

impl FlipRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends to this recorder.
    pub fn callback(&self) -> impl Fn(&FlipEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(event.clone())
    }

    pub fn events(&self) -> Vec<FlipEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn last(&self) -> Option<FlipEvent> {
        self.events.borrow().last().cloned()
    }
}
