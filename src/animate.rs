//! Frame-paced numeric interpolation.

use crate::easing::Easing;
use crate::scheduler::{Scheduler, TaskId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Update callback, receives `(value, progress)`.
pub type UpdateCallback = Box<dyn FnMut(f64, f64)>;

/// Completion callback.
pub type CompleteCallback = Box<dyn FnOnce()>;

/// Options for [`animate_value`].
///
/// ```rust
/// use tailmotion::{animate_value, AnimateValueOptions, Easing, VirtualClock};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let clock = Rc::new(VirtualClock::new());
/// let last = Rc::new(Cell::new(0.0));
/// let sink = last.clone();
///
/// let options = AnimateValueOptions::new(100.0)
///     .duration(200.0)
///     .easing(Easing::Linear)
///     .on_update(move |value, _progress| sink.set(value));
/// let handle = animate_value(clock.clone(), options);
///
/// clock.advance(500.0);
/// assert_eq!(last.get(), 100.0);
/// assert!(!handle.is_active());
/// ```
pub struct AnimateValueOptions {
    pub from: f64,
    pub to: f64,
    /// Milliseconds.
    pub duration: f64,
    pub easing: Easing,
    pub on_update: Option<UpdateCallback>,
    pub on_complete: Option<CompleteCallback>,
}

impl AnimateValueOptions {
    /// Animate from 0 to `to` over 1500ms with `easeOutExpo`.
    pub fn new(to: f64) -> Self {
        Self {
            from: 0.0,
            to,
            duration: 1500.0,
            easing: Easing::default(),
            on_update: None,
            on_complete: None,
        }
    }

    pub fn from(mut self, from: f64) -> Self {
        self.from = from;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Accepts an [`Easing`] or a curve name; unknown names become `easeOutExpo`.
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(f64, f64) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

struct ValueAnimation {
    scheduler: Rc<dyn Scheduler>,
    from: f64,
    to: f64,
    duration: f64,
    easing: Easing,
    start_time: f64,
    cancelled: Cell<bool>,
    finished: Cell<bool>,
    pending: Cell<Option<TaskId>>,
    on_update: RefCell<UpdateCallback>,
    on_complete: RefCell<Option<CompleteCallback>>,
}

impl ValueAnimation {
    fn progress_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    fn schedule(self: &Rc<Self>) {
        let animation = Rc::clone(self);
        let id = self
            .scheduler
            .request_frame(Box::new(move |now| animation.tick(now)));
        self.pending.set(Some(id));
    }

    fn tick(self: &Rc<Self>, now: f64) {
        self.pending.set(None);
        if self.cancelled.get() {
            return;
        }

        let progress = self.progress_at(now);
        let eased = self.easing.apply(progress);
        let value = self.from + (self.to - self.from) * eased;

        (&mut *self.on_update.borrow_mut())(value, progress);

        if progress < 1.0 {
            // A cancel from inside on_update only has to stop future ticks.
            if !self.cancelled.get() {
                self.schedule();
            }
        } else {
            self.finished.set(true);
            let on_complete = self.on_complete.borrow_mut().take();
            if let Some(on_complete) = on_complete {
                on_complete();
            }
        }
    }
}

/// Returned by [`animate_value`]; cancels the animation.
///
/// Dropping the handle does not cancel: the scheduler keeps the animation
/// alive until it completes.
#[derive(Clone)]
pub struct CancelHandle {
    animation: Option<Rc<ValueAnimation>>,
}

impl CancelHandle {
    /// A handle that cancels nothing.
    pub fn noop() -> Self {
        Self { animation: None }
    }

    /// Stop the animation. Idempotent, and harmless after completion.
    pub fn cancel(&self) {
        let Some(animation) = &self.animation else {
            return;
        };
        animation.cancelled.set(true);
        if let Some(id) = animation.pending.take() {
            animation.scheduler.cancel(id);
        }
    }

    /// Whether the animation will still produce updates.
    pub fn is_active(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| !animation.cancelled.get() && !animation.finished.get())
    }

    pub fn is_cancelled(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| animation.cancelled.get())
    }
}

/// Animate a number from `options.from` to `options.to`.
///
/// Every frame calls `on_update(value, progress)`; once progress reaches 1,
/// `on_complete` runs exactly once. Without an `on_update` callback nothing is
/// scheduled and a no-op handle is returned.
pub fn animate_value(scheduler: Rc<dyn Scheduler>, options: AnimateValueOptions) -> CancelHandle {
    let AnimateValueOptions {
        from,
        to,
        duration,
        easing,
        on_update,
        on_complete,
    } = options;

    let Some(on_update) = on_update else {
        tracing::warn!("animate_value requires an on_update callback");
        return CancelHandle::noop();
    };

    let start_time = scheduler.now();
    let animation = Rc::new(ValueAnimation {
        scheduler,
        from,
        to,
        duration,
        easing,
        start_time,
        cancelled: Cell::new(false),
        finished: Cell::new(false),
        pending: Cell::new(None),
        on_update: RefCell::new(on_update),
        on_complete: RefCell::new(on_complete),
    });
    animation.schedule();

    CancelHandle {
        animation: Some(animation),
    }
}
