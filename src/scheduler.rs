//! Scheduling seam for the animators.
//!
//! Everything time-driven in this crate goes through [`Scheduler`]: the value
//! animator requests frame callbacks, the word rotator starts a repeating timer
//! and the text-flip adapter uses one-shot timeouts. [`VirtualClock`] is a
//! deterministic implementation driven by hand; the tokio-backed one lives in
//! [`crate::runtime`].
//!
//! All times are milliseconds as `f64`, like `performance.now()`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Opaque token for a pending frame callback or timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Frame callback, receives the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Repeating timer callback.
pub type IntervalCallback = Box<dyn FnMut()>;

/// One-shot timer callback.
pub type TimeoutCallback = Box<dyn FnOnce()>;

/// Single-threaded scheduler for frame callbacks and timers.
///
/// Implementations must tolerate `cancel` being called for tasks that already
/// fired, were already cancelled, or are currently running.
pub trait Scheduler {
    /// Monotonic clock in milliseconds.
    fn now(&self) -> f64;

    /// Run `callback` once on the next frame.
    fn request_frame(&self, callback: FrameCallback) -> TaskId;

    /// Run `callback` every `period` milliseconds until cancelled.
    fn set_interval(&self, period: f64, callback: IntervalCallback) -> TaskId;

    /// Run `callback` once after `delay` milliseconds.
    fn set_timeout(&self, delay: f64, callback: TimeoutCallback) -> TaskId;

    /// Withdraw a pending frame callback or timer.
    fn cancel(&self, id: TaskId);
}

/// 60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: f64 = 1000.0 / 60.0;

enum TimerCallback {
    Once(TimeoutCallback),
    Repeat(IntervalCallback),
}

struct Timer {
    due: f64,
    period: f64,
    callback: TimerCallback,
}

struct ClockState {
    now: f64,
    next_id: u64,
    frame_interval: f64,
    frames: Vec<(TaskId, FrameCallback)>,
    timers: BTreeMap<TaskId, Timer>,
    // Timer currently executing, and whether it was cancelled from inside.
    running: Option<TaskId>,
    running_cancelled: bool,
    frames_rendered: u64,
}

impl ClockState {
    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }

    /// Earliest timer due at or before `limit`, ties broken by creation order.
    fn next_due(&self, limit: f64) -> Option<TaskId> {
        self.timers
            .iter()
            .filter(|(_, timer)| timer.due <= limit)
            .min_by(|(a_id, a), (b_id, b)| a.due.total_cmp(&b.due).then(a_id.cmp(b_id)))
            .map(|(id, _)| *id)
    }
}

/// Deterministic, manually advanced scheduler.
///
/// Frames are produced every `frame_interval` milliseconds of virtual time
/// while a frame callback is waiting; timers fire at their due time. Cloning yields another handle to the same
/// clock.
///
/// ```rust
/// use tailmotion::{Scheduler, VirtualClock};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let clock = VirtualClock::new();
/// let fired = Rc::new(Cell::new(0));
/// let counter = fired.clone();
/// clock.set_interval(100.0, Box::new(move || counter.set(counter.get() + 1)));
///
/// clock.advance(350.0);
/// assert_eq!(fired.get(), 3);
/// ```
#[derive(Clone)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                now: 0.0,
                next_id: 0,
                frame_interval: frame_interval.max(f64::EPSILON),
                frames: Vec::new(),
                timers: BTreeMap::new(),
                running: None,
                running_cancelled: false,
                frames_rendered: 0,
            })),
        }
    }

    pub fn frame_interval(&self) -> f64 {
        self.state.borrow().frame_interval
    }

    /// Number of frame callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    /// Number of live timers (intervals and timeouts).
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Number of frames produced so far.
    pub fn frames_rendered(&self) -> u64 {
        self.state.borrow().frames_rendered
    }

    /// Advance one frame interval, firing due timers and then the frame.
    pub fn step_frame(&self) {
        let target = {
            let state = self.state.borrow();
            state.now + state.frame_interval
        };
        self.run_timers_until(target);
        self.state.borrow_mut().now = target;
        self.render_frame();
    }

    /// Advance virtual time by `ms`, producing frames and firing timers in
    /// time order. While no frame callback is pending, time jumps straight to
    /// the next due timer.
    pub fn advance(&self, ms: f64) {
        let target = self.now() + ms.max(0.0);
        loop {
            let (idle, next_frame, next_timer) = {
                let state = self.state.borrow();
                (
                    state.frames.is_empty(),
                    state.now + state.frame_interval,
                    state.next_due(target).and_then(|id| state.timers.get(&id)).map(|timer| timer.due),
                )
            };
            if idle {
                let Some(due) = next_timer else {
                    break;
                };
                self.run_timers_until(due);
                continue;
            }
            if next_frame > target {
                break;
            }
            self.step_frame();
        }
        self.run_timers_until(target);
        self.state.borrow_mut().now = target;
    }

    /// Step frames until no frame callback is pending, up to `max_frames`.
    /// Returns the number of frames stepped.
    pub fn run_frames(&self, max_frames: usize) -> usize {
        let mut stepped = 0;
        while stepped < max_frames && self.pending_frames() > 0 {
            self.step_frame();
            stepped += 1;
        }
        stepped
    }

    fn render_frame(&self) {
        // Callbacks requested while this frame runs belong to the next one.
        let (now, frames) = {
            let mut state = self.state.borrow_mut();
            state.frames_rendered += 1;
            (state.now, std::mem::take(&mut state.frames))
        };
        for (_, callback) in frames {
            callback(now);
        }
    }

    fn run_timers_until(&self, limit: f64) {
        loop {
            let (id, timer) = {
                let mut state = self.state.borrow_mut();
                let Some(id) = state.next_due(limit) else {
                    break;
                };
                let Some(timer) = state.timers.remove(&id) else {
                    break;
                };
                state.now = state.now.max(timer.due);
                state.running = Some(id);
                state.running_cancelled = false;
                (id, timer)
            };

            let Timer { due, period, callback } = timer;
            match callback {
                TimerCallback::Once(callback) => {
                    callback();
                    self.finish_running();
                }
                TimerCallback::Repeat(mut callback) => {
                    callback();
                    if !self.finish_running() {
                        self.state.borrow_mut().timers.insert(
                            id,
                            Timer {
                                due: due + period,
                                period,
                                callback: TimerCallback::Repeat(callback),
                            },
                        );
                    }
                }
            }
        }
    }

    /// Clears the running marker, returning whether the timer cancelled itself.
    fn finish_running(&self) -> bool {
        let mut state = self.state.borrow_mut();
        state.running = None;
        std::mem::take(&mut state.running_cancelled)
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> f64 {
        self.state.borrow().now
    }

    fn request_frame(&self, callback: FrameCallback) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        state.frames.push((id, callback));
        id
    }

    fn set_interval(&self, period: f64, callback: IntervalCallback) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        // A zero period would spin forever inside advance().
        let period = period.max(1.0);
        let due = state.now + period;
        state.timers.insert(
            id,
            Timer {
                due,
                period,
                callback: TimerCallback::Repeat(callback),
            },
        );
        id
    }

    fn set_timeout(&self, delay: f64, callback: TimeoutCallback) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        let due = state.now + delay.max(0.0);
        state.timers.insert(
            id,
            Timer {
                due,
                period: 0.0,
                callback: TimerCallback::Once(callback),
            },
        );
        id
    }

    fn cancel(&self, id: TaskId) {
        let mut state = self.state.borrow_mut();
        if state.timers.remove(&id).is_some() {
            return;
        }
        if state.running == Some(id) {
            state.running_cancelled = true;
            return;
        }
        state.frames.retain(|(frame_id, _)| *frame_id != id);
    }
}
