//! Real-time [`Scheduler`] on tokio.
//!
//! Tasks are spawned with [`tokio::task::spawn_local`], so the scheduler must
//! be used from inside a [`tokio::task::LocalSet`]. Cancelling aborts the
//! task; a callback that cancels its own timer finishes its current run and
//! never fires again.

use crate::scheduler::{
    FrameCallback, IntervalCallback, Scheduler, TaskId, TimeoutCallback, DEFAULT_FRAME_INTERVAL,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::{spawn_local, JoinHandle};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::trace;

#[derive(Default)]
struct TaskTable {
    next_id: u64,
    handles: HashMap<TaskId, JoinHandle<()>>,
}

impl TaskTable {
    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::new(self.next_id)
    }
}

fn millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

/// Scheduler driven by the tokio timer wheel.
pub struct TokioScheduler {
    origin: Instant,
    frame_interval: Duration,
    tasks: Rc<RefCell<TaskTable>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: f64) -> Self {
        Self {
            origin: Instant::now(),
            frame_interval: millis(frame_interval.max(1.0)),
            tasks: Rc::new(RefCell::new(TaskTable::default())),
        }
    }

    /// Number of frame callbacks and timers not yet finished or cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().handles.len()
    }

    fn elapsed_ms(origin: Instant) -> f64 {
        origin.elapsed().as_secs_f64() * 1000.0
    }

    fn spawn<F>(&self, make: impl FnOnce(TaskId) -> F) -> TaskId
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        let id = self.tasks.borrow_mut().allocate();
        let handle = spawn_local(make(id));
        self.tasks.borrow_mut().handles.insert(id, handle);
        id
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> f64 {
        Self::elapsed_ms(self.origin)
    }

    fn request_frame(&self, callback: FrameCallback) -> TaskId {
        let origin = self.origin;
        let frame_interval = self.frame_interval;
        let tasks = Rc::clone(&self.tasks);
        self.spawn(move |id| async move {
            sleep(frame_interval).await;
            tasks.borrow_mut().handles.remove(&id);
            callback(Self::elapsed_ms(origin));
        })
    }

    fn set_interval(&self, period: f64, mut callback: IntervalCallback) -> TaskId {
        let period = millis(period.max(1.0));
        self.spawn(move |id| async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                trace!(task = id.raw(), "interval tick");
                callback();
            }
        })
    }

    fn set_timeout(&self, delay: f64, callback: TimeoutCallback) -> TaskId {
        let delay = millis(delay);
        let tasks = Rc::clone(&self.tasks);
        self.spawn(move |id| async move {
            sleep(delay).await;
            tasks.borrow_mut().handles.remove(&id);
            callback();
        })
    }

    fn cancel(&self, id: TaskId) {
        let handle = self.tasks.borrow_mut().handles.remove(&id);
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.borrow_mut().handles.drain() {
            handle.abort();
        }
    }
}
