//! Deferred Work
//!
//! A scheduled task is represented by a handle owned by whoever scheduled
//! it. Dropping the handle cancels the task if it has not run yet, which is
//! all debouncing needs: replace the handle on every trigger.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Runs callbacks after a delay on the UI event loop
pub trait Scheduler {
    /// Cancels the pending task when dropped
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Let a scheduled task run without keeping its handle. Nothing is
    /// retained once the task has fired.
    fn detach(&self, handle: Self::Handle);

    /// Schedule a task that is never cancelled
    fn schedule_detached(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let handle = self.schedule(delay_ms, task);
        self.detach(handle);
    }
}

/// Runs only the last task submitted within the quiet window
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    /// Schedule `task`, cancelling whatever was pending
    pub fn call(&self, task: impl FnOnce() + 'static) {
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(task));
        let previous = self.pending.borrow_mut().replace(handle);
        drop(previous);
    }

    /// Drop the pending task without running it
    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        drop(previous);
    }
}

// ========================
// Manual scheduler
// ========================

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct ManualQueue {
    now: u64,
    next_id: u64,
    /// Keyed by (due time, submission order)
    tasks: BTreeMap<(u64, u64), Task>,
}

/// Deterministic scheduler driven by explicit [`ManualScheduler::advance`]
/// calls. Clones share one virtual clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

/// Handle returned by [`ManualScheduler`]
pub struct ManualHandle {
    key: (u64, u64),
    queue: Weak<RefCell<ManualQueue>>,
}

impl ManualHandle {
    /// Stop this handle from cancelling its task
    fn disarm(mut self) {
        self.queue = Weak::new();
    }
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            // Dropped outside the borrow: the task may own other handles.
            let removed = queue.borrow_mut().tasks.remove(&self.key);
            drop(removed);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds elapsed so far
    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    /// Tasks scheduled and not yet run or cancelled
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Move the clock forward, running due tasks in order.
    /// Tasks scheduled while advancing run too if they fall due in the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let first = queue.tasks.keys().next().copied();
                match first {
                    Some(key) if key.0 <= target => {
                        queue.now = key.0;
                        queue.tasks.remove(&key)
                    }
                    _ => None,
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        let key = (queue.now + u64::from(delay_ms), queue.next_id);
        queue.next_id += 1;
        queue.tasks.insert(key, task);
        ManualHandle {
            key,
            queue: Rc::downgrade(&self.queue),
        }
    }

    fn detach(&self, handle: ManualHandle) {
        handle.disarm();
    }
}
