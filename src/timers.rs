//! Browser timers for the core scheduler.

use gloo_timers::callback::Timeout;
use taskflow_core::Scheduler;

/// `setTimeout`-backed scheduler; dropping the `Timeout` clears it
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn detach(&self, handle: Timeout) {
        // The one-shot closure frees its captures after it runs
        let _ = handle.forget();
    }
}
