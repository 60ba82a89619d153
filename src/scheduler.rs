use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A callback posted for the next tick.
pub type Tick = Box<dyn FnOnce()>;

/// The per-frame scheduling primitive. `schedule` invokes a callback
/// once, asynchronously, approximating one display refresh interval;
/// `now` reports time since the scheduler's epoch so animations can be
/// driven by a synthetic clock in tests.
pub trait Scheduler {
    fn schedule(&self, callback: Tick);
    fn now(&self) -> Duration;
}

/// Deterministic scheduler for tests and embedders that own their own
/// loop. Callbacks queue up until the clock is stepped; each step runs
/// only the callbacks that were pending when it began, so a tick that
/// re-posts itself waits for the next step.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    queue: RefCell<VecDeque<Tick>>,
    clock: Cell<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward without running anything.
    pub fn advance(&self, dt: Duration) {
        self.inner.clock.set(self.inner.clock.get() + dt);
    }

    /// Advance the clock by `dt` and run one round of pending
    /// callbacks. Returns how many callbacks ran.
    pub fn step(&self, dt: Duration) -> usize {
        self.advance(dt);
        let pending: Vec<Tick> = self.inner.queue.borrow_mut().drain(..).collect();
        let count = pending.len();
        for callback in pending {
            callback();
        }
        count
    }

    /// Step repeatedly until no callbacks remain. Returns the total
    /// number of callbacks run.
    pub fn run_until_idle(&self, dt: Duration) -> usize {
        let mut total = 0;
        loop {
            let count = self.step(dt);
            if count == 0 {
                return total;
            }
            total += count;
        }
    }

    /// Number of callbacks waiting for the next step.
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, callback: Tick) {
        self.inner.queue.borrow_mut().push_back(callback);
    }

    fn now(&self) -> Duration {
        self.inner.clock.get()
    }
}

/// Blocking wall-clock driver. Each batch of pending callbacks runs
/// after sleeping one frame interval, which approximates a display
/// refresh loop without a windowing system.
pub struct FrameScheduler {
    epoch: Instant,
    interval: Duration,
    queue: RefCell<VecDeque<Tick>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(16))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            epoch: Instant::now(),
            interval,
            queue: RefCell::new(VecDeque::new()),
        }
    }

    /// Drive pending callbacks until the queue stays empty, sleeping
    /// one frame interval between batches. Blocks the calling thread.
    pub fn run_until_idle(&self) {
        loop {
            let batch: Vec<Tick> = {
                let mut queue = self.queue.borrow_mut();
                if queue.is_empty() {
                    return;
                }
                queue.drain(..).collect()
            };
            std::thread::sleep(self.interval);
            for callback in batch {
                callback();
            }
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for FrameScheduler {
    fn schedule(&self, callback: Tick) {
        self.queue.borrow_mut().push_back(callback);
    }

    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}
