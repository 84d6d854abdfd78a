// Fire-once timers behind a trait so the engine runs without a browser.
use std::cell::RefCell;
use std::rc::Rc;

/// Starts and cancels one-shot timers. When a scheduled timer comes due the
/// implementation is expected to call [`GestureEngine::fire`] on the owning
/// engine; the trait itself carries no callback. `schedule` returns `None`
/// when no timer could be armed.
///
/// [`GestureEngine::fire`]: crate::state::GestureEngine::fire
pub trait Scheduler {
    type Handle;

    fn schedule(&mut self, delay_ms: u32) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Default)]
struct VirtualClock {
    now_ms: u64,
    next_id: u64,
    pending: Vec<(TimerId, u64)>,
}

/// Virtual-time scheduler for headless hosts. Cloning shares the clock, so
/// the test side keeps one handle and the engine owns the other.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Number of timers scheduled and not yet cancelled or fired.
    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Moves time forward and returns the timers that came due, earliest first.
    pub fn advance(&self, ms: u64) -> Vec<TimerId> {
        let mut clock = self.clock.borrow_mut();
        clock.now_ms += ms;
        let now = clock.now_ms;
        let mut due: Vec<(TimerId, u64)> = Vec::new();
        clock.pending.retain(|&(id, at)| {
            if at <= now {
                due.push((id, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, at)| (at, id));
        due.into_iter().map(|(id, _)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn schedule(&mut self, delay_ms: u32) -> Option<TimerId> {
        let mut clock = self.clock.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id += 1;
        let at = clock.now_ms + u64::from(delay_ms);
        clock.pending.push((id, at));
        Some(id)
    }

    fn cancel(&mut self, handle: TimerId) {
        self.clock.borrow_mut().pending.retain(|&(id, _)| id != handle);
    }
}
