//! Virtual-time timer queue.
//!
//! Single-threaded scheduler for one-shot (`set_timeout`) and repeating
//! (`set_interval`) callbacks. Time only moves when the owner calls
//! [`TimerQueue::advance_to`]: tests step it explicitly, the page runtime
//! feeds it wall-clock elapsed time.
//!
//! ```text
//!  now ──────────────●──────●──────●──────────────▶ target
//!                    │      │      │
//!              fire (due, seq) in ascending order,
//!              re-arm intervals at due + period
//! ```
//!
//! Callbacks receive `&mut C`, the state they are allowed to touch (the page
//! document in practice).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::time::Duration;

/// Callback run when a timer fires.
pub type Task<C> = Box<dyn FnMut(&mut C)>;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Snapshot of one pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    /// Timer handle.
    pub id: TimerId,
    /// Virtual instant the timer fires at.
    pub due: Duration,
    /// Repeat period for intervals.
    pub period: Option<Duration>,
}

struct Scheduled<C> {
    task: Task<C>,
    due: Duration,
    seq: u64,
    period: Option<Duration>,
}

/// Queue of pending callbacks over virtual time.
pub struct TimerQueue<C> {
    /// Current virtual time.
    now: Duration,
    /// Min-heap of (due, seq, id); cancelled entries are skipped lazily.
    heap: BinaryHeap<Reverse<(Duration, u64, TimerId)>>,
    /// Live timers.
    timers: HashMap<TimerId, Scheduled<C>>,
    /// Registration counter, breaks ties between equal due times.
    next_seq: u64,
    /// ID counter.
    next_id: u64,
    /// Total callbacks run.
    fired: u64,
}

impl<C> TimerQueue<C> {
    /// Shortest repeat period; a zero period would spin forever.
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// Creates an empty queue at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            heap: BinaryHeap::with_capacity(16),
            timers: HashMap::with_capacity(16),
            next_seq: 0,
            next_id: 1,
            fired: 0,
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Runs `task` once, `delay` after now.
    pub fn set_timeout(&mut self, delay: Duration, task: impl FnMut(&mut C) + 'static) -> TimerId {
        self.schedule(delay, None, Box::new(task))
    }

    /// Runs `task` every `period`, first at now + `period`.
    ///
    /// Periods shorter than [`Self::MIN_PERIOD`] are clamped.
    pub fn set_interval(&mut self, period: Duration, task: impl FnMut(&mut C) + 'static) -> TimerId {
        let period = period.max(Self::MIN_PERIOD);
        self.schedule(period, Some(period), Box::new(task))
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>, task: Task<C>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        let seq = self.push(id, due);
        self.timers.insert(id, Scheduled { task, due, seq, period });
        id
    }

    fn push(&mut self, id: TimerId, due: Duration) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((due, seq, id)));
        seq
    }

    /// Cancels a timer. Returns false if it already fired or was cleared.
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Returns true if the timer is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Total number of callbacks run so far.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Earliest due time among pending timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Pending timers in firing order.
    #[must_use]
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut pending: Vec<_> = self
            .timers
            .iter()
            .map(|(&id, t)| (t.due, t.seq, PendingTimer { id, due: t.due, period: t.period }))
            .collect();
        pending.sort_by_key(|&(due, seq, _)| (due, seq));
        pending.into_iter().map(|(_, _, p)| p).collect()
    }

    /// Advances virtual time to `target`, firing everything due on the way.
    ///
    /// Timers fire in (due, registration) order and the clock reads each
    /// timer's due time while it runs. Returns the number of callbacks run.
    /// A `target` in the past leaves the clock where it is.
    pub fn advance_to(&mut self, target: Duration, ctx: &mut C) -> usize {
        let mut ran = 0;

        while let Some(&Reverse((due, seq, id))) = self.heap.peek() {
            if due > target {
                break;
            }
            self.heap.pop();

            // Stale heap entry: cleared, or re-armed under a newer seq.
            let live = self.timers.get(&id).is_some_and(|t| t.seq == seq);
            if !live {
                continue;
            }
            let Some(mut timer) = self.timers.remove(&id) else {
                continue;
            };

            self.now = self.now.max(due);
            (timer.task)(ctx);
            ran += 1;
            self.fired += 1;

            if let Some(period) = timer.period {
                timer.due = due + period;
                timer.seq = self.push(id, timer.due);
                self.timers.insert(id, timer);
            }
        }

        self.now = self.now.max(target);
        ran
    }
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.timers.len())
            .field("fired", &self.fired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timeouts_fire_in_due_order() {
        let mut queue: TimerQueue<Vec<&'static str>> = TimerQueue::new();
        let mut log = Vec::new();

        queue.set_timeout(ms(400), |log: &mut Vec<_>| log.push("c"));
        queue.set_timeout(ms(0), |log: &mut Vec<_>| log.push("a"));
        queue.set_timeout(ms(200), |log: &mut Vec<_>| log.push("b"));

        assert_eq!(queue.advance_to(ms(199), &mut log), 1);
        assert_eq!(log, ["a"]);
        assert_eq!(queue.advance_to(ms(1000), &mut log), 2);
        assert_eq!(log, ["a", "b", "c"]);
        assert!(queue.is_empty());
        assert_eq!(queue.now(), ms(1000));
    }

    #[test]
    fn test_equal_due_times_fire_in_registration_order() {
        let mut queue: TimerQueue<Vec<u32>> = TimerQueue::new();
        let mut log = Vec::new();
        for i in 0..5 {
            queue.set_timeout(ms(10), move |log: &mut Vec<u32>| log.push(i));
        }
        queue.advance_to(ms(10), &mut log);
        assert_eq!(log, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_interval_repeats_until_cleared() {
        let mut queue: TimerQueue<u32> = TimerQueue::new();
        let mut count = 0;
        let id = queue.set_interval(ms(100), |n: &mut u32| *n += 1);

        queue.advance_to(ms(99), &mut count);
        assert_eq!(count, 0);
        queue.advance_to(ms(350), &mut count);
        assert_eq!(count, 3);
        assert_eq!(queue.next_deadline(), Some(ms(400)));

        assert!(queue.is_pending(id));
        assert!(queue.clear(id));
        assert!(!queue.is_pending(id));
        assert!(!queue.clear(id));
        queue.advance_to(ms(10_000), &mut count);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_pending_snapshot() {
        let mut queue: TimerQueue<()> = TimerQueue::new();
        let b = queue.set_timeout(ms(200), |_: &mut ()| {});
        let a = queue.set_timeout(ms(0), |_: &mut ()| {});
        let i = queue.set_interval(ms(0), |_: &mut ()| {});

        let pending = queue.pending();
        assert_eq!(pending.len(), 3);
        assert_eq!(pending[0].id, a);
        assert_eq!(pending[1].id, i);
        assert_eq!(pending[1].period, Some(TimerQueue::<()>::MIN_PERIOD));
        assert_eq!(pending[2].id, b);
        assert_eq!(pending[2].due, ms(200));
    }
}
