//! Delayed tasks on a millisecond clock.
//!
//! The clock only moves when the owner says so, so tests and headless
//! callers drive it exactly like the terminal loop does with `TICK_MS`.

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due_ms: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once `delay_ms` have passed.
    pub fn schedule(&mut self, delay_ms: u32, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms as u64,
            task,
        });
        id
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest task due at or before `horizon_ms`.
    ///
    /// The clock moves to the task's due time, so anything the caller
    /// schedules while handling it is measured from when it fired. Ties go to
    /// the task scheduled first.
    pub fn pop_due(&mut self, horizon_ms: u64) -> Option<T> {
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= horizon_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id.0))?;
        let timer = self.timers.remove(index);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer.task)
    }

    /// Move the clock to `horizon_ms` (never backwards).
    pub fn advance_to(&mut self, horizon_ms: u64) {
        self.now_ms = self.now_ms.max(horizon_ms);
    }

    /// Let `elapsed_ms` pass and return every task that came due, in order.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<T> {
        let horizon = self.now_ms + elapsed_ms as u64;
        let mut due = Vec::new();
        while let Some(task) = self.pop_due(horizon) {
            due.push(task);
        }
        self.advance_to(horizon);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_once_their_delay_has_passed() {
        let mut s = Scheduler::new();
        s.schedule(100, "a");
        assert!(s.advance(99).is_empty());
        assert_eq!(s.advance(1), vec!["a"]);
        assert!(s.is_idle());
        assert!(s.advance(1000).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_time_order() {
        let mut s = Scheduler::new();
        s.schedule(300, 3);
        s.schedule(100, 1);
        s.schedule(200, 2);
        s.schedule(100, 4);
        assert_eq!(s.advance(500), vec![1, 4, 2, 3]);
        assert_eq!(s.now_ms(), 500);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut s = Scheduler::new();
        let a = s.schedule(50, 'a');
        s.schedule(60, 'b');
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance(100), vec!['b']);

        s.schedule(10, 'c');
        s.schedule(20, 'd');
        s.cancel_all();
        assert!(s.advance(100).is_empty());
    }

    #[test]
    fn chained_tasks_are_timed_from_their_parent() {
        let mut s = Scheduler::new();
        s.schedule(100, 1);
        let horizon = s.now_ms() + 250;
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(horizon) {
            fired.push((task, s.now_ms()));
            if task < 3 {
                s.schedule(100, task + 1);
            }
        }
        s.advance_to(horizon);
        assert_eq!(fired, vec![(1, 100), (2, 200)]);
        assert_eq!(s.advance(50), vec![3]);
    }
}
