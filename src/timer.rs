//! Deadline queue for delayed transitions.
//!
//! Every "wait a moment, then advance" step in the game is a task parked here
//! against the host clock (milliseconds, `performance.now()` in the browser).
//! A `Timers` value is owned by whatever will act on the task, so dropping the
//! owner (unmounting a level, leaving a video) cancels its pending work.

#[derive(Debug)]
struct Pending<T> {
    due_ms: f64,
    seq: u64,
    task: T,
}

#[derive(Debug)]
pub struct Timers<T> {
    pending: Vec<Pending<T>>,
    next_seq: u64,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self { pending: Vec::new(), next_seq: 0 }
    }

    /// Park `task` until `now + delay_ms`.
    pub fn schedule(&mut self, now: f64, delay_ms: f64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending { due_ms: now + delay_ms.max(0.0), seq, task });
    }

    /// Remove and return every task whose deadline is `<= now`, earliest first.
    /// Ties keep scheduling order.
    pub fn due(&mut self, now: f64) -> Vec<T> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let (mut ready, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = waiting;
        ready.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        ready.into_iter().map(|p| p.task).collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.iter().map(|p| p.due_ms).min_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_returns_only_expired_in_deadline_order() {
        let mut t = Timers::new();
        t.schedule(0.0, 300.0, "late");
        t.schedule(0.0, 100.0, "early");
        t.schedule(0.0, 1000.0, "pending");
        assert!(t.due(50.0).is_empty());
        assert_eq!(t.due(300.0), vec!["early", "late"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.next_deadline(), Some(1000.0));
    }

    #[test]
    fn ties_keep_schedule_order() {
        let mut t = Timers::new();
        t.schedule(10.0, 5.0, 1);
        t.schedule(10.0, 5.0, 2);
        t.schedule(10.0, 5.0, 3);
        assert_eq!(t.due(15.0), vec![1, 2, 3]);
    }

    #[test]
    fn cancel_all_drops_everything() {
        let mut t = Timers::new();
        t.schedule(0.0, 10.0, ());
        t.cancel_all();
        assert!(t.is_empty());
        assert!(t.due(1_000.0).is_empty());
    }
}
