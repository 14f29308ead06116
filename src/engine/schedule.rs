//! Deferred transitions owned by a single activity.
//!
//! Nothing here runs on its own: the owner polls `take_due` from its update
//! step. Dropping or cancelling the schedule discards everything still pending,
//! so a torn-down activity can never be touched by a stale task.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Deferred<T>
{
    due: Instant,
    seq: u64,
    action: T,
}

#[derive(Debug)]
pub struct Schedule<T>
{
    pending: Vec<Deferred<T>>,
    next_seq: u64,
}

impl<T> Default for Schedule<T>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<T> Schedule<T>
{
    pub fn new() -> Self
    {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn after(&mut self, now: Instant, delay: Duration, action: T)
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Deferred {
            due: now + delay,
            seq,
            action,
        });
    }

    pub fn cancel_all(&mut self)
    {
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool
    {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize
    {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<Instant>
    {
        self.pending.iter().map(|task| task.due).min()
    }

    /// Removes and returns every action due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<T>
    {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                due.push(self.pending.swap_remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|task| task.action).collect()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fires_only_when_due()
    {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        schedule.after(start, Duration::from_millis(1000), "advance");
        assert!(schedule.take_due(start + Duration::from_millis(999)).is_empty());
        assert_eq!(schedule.take_due(start + Duration::from_millis(1000)), vec!["advance"]);
        assert!(schedule.is_idle());
        assert!(schedule.take_due(start + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn due_actions_come_out_in_order()
    {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        schedule.after(start, Duration::from_millis(300), 3);
        schedule.after(start, Duration::from_millis(100), 1);
        schedule.after(start, Duration::from_millis(200), 2);
        schedule.after(start, Duration::from_millis(100), 4);
        assert_eq!(schedule.next_due(), Some(start + Duration::from_millis(100)));
        assert_eq!(schedule.take_due(start + Duration::from_secs(1)), vec![1, 4, 2, 3]);
    }

    #[test]
    fn cancelled_tasks_never_fire()
    {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        schedule.after(start, Duration::from_millis(10), ());
        assert_eq!(schedule.len(), 1);
        schedule.cancel_all();
        assert!(schedule.take_due(start + Duration::from_secs(1)).is_empty());
    }
}
