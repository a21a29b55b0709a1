//! Toolbar counters over the task snapshot

use chrono::NaiveDate;

use crate::entities::Task;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Open tasks due today
    pub due_today: usize,
    /// Open tasks due before today
    pub overdue: usize,
    pub completed: usize,
    /// Open tasks regardless of due date
    pub pending: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            if task.is_done() {
                stats.completed += 1;
            } else {
                stats.pending += 1;
                match task.due_date {
                    Some(due) if due == today => stats.due_today += 1,
                    Some(due) if due < today => stats.overdue += 1,
                    _ => {}
                }
            }
            stats
        })
    }
}
