// game/timers.rs

/// Delayed cosmetic actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CosmeticTask {
    /// Hide the "Love is Magic" banner
    DismissMagicMessage,
    /// Stop the title hop started by a tap
    EndTitleBounce,
    /// Fade the celebration out into the closing screen
    BeginEnding,
}

/// Which screen owns a task. Tearing a screen down cancels everything it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    Asking,
    Celebration,
    /// Survives screen changes (e.g. the magic banner)
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    task: CosmeticTask,
    scope: TaskScope,
    remaining: f32,
}

/// Cancellable one-shot timers, advanced by frame time
#[derive(Debug, Clone, Default)]
pub struct CosmeticTimers {
    pending: Vec<Scheduled>,
    next_id: u64,
}

impl CosmeticTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: CosmeticTask, delay_secs: f32, scope: TaskScope) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            task,
            scope,
            remaining: delay_secs.max(0.0),
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Drop every task owned by `scope`; returns how many were cancelled
    pub fn cancel_scope(&mut self, scope: TaskScope) -> usize {
        let before = self.pending.len();
        self.pending.retain(|s| s.scope != scope);
        before - self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance every timer by `delta` seconds and return the tasks that came
    /// due, earliest deadline first (ties keep scheduling order).
    pub fn advance(&mut self, delta: f32) -> Vec<CosmeticTask> {
        let mut due: Vec<(f32, TaskId, CosmeticTask)> = Vec::new();

        self.pending.retain_mut(|s| {
            s.remaining -= delta;
            if s.remaining <= 0.0 {
                due.push((s.remaining, s.id, s.task));
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_after_delay() {
        let mut timers = CosmeticTimers::new();
        timers.schedule(CosmeticTask::DismissMagicMessage, 4.0, TaskScope::Global);

        assert!(timers.advance(3.9).is_empty());
        assert_eq!(timers.advance(0.2), vec![CosmeticTask::DismissMagicMessage]);
        assert!(timers.is_empty());
        assert!(timers.advance(10.0).is_empty());
    }

    #[test]
    fn test_due_tasks_in_deadline_order() {
        let mut timers = CosmeticTimers::new();
        timers.schedule(CosmeticTask::BeginEnding, 2.0, TaskScope::Celebration);
        timers.schedule(CosmeticTask::EndTitleBounce, 0.5, TaskScope::Asking);

        let fired = timers.advance(5.0);

        assert_eq!(fired, vec![CosmeticTask::EndTitleBounce, CosmeticTask::BeginEnding]);
    }

    #[test]
    fn test_cancel_by_id() {
        let mut timers = CosmeticTimers::new();
        let id = timers.schedule(CosmeticTask::EndTitleBounce, 0.5, TaskScope::Asking);

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(1.0).is_empty());
    }

    #[test]
    fn test_cancel_scope_leaves_other_scopes() {
        let mut timers = CosmeticTimers::new();
        timers.schedule(CosmeticTask::EndTitleBounce, 0.5, TaskScope::Asking);
        timers.schedule(CosmeticTask::DismissMagicMessage, 4.0, TaskScope::Global);

        assert_eq!(timers.cancel_scope(TaskScope::Asking), 1);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(5.0), vec![CosmeticTask::DismissMagicMessage]);
    }
}
