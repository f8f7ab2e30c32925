use std::collections::BTreeMap;

use crate::foundation::core::Millis;

/// Display refresh interval the frame queue snaps to (60 Hz).
pub const FRAME_INTERVAL_US: u64 = 16_667;

/// Handle of a scheduled task, usable for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// Whether a task was scheduled as a timer or on the display refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Timer,
    Frame,
}

/// Virtual clock with a cancellable queue of timer and frame tasks.
///
/// Single-threaded and deterministic: tasks run in `(due time, scheduling order)` order, and
/// nothing happens until the owner advances the clock.
#[derive(Debug)]
pub struct Timeline<T> {
    now_us: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), (TaskKind, T)>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now_us: 0,
            seq: 0,
            queue: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        Millis::from_micros(self.now_us)
    }

    fn push(&mut self, due_us: u64, kind: TaskKind, task: T) -> TaskId {
        self.seq += 1;
        self.queue.insert((due_us, self.seq), (kind, task));
        TaskId(self.seq)
    }

    /// Run `task` once `delay` has elapsed.
    pub fn schedule_after(&mut self, delay: Millis, task: T) -> TaskId {
        let due = self.now_us.saturating_add(delay.to_micros());
        self.push(due, TaskKind::Timer, task)
    }

    /// Run `task` on the next display refresh strictly after now.
    pub fn request_frame(&mut self, task: T) -> TaskId {
        let due = (self.now_us / FRAME_INTERVAL_US + 1) * FRAME_INTERVAL_US;
        self.push(due, TaskKind::Frame, task)
    }

    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let key = *self.queue.keys().find(|(_, seq)| *seq == id.0)?;
        self.queue.remove(&key).map(|(_, t)| t)
    }

    /// Drop every pending task for which `keep` returns false. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, (_, t)| keep(t));
        before - self.queue.len()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.values().map(|(_, t)| t)
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue
            .keys()
            .next()
            .map(|(due, _)| Millis::from_micros(*due))
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TaskKind, T)> {
        let limit = until.to_micros();
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > limit {
            return None;
        }
        let entry = self.queue.remove(&(due, seq))?;
        self.now_us = self.now_us.max(due);
        Some(entry)
    }

    /// Move the clock forward to `to` (never backward).
    pub fn set_now(&mut self, to: Millis) {
        self.now_us = self.now_us.max(to.to_micros());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/timeline.rs"]
mod tests;
