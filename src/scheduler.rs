//! 一次性延迟事件
//!
//! 按绝对到期时间排队，由主循环 tick 时取出

use std::time::Instant;

use crate::models::GameEvent;

#[derive(Debug, Clone)]
struct Scheduled {
    due: Instant,
    event: GameEvent,
}

/// 延迟事件队列
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 `due` 时刻触发 `event`
    pub fn schedule(&mut self, due: Instant, event: GameEvent) {
        self.pending.push(Scheduled { due, event });
    }

    /// 取出所有已到期事件，按到期时间排序（同一时刻保持插入顺序）
    pub fn take_due(&mut self, now: Instant) -> Vec<GameEvent> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;

        due.sort_by_key(|s| s.due);
        due.into_iter().map(|s| s.event).collect()
    }

    /// 取消全部未触发事件
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|s| s.due).min()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
