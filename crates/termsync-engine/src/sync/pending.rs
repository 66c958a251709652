//! Groups awaiting a backfill pass.
//!
//! FIFO with at most one entry per group. An entry is removed when it is
//! dequeued for processing, not when processing finishes: a group whose
//! backfill fails stays off the queue until a later registration flags it.

use std::collections::VecDeque;

use termsync_core::types::collections::FxHashSet;

#[derive(Debug, Default)]
pub struct PendingQueue {
    order: VecDeque<String>,
    members: FxHashSet<String>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a group. Re-queuing a pending group keeps its place and
    /// returns `false`.
    pub fn enqueue(&mut self, group: &str) -> bool {
        if !self.members.insert(group.to_string()) {
            return false;
        }
        self.order.push_back(group.to_string());
        true
    }

    pub fn dequeue(&mut self) -> Option<String> {
        let group = self.order.pop_front()?;
        self.members.remove(&group);
        Some(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.members.contains(group)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pending group names in processing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_entry_per_group() {
        let mut queue = PendingQueue::new();
        assert!(queue.enqueue("tags"));
        assert!(queue.enqueue("category"));
        assert!(!queue.enqueue("tags"));
        assert_eq!(queue.names().collect::<Vec<_>>(), ["tags", "category"]);
    }

    #[test]
    fn dequeue_removes_membership() {
        let mut queue = PendingQueue::new();
        queue.enqueue("tags");
        assert_eq!(queue.dequeue().as_deref(), Some("tags"));
        assert!(!queue.contains("tags"));
        assert!(queue.is_empty());
        assert!(queue.enqueue("tags"));
        assert_eq!(queue.len(), 1);
    }
}
