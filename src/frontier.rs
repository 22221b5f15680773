use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A frontier entry: lower `priority` pops first, and among equal priorities the earlier insertion pops first.
#[derive(Debug)]
pub(crate) struct Entry<T> {
    pub(crate) priority: usize,
    sequence: u64,
    pub(crate) item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.priority, self.sequence).cmp(&(other.priority, other.sequence))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with a monotonically increasing insertion counter as tie-break, so ordering is total and deterministic.
#[derive(Debug)]
pub(crate) struct Frontier<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_sequence: u64,
}

impl<T> Frontier<T> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub(crate) fn push(&mut self, priority: usize, item: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(Entry { priority, sequence, item }));
    }

    pub(crate) fn pop(&mut self) -> Option<Entry<T>> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub(crate) fn min_priority(&self) -> Option<usize> {
        self.heap.peek().map(|Reverse(entry)| entry.priority)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
