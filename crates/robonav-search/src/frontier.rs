use std::collections::{BinaryHeap, HashMap};

/// Heap entry, ordered by `key` and then by insertion order.
#[derive(Clone, Copy, Eq, PartialEq)]
struct Entry {
    idx: usize,
    key: i32,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key first, oldest
        // entry first among equal keys.
        other.key.cmp(&self.key).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier with membership queries and decrease-key.
///
/// Re-keying pushes a fresh heap entry; the superseded one stays in the heap
/// and is skipped when popped. `live` maps each member to the sequence number
/// of its current entry.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    live: HashMap<usize, u64>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert `idx` with priority `key`, or replace the priority of an
    /// existing member.
    pub(crate) fn push(&mut self, idx: usize, key: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.live.insert(idx, seq);
        self.heap.push(Entry { idx, key, seq });
    }

    /// Remove and return the member with the smallest key.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        while let Some(e) = self.heap.pop() {
            if self.live.get(&e.idx) == Some(&e.seq) {
                self.live.remove(&e.idx);
                return Some(e.idx);
            }
        }
        None
    }

    #[inline]
    pub(crate) fn contains(&self, idx: usize) -> bool {
        self.live.contains_key(&idx)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
