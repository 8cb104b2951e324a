//! Binary min-heap keyed by an `f64` cost.
//!
//! There is no decrease-key.  The search re-inserts a node whenever it finds
//! a cheaper cost and ignores the stale entries when they surface, so one
//! item may be present several times with different keys.
//!
//! Keys must not be NaN.

#[derive(Clone, Debug)]
struct HeapEntry<T> {
    key:  f64,
    item: T,
}

/// Array-backed binary min-heap.
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    entries: Vec<HeapEntry<T>>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest key currently queued.
    pub fn peek_key(&self) -> Option<f64> {
        self.entries.first().map(|e| e.key)
    }

    /// Append `item` and sift it up.  O(log n).
    pub fn insert(&mut self, item: T, key: f64) {
        debug_assert!(!key.is_nan(), "NaN heap key");
        self.entries.push(HeapEntry { key, item });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the item with the smallest key, with its key.
    ///
    /// The last entry replaces the root and is sifted down.  O(log n).
    pub fn extract_min(&mut self) -> Option<(T, f64)> {
        if self.entries.is_empty() {
            return None;
        }
        let min = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((min.item, min.key))
    }

    /// Move the entry at `idx` up while its parent's key is greater.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[parent].key <= self.entries[idx].key {
                break;
            }
            self.entries.swap(parent, idx);
            idx = parent;
        }
    }

    /// Move the entry at `idx` down, swapping with the smaller child while
    /// that child's key is less than its own.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left  = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;

            if left < len && self.entries[left].key < self.entries[smallest].key {
                smallest = left;
            }
            if right < len && self.entries[right].key < self.entries[smallest].key {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.entries.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
