//! Set of state ids with O(1) insert, membership test and clear.
//!
//! See <https://research.swtch.com/sparse>. Elements are kept in insertion
//! order, which keeps the simulation deterministic.
use super::StateId;

#[derive(Clone, Debug)]
pub struct SparseSet {
    len: usize,
    dense: Vec<StateId>,
    sparse: Vec<usize>, // id -> position in dense
}

impl SparseSet {
    /// Creates a set able to hold ids in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        SparseSet {
            len: 0,
            dense: vec![StateId(0); capacity],
            sparse: vec![0; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns false if `id` was already present.
    ///
    /// Panics if `id` is out of the capacity given to [`SparseSet::new`].
    pub fn insert(&mut self, id: StateId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.dense[self.len] = id;
        self.sparse[id.index()] = self.len;
        self.len += 1;
        true
    }

    pub fn contains(&self, id: StateId) -> bool {
        let i = self.sparse[id.index()];
        i < self.len && self.dense[i] == id
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.dense[..self.len].iter().copied()
    }
}
