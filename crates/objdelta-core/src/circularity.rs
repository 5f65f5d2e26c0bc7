//! Circularity tracker: cycle detection along the active recursion path
//!
//! One tracker exists per top-level `compare` call and holds the identities
//! of every aggregate currently on the path from the root to the node being
//! compared. Entries are released by an RAII guard, so they never leak across
//! sibling subtrees or across comparisons, including on early error returns.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::model::ObjectId;

/// Per-comparison working set of active aggregate identities.
#[derive(Debug, Default)]
pub struct CircularityTracker {
    active: RefCell<HashSet<ObjectId>>,
}

impl CircularityTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the identity is on the active recursion path.
    pub fn is_active(&self, id: ObjectId) -> bool {
        self.active.borrow().contains(&id)
    }

    /// Number of identities currently active.
    pub fn depth(&self) -> usize {
        self.active.borrow().len()
    }

    /// Register the pair's identities for the duration of one descent.
    ///
    /// Returns `None` when either identity is already active — the cycle
    /// signal; nothing is registered in that case. Otherwise returns a guard
    /// that releases exactly the identities it inserted when dropped. An
    /// aliased pair (working and base are the same object) registers once.
    pub fn enter(
        &self,
        working: Option<ObjectId>,
        base: Option<ObjectId>,
    ) -> Option<TrackerGuard<'_>> {
        let mut ids: Vec<ObjectId> = Vec::with_capacity(2);
        if let Some(id) = working {
            ids.push(id);
        }
        if let Some(id) = base {
            if Some(id) != working {
                ids.push(id);
            }
        }

        {
            let active = self.active.borrow();
            if ids.iter().any(|id| active.contains(id)) {
                return None;
            }
        }

        let mut active = self.active.borrow_mut();
        for id in &ids {
            active.insert(*id);
        }
        Some(TrackerGuard { tracker: self, ids })
    }
}

/// Guard releasing the identities registered by one [`CircularityTracker::enter`].
#[derive(Debug)]
pub struct TrackerGuard<'t> {
    tracker: &'t CircularityTracker,
    ids: Vec<ObjectId>,
}

impl Drop for TrackerGuard<'_> {
    fn drop(&mut self) {
        let mut active = self.tracker.active.borrow_mut();
        for id in &self.ids {
            active.remove(id);
        }
    }
}
