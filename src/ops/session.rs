use indexmap::IndexMap;
use std::collections::HashSet;

use crate::model::collection::StatusCollection;
use crate::model::status::{Category, Swatch};
use crate::ops::status_ops::{self, Direction};
use crate::ops::validate::{self, Violation};

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("status not found: {0}")]
    NotFound(String),
    #[error("{}", .0.message())]
    Blocked(Violation),
    #[error("a deletion is already waiting for a remap target")]
    RemapPending,
    #[error("no deletion is waiting for a remap target")]
    NoPendingRemap,
    #[error("cannot remap tasks onto the status being deleted")]
    RemapOntoSelf,
}

/// Outcome of a removal request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The status is gone from the collection
    Removed,
    /// Live tasks reference the status; the caller must pick a remap target
    /// from `candidates` and call `confirm_remap`, or `cancel_remap`
    NeedsRemap {
        task_count: usize,
        candidates: Vec<String>,
    },
}

/// A deletion waiting for the user to choose where its tasks go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemap {
    pub id: String,
    pub task_count: usize,
}

/// One in-memory editing session over a status collection.
///
/// Wraps the pure reducer operations and accumulates the side bookkeeping a
/// commit needs: which persisted statuses were deleted, and where their tasks
/// should be remapped. The collection is replaced wholesale on every applied
/// operation; a rejected operation leaves everything untouched.
#[derive(Debug, Clone)]
pub struct EditSession {
    collection: StatusCollection,
    deleted: HashSet<String>,
    remaps: IndexMap<String, String>,
    pending: Option<PendingRemap>,
    dirty: bool,
}

impl EditSession {
    pub fn new(collection: StatusCollection) -> Self {
        EditSession {
            collection,
            deleted: HashSet::new(),
            remaps: IndexMap::new(),
            pending: None,
            dirty: false,
        }
    }

    pub fn collection(&self) -> &StatusCollection {
        &self.collection
    }

    pub fn deleted(&self) -> &HashSet<String> {
        &self.deleted
    }

    /// Remap instructions accumulated this session, in confirmation order
    pub fn remaps(&self) -> &IndexMap<String, String> {
        &self.remaps
    }

    pub fn pending_remap(&self) -> Option<&PendingRemap> {
        self.pending.as_ref()
    }

    /// True once any operation has been applied since the last commit
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current invariant violations; empty means the session may be committed.
    ///
    /// Validates the finalized collection: a deletion mid-lane leaves a
    /// position gap that finalize repairs, and that transient gap must not
    /// block the commit.
    pub fn violations(&self) -> Vec<Violation> {
        validate::check_collection(&self.finalized())
    }

    fn apply(&mut self, next: StatusCollection) {
        if next != self.collection {
            self.collection = next;
            self.dirty = true;
        }
    }

    // -----------------------------------------------------------------------
    // Reducer pass-throughs
    // -----------------------------------------------------------------------

    /// Add a status to a category; returns the new id if one was added
    pub fn add(&mut self, category: Category) -> Option<String> {
        let id = status_ops::next_status_id(&self.collection, self.deleted.iter());
        let (next, added) = status_ops::add(&self.collection, category, id);
        self.apply(next);
        added
    }

    pub fn rename(&mut self, id: &str, new_name: &str) {
        let next = status_ops::rename(&self.collection, id, new_name);
        self.apply(next);
    }

    pub fn recolor(&mut self, id: &str, color: Swatch) {
        let next = status_ops::recolor(&self.collection, id, color);
        self.apply(next);
    }

    /// Returns true if the move was applied
    pub fn recategorize(&mut self, id: &str, category: Category) -> bool {
        let next = status_ops::recategorize(&self.collection, id, category);
        let applied = next != self.collection;
        self.apply(next);
        applied
    }

    pub fn cycle_category(&mut self, id: &str) {
        let next = status_ops::cycle_category(&self.collection, id);
        self.apply(next);
    }

    pub fn reorder(&mut self, id: &str, direction: Direction) {
        let next = status_ops::reorder(&self.collection, id, direction);
        self.apply(next);
    }

    // -----------------------------------------------------------------------
    // Deletion reconciliation
    // -----------------------------------------------------------------------

    /// Request removal of a status. `live_tasks` is the external task count
    /// for this status id, queried by the caller from the store.
    ///
    /// Validation order: minimum-count rules first (a delete can never break
    /// them), then never-persisted statuses are dropped outright, then a
    /// task-free status is dropped and recorded for deletion, and a status
    /// with live tasks parks the session in a pending-remap state.
    pub fn remove(&mut self, id: &str, live_tasks: usize) -> Result<RemovalOutcome, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::RemapPending);
        }
        let record = self
            .collection
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        if let Some(violation) = validate::deletion_blocker(record.category, &self.collection) {
            return Err(SessionError::Blocked(violation));
        }

        if record.is_new {
            let mut next = self.collection.clone();
            next.remove(id);
            self.apply(next);
            return Ok(RemovalOutcome::Removed);
        }

        if live_tasks == 0 {
            let mut next = self.collection.clone();
            next.remove(id);
            self.apply(next);
            self.deleted.insert(id.to_string());
            return Ok(RemovalOutcome::Removed);
        }

        self.pending = Some(PendingRemap {
            id: id.to_string(),
            task_count: live_tasks,
        });
        Ok(RemovalOutcome::NeedsRemap {
            task_count: live_tasks,
            candidates: self.remap_candidates(id),
        })
    }

    /// Surviving statuses a pending deletion's tasks could be remapped to
    pub fn remap_candidates(&self, doomed: &str) -> Vec<String> {
        self.collection
            .display_order()
            .iter()
            .filter(|s| s.id != doomed)
            .map(|s| s.id.clone())
            .collect()
    }

    /// Confirm the pending remap: record the mapping, drop the status, and
    /// mark it deleted.
    pub fn confirm_remap(&mut self, target_id: &str) -> Result<(), SessionError> {
        let pending = self.pending.clone().ok_or(SessionError::NoPendingRemap)?;
        if pending.id == target_id {
            return Err(SessionError::RemapOntoSelf);
        }
        if !self.collection.contains(target_id) {
            return Err(SessionError::NotFound(target_id.to_string()));
        }
        self.pending = None;
        self.remaps.insert(pending.id.clone(), target_id.to_string());
        let mut next = self.collection.clone();
        next.remove(&pending.id);
        self.apply(next);
        self.deleted.insert(pending.id);
        Ok(())
    }

    /// Abandon the pending remap; the status stays in the collection
    pub fn cancel_remap(&mut self) {
        self.pending = None;
    }

    // -----------------------------------------------------------------------
    // Commit handoff
    // -----------------------------------------------------------------------

    /// The collection with dense positions, ready for the store
    pub fn finalized(&self) -> StatusCollection {
        status_ops::finalize(&self.collection)
    }

    /// Reset bookkeeping after a successful commit: the finalized collection
    /// becomes the baseline, nothing is deleted or remapped, and every
    /// record is now persisted.
    pub fn mark_committed(&mut self) {
        let mut committed = self.finalized();
        let ids: Vec<String> = committed.iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            if let Some(record) = committed.get_mut(id) {
                record.is_new = false;
            }
        }
        self.collection = committed;
        self.deleted.clear();
        self.remaps.clear();
        self.pending = None;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::status_ops::test_collection;
    use pretty_assertions::assert_eq;

    fn names_in_order(session: &EditSession) -> Vec<String> {
        session
            .collection()
            .display_order()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    #[test]
    fn add_then_remove_keeps_collection_valid() {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("Active", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll);
        let id = session.add(Category::Cancelled).unwrap();
        session.rename(&id, "Cancelled");
        assert_eq!(
            session.remove("Active", 0).unwrap(),
            RemovalOutcome::Removed
        );
        assert_eq!(names_in_order(&session), vec!["Todo", "Done", "Cancelled"]);
        assert_eq!(session.violations(), Vec::new());
        assert!(session.deleted().contains("Active"));
    }

    #[test]
    fn remove_never_breaks_minimum_counts() {
        // removing Done from a 2-status collection is rejected with the
        // minimum-size message
        let coll = test_collection(&[("Todo", Category::Todo), ("Done", Category::Done)]);
        let mut session = EditSession::new(coll.clone());
        let err = session.remove("Done", 0).unwrap_err();
        assert_eq!(err.to_string(), "You need at least 2 statuses.");
        assert_eq!(session.collection(), &coll);
        assert!(session.deleted().is_empty());
        assert!(!session.is_dirty());

        // sole Done in a 3-status collection: the singleton message
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("Active", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll.clone());
        let err = session.remove("Done", 0).unwrap_err();
        assert_eq!(err.to_string(), "You need exactly 1 Done status.");
        assert_eq!(session.collection(), &coll);
    }

    #[test]
    fn mid_lane_deletion_gap_does_not_block_the_commit() {
        // removing the front of a two-status lane leaves [1] behind; finalize
        // closes the gap, so the session must stay committable
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("A", Category::Active),
            ("B", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll);
        assert_eq!(session.remove("A", 0).unwrap(), RemovalOutcome::Removed);
        assert_eq!(session.violations(), Vec::new());
        assert_eq!(
            session.finalized().get("B").unwrap().position,
            0
        );
    }

    #[test]
    fn never_persisted_status_is_dropped_without_bookkeeping() {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("Active", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll);
        let id = session.add(Category::Active).unwrap();
        assert_eq!(session.remove(&id, 0).unwrap(), RemovalOutcome::Removed);
        assert!(session.deleted().is_empty());
        assert!(session.remaps().is_empty());
    }

    #[test]
    fn deletion_with_live_tasks_requires_a_remap() {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("InProgress", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll.clone());
        let outcome = session.remove("InProgress", 3).unwrap();
        assert_eq!(
            outcome,
            RemovalOutcome::NeedsRemap {
                task_count: 3,
                candidates: vec!["Todo".to_string(), "Done".to_string()],
            }
        );
        // nothing removed while pending
        assert_eq!(session.collection(), &coll);

        session.confirm_remap("Todo").unwrap();
        assert!(!session.collection().contains("InProgress"));
        assert!(session.deleted().contains("InProgress"));
        // exactly one remap entry, pointing at the target
        assert_eq!(session.remaps().len(), 1);
        assert_eq!(
            session.remaps().get("InProgress"),
            Some(&"Todo".to_string())
        );
    }

    #[test]
    fn cancelling_a_pending_remap_changes_nothing() {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("InProgress", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll.clone());
        session.remove("InProgress", 2).unwrap();
        session.cancel_remap();
        assert_eq!(session.collection(), &coll);
        assert!(session.deleted().is_empty());
        assert!(session.remaps().is_empty());
        assert_eq!(session.pending_remap(), None);
    }

    #[test]
    fn remap_target_must_be_a_surviving_status() {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("InProgress", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll);
        session.remove("InProgress", 1).unwrap();
        assert!(matches!(
            session.confirm_remap("InProgress"),
            Err(SessionError::RemapOntoSelf)
        ));
        assert!(matches!(
            session.confirm_remap("Nope"),
            Err(SessionError::NotFound(_))
        ));
        // still pending after rejected targets
        assert!(session.pending_remap().is_some());
        session.confirm_remap("Done").unwrap();
    }

    #[test]
    fn second_remove_while_pending_is_rejected() {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("A", Category::Active),
            ("B", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll);
        session.remove("A", 1).unwrap();
        assert!(matches!(
            session.remove("B", 0),
            Err(SessionError::RemapPending)
        ));
    }

    #[test]
    fn accepted_operations_preserve_cardinality() {
        // any accepted add/recategorize/remove sequence keeps the done
        // and todo counts legal, or the warnings are non-empty
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("Active", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll);
        session.add(Category::Cancelled);
        session.add(Category::Done); // silently refused
        session.recategorize("Active", Category::Done); // refused
        session.cycle_category("Todo");
        let _ = session.remove("Done", 0); // blocked
        let coll = session.collection();
        let done = coll.count_in(Category::Done);
        let todo = coll.count_in(Category::Todo);
        assert!(
            (done == 1 && todo >= 1) || !session.violations().is_empty(),
            "done={} todo={} violations={:?}",
            done,
            todo,
            session.violations()
        );
    }

    #[test]
    fn mark_committed_resets_bookkeeping() {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("Active", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = EditSession::new(coll);
        let id = session.add(Category::Cancelled).unwrap();
        session.remove("Active", 0).unwrap();
        assert!(session.is_dirty());
        session.mark_committed();
        assert!(!session.is_dirty());
        assert!(session.deleted().is_empty());
        assert!(!session.collection().get(&id).unwrap().is_new);
    }
}
