use crate::model::collection::StatusCollection;
use crate::model::status::Category;
use crate::ops::session::EditSession;
use crate::ops::validate::can_add_to;

/// Per-status edit affordances the drag controller can veto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Add,
    Rename,
    Recolor,
    Recategorize,
    CycleCategory,
    Reorder,
    Delete,
}

/// Drag state: at most one status is picked up at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        id: String,
    },
}

/// State machine for drag-to-recategorize.
///
/// `Idle --begin--> Dragging --drop/cancel--> Idle`. While dragging, every
/// per-status edit except recolor is vetoed, so a drag can never race a
/// conflicting edit. Drops are validated here even though the UI hides
/// invalid targets.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        DragController::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { id } => Some(id),
            DragState::Idle => None,
        }
    }

    /// Pick up a status. Refused while another drag is active or when the id
    /// is unknown; returns true if the drag began.
    pub fn begin(&mut self, id: &str, collection: &StatusCollection) -> bool {
        if self.is_dragging() || !collection.contains(id) {
            return false;
        }
        self.state = DragState::Dragging { id: id.to_string() };
        true
    }

    /// Is `target` a valid drop category for the dragged status?
    ///
    /// The status's own category is not a drop target, and an occupied
    /// singleton (ignoring the dragged status itself) rejects the drop.
    pub fn can_drop(&self, target: Category, collection: &StatusCollection) -> bool {
        let Some(id) = self.dragged_id() else {
            return false;
        };
        let Some(record) = collection.get(id) else {
            return false;
        };
        if record.category == target {
            return false;
        }
        let mut without = collection.clone();
        without.remove(id);
        can_add_to(target, &without)
    }

    /// Drop the dragged status into `target`. On a valid drop the session
    /// recategorizes and the controller returns to idle; an invalid drop is
    /// ignored and the drag stays active. Returns true if the drop landed.
    pub fn drop_on(&mut self, target: Category, session: &mut EditSession) -> bool {
        if !self.can_drop(target, session.collection()) {
            return false;
        }
        let id = match self.dragged_id() {
            Some(id) => id.to_string(),
            None => return false,
        };
        let applied = session.recategorize(&id, target);
        if applied {
            self.state = DragState::Idle;
        }
        applied
    }

    /// Abandon the drag with no mutation
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Which edits are allowed right now. While a drag is active only the
    /// color swatch stays live.
    pub fn permits(&self, action: EditAction) -> bool {
        !self.is_dragging() || action == EditAction::Recolor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::status_ops::test_collection;

    fn session() -> EditSession {
        EditSession::new(test_collection(&[
            ("Todo", Category::Todo),
            ("Doing", Category::Active),
            ("Done", Category::Done),
        ]))
    }

    #[test]
    fn begin_requires_a_known_status_and_idle_state() {
        let session = session();
        let mut drag = DragController::new();
        assert!(!drag.begin("Nope", session.collection()));
        assert!(drag.begin("Doing", session.collection()));
        assert!(!drag.begin("Todo", session.collection()));
        assert_eq!(drag.dragged_id(), Some("Doing"));
    }

    #[test]
    fn drop_validation_rejects_own_category_and_occupied_singletons() {
        let session = session();
        let mut drag = DragController::new();
        drag.begin("Doing", session.collection());
        assert!(!drag.can_drop(Category::Active, session.collection()));
        assert!(!drag.can_drop(Category::Done, session.collection()));
        assert!(drag.can_drop(Category::Todo, session.collection()));
        assert!(drag.can_drop(Category::Cancelled, session.collection()));
    }

    #[test]
    fn dragged_singleton_may_reenter_a_singleton_lane() {
        // dragging the Done status out and over Cancelled: the occupancy
        // check ignores the dragged status itself
        let session = session();
        let mut drag = DragController::new();
        drag.begin("Done", session.collection());
        assert!(drag.can_drop(Category::Cancelled, session.collection()));
    }

    #[test]
    fn valid_drop_recategorizes_and_returns_to_idle() {
        let mut session = session();
        let mut drag = DragController::new();
        drag.begin("Doing", session.collection());
        assert!(drag.drop_on(Category::Todo, &mut session));
        assert!(!drag.is_dragging());
        assert_eq!(
            session.collection().get("Doing").unwrap().category,
            Category::Todo
        );
    }

    #[test]
    fn invalid_drop_is_ignored_and_drag_stays_active() {
        let mut session = session();
        let mut drag = DragController::new();
        drag.begin("Doing", session.collection());
        assert!(!drag.drop_on(Category::Done, &mut session));
        assert!(drag.is_dragging());
        assert_eq!(
            session.collection().get("Doing").unwrap().category,
            Category::Active
        );
    }

    #[test]
    fn cancel_mutates_nothing() {
        let mut session = session();
        let before = session.collection().clone();
        let mut drag = DragController::new();
        drag.begin("Doing", session.collection());
        drag.cancel();
        assert!(!drag.is_dragging());
        assert_eq!(session.collection(), &before);
        assert!(!session.is_dirty());
    }

    #[test]
    fn dragging_locks_everything_but_recolor() {
        let session = session();
        let mut drag = DragController::new();
        for action in [
            EditAction::Add,
            EditAction::Rename,
            EditAction::Recolor,
            EditAction::Delete,
            EditAction::CycleCategory,
        ] {
            assert!(drag.permits(action));
        }
        drag.begin("Doing", session.collection());
        assert!(drag.permits(EditAction::Recolor));
        for action in [
            EditAction::Add,
            EditAction::Rename,
            EditAction::Recategorize,
            EditAction::CycleCategory,
            EditAction::Reorder,
            EditAction::Delete,
        ] {
            assert!(!drag.permits(action), "{:?} should be locked", action);
        }
    }
}
