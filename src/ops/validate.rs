use serde::Serialize;

use crate::model::collection::StatusCollection;
use crate::model::status::Category;

/// A violated collection invariant.
///
/// Violations are data, not errors: the validator never fails, it reports.
/// `message()` carries the exact wording surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Violation {
    /// Fewer than two statuses overall
    #[serde(rename = "too_few_statuses")]
    TooFewStatuses { count: usize },
    /// No status in the done category
    #[serde(rename = "missing_done")]
    MissingDone,
    /// More than one status in the done category
    #[serde(rename = "extra_done")]
    ExtraDone { count: usize },
    /// No status in the todo category
    #[serde(rename = "missing_todo")]
    MissingTodo,
    /// More than one status in the cancelled category
    #[serde(rename = "extra_cancelled")]
    ExtraCancelled { count: usize },
    /// Positions within a category are not a dense 0-based sequence
    #[serde(rename = "sparse_positions")]
    SparsePositions { category: Category },
}

impl Violation {
    /// User-facing message for this violation
    pub fn message(&self) -> String {
        match self {
            Violation::TooFewStatuses { .. } => "You need at least 2 statuses.".to_string(),
            Violation::MissingDone | Violation::ExtraDone { .. } => {
                "You need exactly 1 Done status.".to_string()
            }
            Violation::MissingTodo => "You need at least 1 Todo status.".to_string(),
            Violation::ExtraCancelled { .. } => {
                "You can have at most 1 Cancelled status.".to_string()
            }
            Violation::SparsePositions { category } => {
                format!("{} statuses have gaps in their ordering.", category.label())
            }
        }
    }
}

/// Check every collection invariant; returns the violated ones.
///
/// Read-only, never fails. An empty result means the collection may be
/// committed.
pub fn check_collection(collection: &StatusCollection) -> Vec<Violation> {
    let mut violations = Vec::new();

    if collection.len() < 2 {
        violations.push(Violation::TooFewStatuses {
            count: collection.len(),
        });
    }

    let done = collection.count_in(Category::Done);
    if done == 0 {
        violations.push(Violation::MissingDone);
    } else if done > 1 {
        violations.push(Violation::ExtraDone { count: done });
    }

    if collection.count_in(Category::Todo) == 0 {
        violations.push(Violation::MissingTodo);
    }

    let cancelled = collection.count_in(Category::Cancelled);
    if cancelled > 1 {
        violations.push(Violation::ExtraCancelled { count: cancelled });
    }

    for category in Category::ALL {
        let positions: Vec<usize> = collection
            .in_category(category)
            .iter()
            .map(|s| s.position)
            .collect();
        if positions.iter().enumerate().any(|(i, p)| *p != i) {
            violations.push(Violation::SparsePositions { category });
        }
    }

    violations
}

/// Can a status be added to `category`? False only for an already-occupied
/// singleton category.
pub fn can_add_to(category: Category, collection: &StatusCollection) -> bool {
    !(category.is_singleton() && collection.count_in(category) > 0)
}

/// Would deleting one status from `category` break a minimum-count rule?
/// Returns the specific violation to surface, or None if deletion is allowed.
pub fn deletion_blocker(category: Category, collection: &StatusCollection) -> Option<Violation> {
    if collection.len() <= 2 {
        return Some(Violation::TooFewStatuses {
            count: collection.len(),
        });
    }
    match category {
        Category::Done if collection.count_in(Category::Done) <= 1 => Some(Violation::MissingDone),
        Category::Todo if collection.count_in(Category::Todo) <= 1 => Some(Violation::MissingTodo),
        _ => None,
    }
}

/// Can any status be deleted from `category` right now?
pub fn can_delete_from(category: Category, collection: &StatusCollection) -> bool {
    deletion_blocker(category, collection).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::status_ops::test_collection;

    #[test]
    fn valid_collection_has_no_violations() {
        let coll = test_collection(&[
            ("todo", Category::Todo),
            ("doing", Category::Active),
            ("done", Category::Done),
        ]);
        assert_eq!(check_collection(&coll), Vec::new());
    }

    #[test]
    fn missing_done_and_todo_are_reported() {
        let coll = test_collection(&[("a", Category::Active), ("b", Category::Active)]);
        let violations = check_collection(&coll);
        assert!(violations.contains(&Violation::MissingDone));
        assert!(violations.contains(&Violation::MissingTodo));
    }

    #[test]
    fn undersized_collection_is_reported() {
        let coll = test_collection(&[("done", Category::Done)]);
        let violations = check_collection(&coll);
        assert!(violations.contains(&Violation::TooFewStatuses { count: 1 }));
    }

    #[test]
    fn duplicate_singletons_are_reported() {
        // built directly, bypassing the reducer guard
        let coll = test_collection(&[
            ("todo", Category::Todo),
            ("done", Category::Done),
            ("done2", Category::Done),
        ]);
        let violations = check_collection(&coll);
        assert!(violations.contains(&Violation::ExtraDone { count: 2 }));
    }

    #[test]
    fn singleton_occupancy_blocks_add() {
        let coll = test_collection(&[("todo", Category::Todo), ("done", Category::Done)]);
        assert!(!can_add_to(Category::Done, &coll));
        assert!(can_add_to(Category::Cancelled, &coll));
        assert!(can_add_to(Category::Todo, &coll));
        assert!(can_add_to(Category::Active, &coll));
    }

    #[test]
    fn deletion_blockers_name_the_rule() {
        let two = test_collection(&[("todo", Category::Todo), ("done", Category::Done)]);
        assert_eq!(
            deletion_blocker(Category::Done, &two),
            Some(Violation::TooFewStatuses { count: 2 })
        );

        let three = test_collection(&[
            ("todo", Category::Todo),
            ("doing", Category::Active),
            ("done", Category::Done),
        ]);
        assert_eq!(
            deletion_blocker(Category::Done, &three),
            Some(Violation::MissingDone)
        );
        assert_eq!(
            deletion_blocker(Category::Todo, &three),
            Some(Violation::MissingTodo)
        );
        assert_eq!(deletion_blocker(Category::Active, &three), None);
    }

    #[test]
    fn violation_messages_match_ui_wording() {
        assert_eq!(
            Violation::TooFewStatuses { count: 1 }.message(),
            "You need at least 2 statuses."
        );
        assert_eq!(Violation::MissingDone.message(), "You need exactly 1 Done status.");
        assert_eq!(
            Violation::MissingTodo.message(),
            "You need at least 1 Todo status."
        );
    }
}
