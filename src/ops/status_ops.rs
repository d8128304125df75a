use crate::model::collection::StatusCollection;
use crate::model::status::{Category, StatusRecord, Swatch};
use crate::model::template::Template;
use crate::ops::validate::can_add_to;

/// Direction for reordering within a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// Reducer operations
//
// Every operation takes the collection by reference and returns a new one;
// callers never observe a partially applied mutation. Rejected operations
// return an unchanged clone.
// ---------------------------------------------------------------------------

/// Generate the next free status id of the form `s-N`, skipping ids already
/// used by the collection or retired in this session.
pub fn next_status_id<'a>(
    collection: &StatusCollection,
    retired: impl Iterator<Item = &'a String>,
) -> String {
    let max = collection
        .iter()
        .map(|s| s.id.as_str())
        .chain(retired.map(|s| s.as_str()))
        .filter_map(|id| id.strip_prefix("s-"))
        .filter_map(|n| n.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("s-{}", max + 1)
}

/// Append a new status to `category` with a default name and color.
///
/// No-op when the category is an occupied singleton — the UI hides the
/// affordance, and the reducer stays silent to match. Returns the new
/// collection and the id of the added status, if one was added.
pub fn add(
    collection: &StatusCollection,
    category: Category,
    id: String,
) -> (StatusCollection, Option<String>) {
    if !can_add_to(category, collection) {
        return (collection.clone(), None);
    }
    let mut next = collection.clone();
    let mut record = StatusRecord::new(
        id.clone(),
        "New status".to_string(),
        Swatch::default_for(category),
        category,
    );
    record.position = next.max_position_in(category).map_or(0, |p| p + 1);
    next.insert(record);
    (next, Some(id))
}

/// Replace a status's name. Empty (after trimming) names are rejected as a
/// no-op; a status label must be non-empty.
pub fn rename(collection: &StatusCollection, id: &str, new_name: &str) -> StatusCollection {
    let mut next = collection.clone();
    let trimmed = new_name.trim();
    if trimmed.is_empty() {
        return next;
    }
    if let Some(record) = next.get_mut(id) {
        record.name = trimmed.to_string();
    }
    next
}

/// Replace a status's color from the fixed swatch
pub fn recolor(collection: &StatusCollection, id: &str, color: Swatch) -> StatusCollection {
    let mut next = collection.clone();
    if let Some(record) = next.get_mut(id) {
        record.color = color;
    }
    next
}

/// Move a status to another category, appending it at the end of the
/// destination lane. Rejected (no-op) when the destination is a singleton
/// already holding a different status.
pub fn recategorize(
    collection: &StatusCollection,
    id: &str,
    new_category: Category,
) -> StatusCollection {
    let mut next = collection.clone();
    let Some(record) = collection.get(id) else {
        return next;
    };
    if record.category == new_category {
        return next;
    }
    // singleton check against the collection without this status
    if new_category.is_singleton()
        && collection
            .in_category(new_category)
            .iter()
            .any(|s| s.id != id)
    {
        return next;
    }
    let end = next.max_position_in(new_category).map_or(0, |p| p + 1);
    if let Some(record) = next.get_mut(id) {
        record.category = new_category;
        record.position = end;
    }
    next
}

/// The category the tap-to-cycle gesture would move this status to.
///
/// Walks the fixed cycle todo → active → done → cancelled → todo, skipping
/// singleton categories occupied by another status. Returns None only if the
/// id is unknown; otherwise a category is always found within four steps
/// (the status's own category is always a legal stop).
pub fn next_category(collection: &StatusCollection, id: &str) -> Option<Category> {
    let record = collection.get(id)?;
    let mut candidate = record.category.successor();
    for _ in 0..4 {
        let occupied_singleton = candidate.is_singleton()
            && collection.in_category(candidate).iter().any(|s| s.id != id);
        if !occupied_singleton {
            return Some(candidate);
        }
        candidate = candidate.successor();
    }
    Some(record.category)
}

/// Apply the tap-to-cycle gesture: recategorize to `next_category`
pub fn cycle_category(collection: &StatusCollection, id: &str) -> StatusCollection {
    match next_category(collection, id) {
        Some(category) => recategorize(collection, id, category),
        None => collection.clone(),
    }
}

/// Swap a status with its neighbor in the same category. No-op at the lane
/// boundary or when the id is unknown.
pub fn reorder(collection: &StatusCollection, id: &str, direction: Direction) -> StatusCollection {
    let mut next = collection.clone();
    let Some(record) = collection.get(id) else {
        return next;
    };
    let lane = collection.in_category(record.category);
    let Some(index) = lane.iter().position(|s| s.id == id) else {
        return next;
    };
    let neighbor_index = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < lane.len() => index + 1,
        _ => return next,
    };
    let neighbor_id = lane[neighbor_index].id.clone();
    let pos_a = lane[index].position;
    let pos_b = lane[neighbor_index].position;
    if let Some(r) = next.get_mut(id) {
        r.position = pos_b;
    }
    if let Some(r) = next.get_mut(&neighbor_id) {
        r.position = pos_a;
    }
    next
}

/// Recompute dense 0-based positions per category in display order.
/// Must run before the collection is handed to the store.
pub fn finalize(collection: &StatusCollection) -> StatusCollection {
    let mut next = collection.clone();
    for category in Category::ALL {
        let ids: Vec<String> = collection
            .in_category(category)
            .iter()
            .map(|s| s.id.clone())
            .collect();
        for (i, id) in ids.iter().enumerate() {
            if let Some(record) = next.get_mut(id) {
                record.position = i;
            }
        }
    }
    next
}

/// Build a collection from a template's status list, using the same reducer
/// primitives as interactive editing. Malformed templates (say, a second
/// done status) degrade silently the same way the editor would.
pub fn from_template(template: &Template) -> StatusCollection {
    let mut collection = StatusCollection::new();
    for status in &template.statuses {
        let id = next_status_id(&collection, std::iter::empty());
        let (with_status, added) = add(&collection, status.resolved_category(), id);
        collection = with_status;
        if let Some(id) = added {
            collection = rename(&collection, &id, &status.name);
            collection = recolor(&collection, &id, status.color);
        }
    }
    finalize(&collection)
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Build a collection directly from (id, category) pairs, with the id doubling
/// as the name. Bypasses the reducer guards on purpose.
#[cfg(test)]
pub(crate) fn test_collection(specs: &[(&str, Category)]) -> StatusCollection {
    let mut collection = StatusCollection::new();
    for (id, category) in specs {
        let mut record = StatusRecord::new(
            id.to_string(),
            id.to_string(),
            Swatch::default_for(*category),
            *category,
        );
        record.position = collection.count_in(*category);
        record.is_new = false;
        collection.insert(record);
    }
    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids_in(collection: &StatusCollection, category: Category) -> Vec<String> {
        collection
            .in_category(category)
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    #[test]
    fn add_appends_with_defaults() {
        let coll = test_collection(&[("todo", Category::Todo), ("done", Category::Done)]);
        let (next, added) = add(&coll, Category::Active, "s-9".into());
        let id = added.unwrap();
        let record = next.get(&id).unwrap();
        assert_eq!(record.name, "New status");
        assert_eq!(record.color, Swatch::Blue);
        assert_eq!(record.category, Category::Active);
        assert!(record.is_new);
        assert_eq!(record.position, 0);
    }

    #[test]
    fn add_to_occupied_singleton_is_a_no_op() {
        let coll = test_collection(&[("todo", Category::Todo), ("done", Category::Done)]);
        let (next, added) = add(&coll, Category::Done, "s-9".into());
        assert_eq!(added, None);
        assert_eq!(next, coll);
    }

    #[test]
    fn rename_rejects_empty_labels() {
        let coll = test_collection(&[("todo", Category::Todo), ("done", Category::Done)]);
        let next = rename(&coll, "todo", "   ");
        assert_eq!(next.get("todo").unwrap().name, "todo");
        let next = rename(&coll, "todo", "  Queue ");
        assert_eq!(next.get("todo").unwrap().name, "Queue");
    }

    #[test]
    fn recategorize_into_occupied_singleton_is_rejected() {
        let coll = test_collection(&[("todo", Category::Todo), ("done", Category::Done)]);
        let next = recategorize(&coll, "todo", Category::Done);
        assert_eq!(next, coll);
    }

    #[test]
    fn recategorize_moves_to_end_of_destination() {
        let coll = test_collection(&[
            ("a", Category::Todo),
            ("b", Category::Todo),
            ("c", Category::Active),
            ("done", Category::Done),
        ]);
        let next = recategorize(&coll, "a", Category::Active);
        assert_eq!(ids_in(&next, Category::Active), vec!["c", "a"]);
        let moved = next.get("a").unwrap();
        assert_eq!(moved.position, 1);
        assert!(!moved.is_default());
    }

    #[test]
    fn cycle_skips_occupied_singletons() {
        // active → done occupied → cancelled occupied → todo
        let coll = test_collection(&[
            ("todo", Category::Todo),
            ("doing", Category::Active),
            ("done", Category::Done),
            ("nope", Category::Cancelled),
        ]);
        assert_eq!(next_category(&coll, "doing"), Some(Category::Todo));
        // the done status itself cycles: cancelled is occupied, so → todo
        assert_eq!(next_category(&coll, "done"), Some(Category::Todo));
    }

    #[test]
    fn cycle_returns_within_four_applications() {
        // repeatedly cycling any status revisits its starting category within
        // four steps
        let coll = test_collection(&[
            ("todo", Category::Todo),
            ("doing", Category::Active),
            ("done", Category::Done),
        ]);
        for id in ["todo", "doing", "done"] {
            let start = coll.get(id).unwrap().category;
            let mut current = coll.clone();
            let mut returned = false;
            for _ in 0..4 {
                current = cycle_category(&current, id);
                if current.get(id).unwrap().category == start {
                    returned = true;
                    break;
                }
            }
            assert!(returned, "status {} did not return to {:?}", id, start);
        }
    }

    #[test]
    fn reorder_swaps_neighbors_and_stops_at_boundaries() {
        let coll = test_collection(&[
            ("a", Category::Todo),
            ("b", Category::Todo),
            ("c", Category::Todo),
            ("done", Category::Done),
        ]);
        let next = reorder(&coll, "b", Direction::Up);
        assert_eq!(ids_in(&next, Category::Todo), vec!["b", "a", "c"]);
        let next = reorder(&next, "b", Direction::Up);
        assert_eq!(ids_in(&next, Category::Todo), vec!["b", "a", "c"]);
        let next = reorder(&next, "c", Direction::Down);
        assert_eq!(ids_in(&next, Category::Todo), vec!["b", "a", "c"]);
    }

    #[test]
    fn finalize_makes_positions_dense() {
        // after finalize, positions per category are exactly 0..n
        let mut coll = test_collection(&[
            ("a", Category::Todo),
            ("b", Category::Todo),
            ("c", Category::Todo),
            ("done", Category::Done),
        ]);
        coll.get_mut("a").unwrap().position = 4;
        coll.get_mut("b").unwrap().position = 7;
        coll.get_mut("c").unwrap().position = 9;
        let next = finalize(&coll);
        let positions: Vec<usize> = next
            .in_category(Category::Todo)
            .iter()
            .map(|s| s.position)
            .collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(ids_in(&next, Category::Todo), vec!["a", "b", "c"]);
    }

    #[test]
    fn next_status_id_skips_retired_ids() {
        let coll = test_collection(&[("todo", Category::Todo)]);
        let retired = vec!["s-7".to_string()];
        assert_eq!(next_status_id(&coll, retired.iter()), "s-8");
    }

    #[test]
    fn template_seeding_uses_reducer_guards() {
        let template = crate::model::template::find_template("software").unwrap();
        let coll = from_template(&template);
        assert_eq!(coll.len(), 6);
        assert_eq!(coll.count_in(Category::Done), 1);
        assert_eq!(coll.in_category(Category::Done)[0].name, "Done");
        assert_eq!(
            ids_in(&coll, Category::Todo).len() + ids_in(&coll, Category::Active).len(),
            4
        );
        assert!(crate::ops::validate::check_collection(&coll).is_empty());
    }
}
