use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::status::{Category, StatusRecord};

/// An ordered set of statuses, keyed by id.
///
/// Display order is: categories in `Category::ALL` order, then `position`
/// within each category. All lookups go through ids — there are deliberately
/// no index-based accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCollection {
    statuses: IndexMap<String, StatusRecord>,
}

impl StatusCollection {
    pub fn new() -> Self {
        StatusCollection::default()
    }

    pub fn from_records(records: Vec<StatusRecord>) -> Self {
        let mut statuses = IndexMap::new();
        for record in records {
            statuses.insert(record.id.clone(), record);
        }
        StatusCollection { statuses }
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.statuses.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&StatusRecord> {
        self.statuses.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut StatusRecord> {
        self.statuses.get_mut(id)
    }

    pub fn insert(&mut self, record: StatusRecord) {
        self.statuses.insert(record.id.clone(), record);
    }

    /// Remove a status by id, preserving the order of the rest
    pub fn remove(&mut self, id: &str) -> Option<StatusRecord> {
        self.statuses.shift_remove(id)
    }

    /// Iterate in insertion order (not display order)
    pub fn iter(&self) -> impl Iterator<Item = &StatusRecord> {
        self.statuses.values()
    }

    /// Statuses in the given category, sorted by position
    pub fn in_category(&self, category: Category) -> Vec<&StatusRecord> {
        let mut records: Vec<&StatusRecord> = self
            .statuses
            .values()
            .filter(|s| s.category == category)
            .collect();
        records.sort_by_key(|s| s.position);
        records
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.statuses
            .values()
            .filter(|s| s.category == category)
            .count()
    }

    /// All statuses in display order: category lanes in fixed order, then
    /// position within each lane
    pub fn display_order(&self) -> Vec<&StatusRecord> {
        let mut ordered = Vec::with_capacity(self.statuses.len());
        for category in Category::ALL {
            ordered.extend(self.in_category(category));
        }
        ordered
    }

    /// Ids in display order (for cursor lists in the TUI)
    pub fn display_ids(&self) -> Vec<String> {
        self.display_order().iter().map(|s| s.id.clone()).collect()
    }

    /// Highest position currently used in a category, if any status is there
    pub fn max_position_in(&self, category: Category) -> Option<usize> {
        self.statuses
            .values()
            .filter(|s| s.category == category)
            .map(|s| s.position)
            .max()
    }

    /// Find a status by exact id, falling back to case-insensitive name match
    pub fn resolve(&self, id_or_name: &str) -> Option<&StatusRecord> {
        if let Some(record) = self.statuses.get(id_or_name) {
            return Some(record);
        }
        self.statuses
            .values()
            .find(|s| s.name.eq_ignore_ascii_case(id_or_name))
    }
}
