use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::collection::StatusCollection;
use crate::model::status::StatusRecord;
use crate::model::task::TaskRecord;

use super::{StatusStore, StoreError};

const STATUSES_FILE: &str = "statuses.json";
const TASKS_FILE: &str = "tasks.json";

/// Status and task rows persisted as JSON files under `slate/`.
///
/// Every mutating call writes through to disk immediately, so a partially
/// failed commit leaves the files consistent with the calls that succeeded —
/// the retry semantics the commit sequence relies on.
#[derive(Debug)]
pub struct JsonStore {
    slate_dir: PathBuf,
    statuses: Vec<StatusRecord>,
    tasks: Vec<TaskRecord>,
}

fn read_json_vec<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| StoreError::DataParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

impl JsonStore {
    /// Load the store from an existing `slate/` directory
    pub fn load(slate_dir: &Path) -> Result<Self, StoreError> {
        let statuses = read_json_vec(&slate_dir.join(STATUSES_FILE))?;
        let tasks = read_json_vec(&slate_dir.join(TASKS_FILE))?;
        Ok(JsonStore {
            slate_dir: slate_dir.to_path_buf(),
            statuses,
            tasks,
        })
    }

    /// Create an empty store in a fresh `slate/` directory
    pub fn create(slate_dir: &Path) -> Result<Self, StoreError> {
        let store = JsonStore {
            slate_dir: slate_dir.to_path_buf(),
            statuses: Vec::new(),
            tasks: Vec::new(),
        };
        store.save_statuses()?;
        store.save_tasks()?;
        Ok(store)
    }

    /// The persisted statuses as a collection, in stored order
    pub fn collection(&self) -> StatusCollection {
        StatusCollection::from_records(self.statuses.clone())
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    fn save_statuses(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.statuses)
            .map_err(|e| StoreError::DataSerializeError(STATUSES_FILE, e))?;
        fs::write(self.slate_dir.join(STATUSES_FILE), text + "\n")?;
        Ok(())
    }

    fn save_tasks(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.tasks)
            .map_err(|e| StoreError::DataSerializeError(TASKS_FILE, e))?;
        fs::write(self.slate_dir.join(TASKS_FILE), text + "\n")?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Task surface (CLI only; the status engine never touches tasks)
    // -----------------------------------------------------------------------

    /// Add a task pointing at `status_id`. Returns the new task id.
    pub fn add_task(&mut self, title: &str, status_id: &str) -> Result<String, StoreError> {
        if !self.statuses.iter().any(|s| s.id == status_id) {
            return Err(StoreError::UnknownStatus(status_id.to_string()));
        }
        let max = self
            .tasks
            .iter()
            .filter_map(|t| t.id.strip_prefix("t-"))
            .filter_map(|n| n.parse::<usize>().ok())
            .max()
            .unwrap_or(0);
        let id = format!("t-{}", max + 1);
        let added = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.tasks.push(TaskRecord::new(
            id.clone(),
            title.to_string(),
            status_id.to_string(),
            added,
        ));
        self.save_tasks()?;
        Ok(id)
    }

    /// Point one task at a different status
    pub fn set_task_status(&mut self, task_id: &str, status_id: &str) -> Result<(), StoreError> {
        if !self.statuses.iter().any(|s| s.id == status_id) {
            return Err(StoreError::UnknownStatus(status_id.to_string()));
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::UnknownStatus(task_id.to_string()))?;
        task.status_id = status_id.to_string();
        self.save_tasks()
    }
}

impl StatusStore for JsonStore {
    fn count_tasks_referencing(&self, status_id: &str) -> Result<usize, StoreError> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.status_id == status_id)
            .count())
    }

    fn reassign_tasks(&mut self, from: &str, to: &str) -> Result<(), StoreError> {
        let mut changed = false;
        for task in &mut self.tasks {
            if task.status_id == from {
                task.status_id = to.to_string();
                changed = true;
            }
        }
        if changed {
            self.save_tasks()?;
        }
        Ok(())
    }

    fn delete_statuses(&mut self, ids: &HashSet<String>) -> Result<(), StoreError> {
        let before = self.statuses.len();
        self.statuses.retain(|s| !ids.contains(&s.id));
        if self.statuses.len() != before {
            self.save_statuses()?;
        }
        Ok(())
    }

    fn upsert_status(&mut self, record: &StatusRecord) -> Result<(), StoreError> {
        let mut stored = record.clone();
        stored.is_new = false;
        match self.statuses.iter_mut().find(|s| s.id == record.id) {
            Some(existing) => *existing = stored,
            None => self.statuses.push(stored),
        }
        // keep the file in display order: category lane, then position
        self.statuses.sort_by_key(|s| {
            let lane = crate::model::Category::ALL
                .iter()
                .position(|c| *c == s.category)
                .unwrap_or(0);
            (lane, s.position)
        });
        self.save_statuses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Swatch};
    use crate::ops::session::EditSession;
    use crate::store::commit_session;

    fn seeded_store(dir: &Path) -> JsonStore {
        let mut store = JsonStore::create(dir).unwrap();
        for (id, name, category) in [
            ("s-1", "Todo", Category::Todo),
            ("s-2", "In Progress", Category::Active),
            ("s-3", "Done", Category::Done),
        ] {
            let mut record = StatusRecord::new(
                id.to_string(),
                name.to_string(),
                Swatch::default_for(category),
                category,
            );
            record.position = 0;
            store.upsert_status(&record).unwrap();
        }
        store
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(dir.path());
        let reloaded = JsonStore::load(dir.path()).unwrap();
        assert_eq!(reloaded.collection(), store.collection());
        assert!(reloaded.collection().iter().all(|s| !s.is_new));
    }

    #[test]
    fn task_counts_and_reassignment() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = seeded_store(dir.path());
        store.add_task("write docs", "s-2").unwrap();
        store.add_task("fix bug", "s-2").unwrap();
        assert_eq!(store.count_tasks_referencing("s-2").unwrap(), 2);
        store.reassign_tasks("s-2", "s-1").unwrap();
        assert_eq!(store.count_tasks_referencing("s-2").unwrap(), 0);
        assert_eq!(store.count_tasks_referencing("s-1").unwrap(), 2);
        // reassignment is idempotent
        store.reassign_tasks("s-2", "s-1").unwrap();
        assert_eq!(store.count_tasks_referencing("s-1").unwrap(), 2);
    }

    #[test]
    fn full_commit_deletes_status_after_remap() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = seeded_store(dir.path());
        store.add_task("in flight", "s-2").unwrap();

        let mut session = EditSession::new(store.collection());
        let count = store.count_tasks_referencing("s-2").unwrap();
        session.remove("s-2", count).unwrap();
        session.confirm_remap("s-1").unwrap();

        commit_session(&mut store, &session).unwrap();

        let reloaded = JsonStore::load(dir.path()).unwrap();
        assert!(!reloaded.collection().contains("s-2"));
        assert_eq!(reloaded.tasks()[0].status_id, "s-1");
        // dense positions survived the trip
        let positions: Vec<usize> = reloaded
            .collection()
            .in_category(Category::Todo)
            .iter()
            .map(|s| s.position)
            .collect();
        assert_eq!(positions, vec![0]);
    }
}
