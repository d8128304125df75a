use serde::{Deserialize, Serialize};

/// A task row. Tasks reference a status by id; the status engine never
/// mutates a task directly — it only emits remap instructions for the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub status_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

impl TaskRecord {
    pub fn new(id: String, title: String, status_id: String, added: String) -> Self {
        TaskRecord {
            id,
            title,
            status_id,
            added: Some(added),
        }
    }
}
