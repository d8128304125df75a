use serde::Serialize;

use crate::model::status::StatusRecord;
use crate::model::task::TaskRecord;
use crate::ops::validate::Violation;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct StatusJson {
    pub id: String,
    pub name: String,
    pub color: String,
    pub hex: String,
    pub category: String,
    pub position: usize,
    pub is_default: bool,
    pub is_completed: bool,
}

impl StatusJson {
    pub fn from_record(record: &StatusRecord) -> Self {
        StatusJson {
            id: record.id.clone(),
            name: record.name.clone(),
            color: record.color.name().to_string(),
            hex: record.color.hex().to_string(),
            category: record.category.to_string(),
            position: record.position,
            is_default: record.is_default(),
            is_completed: record.is_completed(),
        }
    }
}

#[derive(Serialize)]
pub struct StatusListJson {
    pub board: String,
    pub statuses: Vec<StatusJson>,
}

#[derive(Serialize)]
pub struct CheckJson {
    pub valid: bool,
    pub violations: Vec<ViolationJson>,
}

#[derive(Serialize)]
pub struct ViolationJson {
    #[serde(flatten)]
    pub violation: Violation,
    pub message: String,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

impl TaskJson {
    pub fn from_record(task: &TaskRecord, status_name: &str) -> Self {
        TaskJson {
            id: task.id.clone(),
            title: task.title.clone(),
            status: status_name.to_string(),
            added: task.added.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct TemplateJson {
    pub id: String,
    pub name: String,
    pub statuses: usize,
}
