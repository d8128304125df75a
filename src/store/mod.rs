pub mod board_io;
pub mod json;

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::ops::session::EditSession;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a slate board: no slate/ directory found")]
    NotABoard,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    DataParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse board.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize board.toml: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
    #[error("could not serialize {0}: {1}")]
    DataSerializeError(&'static str, serde_json::Error),
    #[error("unknown status id: {0}")]
    UnknownStatus(String),
    #[error("template produces an invalid board: {0}")]
    InvalidTemplate(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The persistence boundary the status engine writes through.
///
/// Implementations are external collaborators: the engine only ever calls
/// these four operations, in the order `commit_session` fixes. Each call is
/// idempotent over the same final collection, so a failed commit is retried
/// from the top.
pub trait StatusStore {
    /// How many live tasks reference this status
    fn count_tasks_referencing(&self, status_id: &str) -> Result<usize, StoreError>;
    /// Point every task referencing `from` at `to`
    fn reassign_tasks(&mut self, from: &str, to: &str) -> Result<(), StoreError>;
    /// Delete status rows by id
    fn delete_statuses(&mut self, ids: &HashSet<String>) -> Result<(), StoreError>;
    /// Insert or update one status row
    fn upsert_status(&mut self, record: &crate::model::StatusRecord) -> Result<(), StoreError>;
}

/// What a commit wrote, for status messages and `--json` output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub reassigned: usize,
    pub deleted: usize,
    pub upserted: usize,
}

/// Apply a session's diff to the store.
///
/// Ordering matters: tasks are pointed away from doomed statuses before those
/// rows are deleted, then every surviving record is upserted with its
/// finalized position. On failure the session is left untouched so the user
/// can retry the whole commit; the caller decides when to `mark_committed`.
pub fn commit_session(
    store: &mut dyn StatusStore,
    session: &EditSession,
) -> Result<CommitSummary, StoreError> {
    let mut summary = CommitSummary::default();

    for (from, to) in session.remaps() {
        store.reassign_tasks(from, to)?;
        summary.reassigned += 1;
    }

    if !session.deleted().is_empty() {
        store.delete_statuses(session.deleted())?;
        summary.deleted = session.deleted().len();
    }

    for record in session.finalized().display_order() {
        store.upsert_status(record)?;
        summary.upserted += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, StatusRecord};
    use crate::ops::status_ops::test_collection;

    /// Store double that records the order of calls
    #[derive(Default)]
    struct LogStore {
        calls: Vec<String>,
        counts: std::collections::HashMap<String, usize>,
        fail_on_delete: bool,
    }

    impl StatusStore for LogStore {
        fn count_tasks_referencing(&self, status_id: &str) -> Result<usize, StoreError> {
            Ok(self.counts.get(status_id).copied().unwrap_or(0))
        }

        fn reassign_tasks(&mut self, from: &str, to: &str) -> Result<(), StoreError> {
            self.calls.push(format!("reassign {} -> {}", from, to));
            Ok(())
        }

        fn delete_statuses(&mut self, ids: &HashSet<String>) -> Result<(), StoreError> {
            let mut sorted: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
            sorted.sort();
            self.calls.push(format!("delete {}", sorted.join(",")));
            if self.fail_on_delete {
                return Err(StoreError::UnknownStatus("boom".into()));
            }
            Ok(())
        }

        fn upsert_status(&mut self, record: &StatusRecord) -> Result<(), StoreError> {
            self.calls.push(format!("upsert {}", record.id));
            Ok(())
        }
    }

    fn session_with_remap() -> EditSession {
        let coll = test_collection(&[
            ("Todo", Category::Todo),
            ("InProgress", Category::Active),
            ("Done", Category::Done),
        ]);
        let mut session = crate::ops::session::EditSession::new(coll);
        session.remove("InProgress", 2).unwrap();
        session.confirm_remap("Todo").unwrap();
        session
    }

    #[test]
    fn commit_reassigns_before_deleting_before_upserting() {
        let session = session_with_remap();
        let mut store = LogStore::default();
        let summary = commit_session(&mut store, &session).unwrap();
        assert_eq!(
            store.calls,
            vec![
                "reassign InProgress -> Todo",
                "delete InProgress",
                "upsert Todo",
                "upsert Done",
            ]
        );
        assert_eq!(
            summary,
            CommitSummary {
                reassigned: 1,
                deleted: 1,
                upserted: 2,
            }
        );
    }

    #[test]
    fn failed_commit_leaves_session_retryable() {
        let session = session_with_remap();
        let mut store = LogStore {
            fail_on_delete: true,
            ..Default::default()
        };
        assert!(commit_session(&mut store, &session).is_err());
        // session still carries the diff; a retry re-runs the full sequence
        assert_eq!(session.remaps().len(), 1);
        assert_eq!(session.deleted().len(), 1);

        store.fail_on_delete = false;
        store.calls.clear();
        commit_session(&mut store, &session).unwrap();
        assert_eq!(store.calls[0], "reassign InProgress -> Todo");
        assert_eq!(store.calls[1], "delete InProgress");
    }
}
