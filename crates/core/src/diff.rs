//! Key-by-key comparison of two JSON records.
//!
//! Used to build minimal PATCH bodies: only keys whose status is not
//! `Unchanged` need to be sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The status of a key in a diff comparison.
///
/// - `Added`     -- present only in the new record.
/// - `Removed`   -- present only in the old record.
/// - `Changed`   -- present in both with different values.
/// - `Unchanged` -- present in both with identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One key of a record comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    pub field: String,
    pub status: DiffStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

/// Compare two records key by key.
///
/// Keys of `before` come first in their own order, followed by keys that
/// only appear in `after`. Keys listed in `ignore` are skipped.
pub fn diff_records(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    ignore: &[&str],
) -> Vec<FieldDiff> {
    let mut diffs = Vec::new();

    for (key, old) in before {
        if ignore.contains(&key.as_str()) {
            continue;
        }
        let (status, new) = match after.get(key) {
            None => (DiffStatus::Removed, None),
            Some(new) if new == old => (DiffStatus::Unchanged, Some(new.clone())),
            Some(new) => (DiffStatus::Changed, Some(new.clone())),
        };
        diffs.push(FieldDiff {
            field: key.clone(),
            status,
            before: Some(old.clone()),
            after: new,
        });
    }

    for (key, new) in after {
        if ignore.contains(&key.as_str()) || before.contains_key(key) {
            continue;
        }
        diffs.push(FieldDiff {
            field: key.clone(),
            status: DiffStatus::Added,
            before: None,
            after: Some(new.clone()),
        });
    }

    diffs
}
