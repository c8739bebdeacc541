//! Dataset records: questions paired with their SQL and execution plan XML

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named dataset split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training split
    Train,
    /// Development split
    Dev,
}

impl Split {
    /// Every split
    pub const ALL: [Split; 2] = [Split::Train, Split::Dev];

    /// File name of the persisted split inside the dataset directory
    pub fn file_name(self) -> String {
        format!("{self}_spider_with_ep.json")
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Dev => write!(f, "dev"),
        }
    }
}

/// One dataset instance.
///
/// Records may carry more fields than these (tokenised queries, SQL
/// structure); they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Database the query runs against
    pub db_id: String,
    /// SQL text
    pub query: String,
    /// Natural-language question
    pub question: String,
    /// Execution plan XML, serialized
    pub ep: String,
}

/// Read all records of a split from `dir`
pub fn load_split(dir: &Path, split: Split) -> CoreResult<Vec<DatasetRecord>> {
    let path = dir.join(split.file_name());
    if !path.exists() {
        return Err(CoreError::SplitNotFound {
            split: split.to_string(),
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    let records: Vec<DatasetRecord> =
        serde_json::from_str(&content).map_err(|e| CoreError::DatasetDecode {
            path: path.display().to_string(),
            source: e,
        })?;
    log::debug!("Loaded {} {} records from {}", records.len(), split, path.display());
    Ok(records)
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
