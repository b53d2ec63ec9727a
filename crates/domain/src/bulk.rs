use serde::{Deserialize, Serialize};

/// Why a single item of a bulk operation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: String,
    pub reason: String,
}

/// Aggregated per item outcome of a bulk operation.
///
/// Ids are kept exactly as the caller provided them so that the failed subset
/// can be retried as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult {
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl BulkResult {
    pub fn record_success(&mut self, id: String) {
        self.succeeded.push(id);
    }

    pub fn record_failure(&mut self, id: String, reason: impl ToString) {
        self.failed.push(BulkFailure {
            id,
            reason: reason.to_string(),
        });
    }
}
