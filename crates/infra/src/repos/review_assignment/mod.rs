mod inmemory;
mod postgres;

pub use inmemory::InMemoryReviewAssignmentRepo;
pub use postgres::PostgresReviewAssignmentRepo;

use chrono::{DateTime, NaiveDate, Utc};
use kurator_domain::{ReviewAssignment, ID};

#[async_trait::async_trait]
pub trait IReviewAssignmentRepo: Send + Sync {
    async fn insert(&self, assignment: &ReviewAssignment) -> anyhow::Result<()>;
    async fn find(&self, assignment_id: &ID) -> anyhow::Result<Option<ReviewAssignment>>;
    /// Open assignments with a deadline on or before `last_deadline`
    async fn find_open_due_by(
        &self,
        last_deadline: NaiveDate,
    ) -> anyhow::Result<Vec<ReviewAssignment>>;
    /// Sets `last_reminder_sent_at` to `at` for the given assignments, unless
    /// they already carry a later or equal timestamp. Returns the number of
    /// assignments that changed.
    async fn mark_reminded(&self, assignment_ids: &[ID], at: DateTime<Utc>) -> anyhow::Result<u64>;
}
