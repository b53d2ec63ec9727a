mod inmemory;
mod postgres;

pub use inmemory::InMemoryReviewerRepo;
pub use postgres::PostgresReviewerRepo;

use kurator_domain::{Reviewer, ID};

#[async_trait::async_trait]
pub trait IReviewerRepo: Send + Sync {
    async fn insert(&self, reviewer: &Reviewer) -> anyhow::Result<()>;
    async fn find_many(&self, reviewer_ids: &[ID]) -> anyhow::Result<Vec<Reviewer>>;
}
