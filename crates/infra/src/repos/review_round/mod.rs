mod inmemory;
mod postgres;

pub use inmemory::InMemoryReviewRoundRepo;
pub use postgres::PostgresReviewRoundRepo;

use kurator_domain::{ReviewRound, RoundStatus, ID};

#[async_trait::async_trait]
pub trait IReviewRoundRepo: Send + Sync {
    async fn insert(&self, round: &ReviewRound) -> anyhow::Result<()>;
    async fn find(&self, round_id: &ID) -> anyhow::Result<Option<ReviewRound>>;
    /// Writes the new status in a single statement. Returns the updated round or
    /// `None` if no round has the given id.
    async fn update_status(
        &self,
        round_id: &ID,
        status: RoundStatus,
    ) -> anyhow::Result<Option<ReviewRound>>;
}
