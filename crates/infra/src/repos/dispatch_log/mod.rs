mod inmemory;
mod postgres;

pub use inmemory::InMemoryDispatchLogRepo;
pub use postgres::PostgresDispatchLogRepo;

use kurator_domain::DispatchLogEntry;

#[async_trait::async_trait]
pub trait IDispatchLogRepo: Send + Sync {
    async fn insert(&self, entry: &DispatchLogEntry) -> anyhow::Result<()>;
    /// The `limit` most recent entries, newest first
    async fn find_recent(&self, limit: i64) -> anyhow::Result<Vec<DispatchLogEntry>>;
}
