mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderSettingsRepo;
pub use postgres::PostgresReminderSettingsRepo;

use kurator_domain::{ReminderSettings, ReminderSettingsPatch};

/// Storage of the single `ReminderSettings` record
#[async_trait::async_trait]
pub trait IReminderSettingsRepo: Send + Sync {
    /// Returns the stored settings, seeding the defaults first if none exist
    async fn get(&self) -> anyhow::Result<ReminderSettings>;
    /// Applies the provided fields in one step and returns the merged result.
    /// The patch must already be validated.
    async fn update(&self, patch: &ReminderSettingsPatch) -> anyhow::Result<ReminderSettings>;
}
