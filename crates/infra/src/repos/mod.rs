mod dispatch_log;
mod reminder_settings;
mod review_assignment;
mod review_round;
mod reviewer;
mod shared;

pub use dispatch_log::IDispatchLogRepo;
use dispatch_log::{InMemoryDispatchLogRepo, PostgresDispatchLogRepo};
pub use reminder_settings::IReminderSettingsRepo;
use reminder_settings::{InMemoryReminderSettingsRepo, PostgresReminderSettingsRepo};
pub use review_assignment::IReviewAssignmentRepo;
use review_assignment::{InMemoryReviewAssignmentRepo, PostgresReviewAssignmentRepo};
pub use review_round::IReviewRoundRepo;
use review_round::{InMemoryReviewRoundRepo, PostgresReviewRoundRepo};
pub use reviewer::IReviewerRepo;
use reviewer::{InMemoryReviewerRepo, PostgresReviewerRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminder_settings: Arc<dyn IReminderSettingsRepo>,
    pub review_rounds: Arc<dyn IReviewRoundRepo>,
    pub review_assignments: Arc<dyn IReviewAssignmentRepo>,
    pub reviewers: Arc<dyn IReviewerRepo>,
    pub dispatch_log: Arc<dyn IDispatchLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            reminder_settings: Arc::new(PostgresReminderSettingsRepo::new(pool.clone())),
            review_rounds: Arc::new(PostgresReviewRoundRepo::new(pool.clone())),
            review_assignments: Arc::new(PostgresReviewAssignmentRepo::new(pool.clone())),
            reviewers: Arc::new(PostgresReviewerRepo::new(pool.clone())),
            dispatch_log: Arc::new(PostgresDispatchLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminder_settings: Arc::new(InMemoryReminderSettingsRepo::new()),
            review_rounds: Arc::new(InMemoryReviewRoundRepo::new()),
            review_assignments: Arc::new(InMemoryReviewAssignmentRepo::new()),
            reviewers: Arc::new(InMemoryReviewerRepo::new()),
            dispatch_log: Arc::new(InMemoryDispatchLogRepo::new()),
        }
    }
}
