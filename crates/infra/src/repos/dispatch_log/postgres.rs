use super::IDispatchLogRepo;
use chrono::{DateTime, Utc};
use kurator_domain::{DispatchCounts, DispatchLogEntry};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresDispatchLogRepo {
    pool: PgPool,
}

impl PostgresDispatchLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DispatchLogRaw {
    entry_uid: Uuid,
    run_at: DateTime<Utc>,
    outcome: String,
    forced: bool,
    reviews_processed: i64,
    reviewers_notified: i64,
    emails_sent: i64,
    emails_failed: i64,
    threshold_days: i64,
    min_interval_hours: i64,
}

impl TryFrom<DispatchLogRaw> for DispatchLogEntry {
    type Error = anyhow::Error;

    fn try_from(e: DispatchLogRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.entry_uid.into(),
            run_at: e.run_at,
            outcome: e.outcome.parse()?,
            forced: e.forced,
            counts: DispatchCounts {
                reviews_processed: e.reviews_processed,
                reviewers_notified: e.reviewers_notified,
                emails_sent: e.emails_sent,
                emails_failed: e.emails_failed,
            },
            threshold_days: e.threshold_days,
            min_interval_hours: e.min_interval_hours,
        })
    }
}

#[async_trait::async_trait]
impl IDispatchLogRepo for PostgresDispatchLogRepo {
    async fn insert(&self, entry: &DispatchLogEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_dispatch_log(
                entry_uid, run_at, outcome, forced,
                reviews_processed, reviewers_notified, emails_sent, emails_failed,
                threshold_days, min_interval_hours
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(entry.run_at)
        .bind(entry.outcome.as_str())
        .bind(entry.forced)
        .bind(entry.counts.reviews_processed)
        .bind(entry.counts.reviewers_notified)
        .bind(entry.counts.emails_sent)
        .bind(entry.counts.emails_failed)
        .bind(entry.threshold_days)
        .bind(entry.min_interval_hours)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert dispatch log entry: {:?}. DB returned error: {:?}",
                entry, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_recent(&self, limit: i64) -> anyhow::Result<Vec<DispatchLogEntry>> {
        let rows: Vec<DispatchLogRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_dispatch_log
            ORDER BY run_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find recent dispatch log entries failed. DB returned error: {:?}",
                e
            );
            e
        })?;
        rows.into_iter().map(DispatchLogEntry::try_from).collect()
    }
}
