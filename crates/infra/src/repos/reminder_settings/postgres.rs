use super::IReminderSettingsRepo;
use kurator_domain::{ReminderSettings, ReminderSettingsPatch};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderSettingsRepo {
    pool: PgPool,
}

impl PostgresReminderSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn seed_defaults(&self) -> anyhow::Result<()> {
        let defaults = ReminderSettings::default();
        sqlx::query(
            r#"
            INSERT INTO reminder_settings(singleton, enabled, threshold_days, min_interval_hours)
            VALUES(TRUE, $1, $2, $3)
            ON CONFLICT (singleton) DO NOTHING
            "#,
        )
        .bind(defaults.enabled)
        .bind(defaults.threshold_days)
        .bind(defaults.min_interval_hours)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to seed default reminder settings. DB returned error: {:?}",
                e
            );
            e
        })?;
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct ReminderSettingsRaw {
    enabled: bool,
    threshold_days: i64,
    min_interval_hours: i64,
}

impl From<ReminderSettingsRaw> for ReminderSettings {
    fn from(e: ReminderSettingsRaw) -> Self {
        Self {
            enabled: e.enabled,
            threshold_days: e.threshold_days,
            min_interval_hours: e.min_interval_hours,
        }
    }
}

#[async_trait::async_trait]
impl IReminderSettingsRepo for PostgresReminderSettingsRepo {
    async fn get(&self) -> anyhow::Result<ReminderSettings> {
        self.seed_defaults().await?;
        let settings: ReminderSettingsRaw = sqlx::query_as(
            r#"
            SELECT enabled, threshold_days, min_interval_hours FROM reminder_settings
            WHERE singleton = TRUE
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Find reminder settings failed. DB returned error: {:?}", e);
            e
        })?;
        Ok(settings.into())
    }

    async fn update(&self, patch: &ReminderSettingsPatch) -> anyhow::Result<ReminderSettings> {
        self.seed_defaults().await?;
        let settings: ReminderSettingsRaw = sqlx::query_as(
            r#"
            UPDATE reminder_settings
            SET enabled = COALESCE($1, enabled),
            threshold_days = COALESCE($2, threshold_days),
            min_interval_hours = COALESCE($3, min_interval_hours)
            WHERE singleton = TRUE
            RETURNING enabled, threshold_days, min_interval_hours
            "#,
        )
        .bind(patch.enabled)
        .bind(patch.threshold_days)
        .bind(patch.min_interval_hours)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Update reminder settings with: {:?} failed. DB returned error: {:?}",
                patch, e
            );
            e
        })?;
        Ok(settings.into())
    }
}
