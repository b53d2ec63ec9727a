use crate::base::{APIResponse, BaseClient};
use kurator_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

#[derive(Debug, Default)]
pub struct UpdateReminderSettingsInput {
    pub enabled: Option<bool>,
    pub threshold_days: Option<i64>,
    pub min_interval_hours: Option<i64>,
}

#[derive(Debug, Default)]
pub struct RunRemindersInput {
    pub force: bool,
    pub threshold_days: Option<i64>,
    pub min_interval_hours: Option<i64>,
}

#[derive(Debug, Default)]
pub struct GetUpcomingRemindersInput {
    pub force: Option<bool>,
    pub threshold_days: Option<i64>,
    pub min_interval_hours: Option<i64>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_settings(&self) -> APIResponse<get_reminder_settings::APIResponse> {
        self.base
            .get("reminders/settings".into(), StatusCode::OK)
            .await
    }

    pub async fn update_settings(
        &self,
        input: UpdateReminderSettingsInput,
    ) -> APIResponse<update_reminder_settings::APIResponse> {
        let body = update_reminder_settings::RequestBody {
            enabled: input.enabled,
            threshold_days: input.threshold_days,
            min_interval_hours: input.min_interval_hours,
        };
        self.base
            .put(body, "reminders/settings".into(), StatusCode::OK)
            .await
    }

    pub async fn run(&self, input: RunRemindersInput) -> APIResponse<run_reminder_pass::APIResponse> {
        let body = run_reminder_pass::RequestBody {
            force: input.force,
            threshold_days: input.threshold_days,
            min_interval_hours: input.min_interval_hours,
        };
        self.base
            .post(body, "reminders/run".into(), StatusCode::OK)
            .await
    }

    pub async fn upcoming(
        &self,
        input: GetUpcomingRemindersInput,
    ) -> APIResponse<get_upcoming_reminders::APIResponse> {
        let query = get_upcoming_reminders::QueryParams {
            force: input.force,
            threshold_days: input.threshold_days,
            min_interval_hours: input.min_interval_hours,
        };
        self.base
            .get_with_query("reminders/upcoming".into(), &query, StatusCode::OK)
            .await
    }

    pub async fn runs(&self, limit: Option<i64>) -> APIResponse<get_dispatch_log::APIResponse> {
        let query = get_dispatch_log::QueryParams { limit };
        self.base
            .get_with_query("reminders/runs".into(), &query, StatusCode::OK)
            .await
    }
}
