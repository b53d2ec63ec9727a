use crate::dtos::{DispatchLogEntryDTO, ReminderSettingsDTO, RunSettingsDTO, UpcomingReminderDTO};
use serde::{Deserialize, Serialize};

pub mod get_reminder_settings {
    use super::*;

    pub type APIResponse = ReminderSettingsDTO;
}

pub mod update_reminder_settings {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub enabled: Option<bool>,
        #[serde(default)]
        pub threshold_days: Option<i64>,
        #[serde(default)]
        pub min_interval_hours: Option<i64>,
    }

    pub type APIResponse = ReminderSettingsDTO;
}

pub mod run_reminder_pass {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub force: bool,
        #[serde(default)]
        pub threshold_days: Option<i64>,
        #[serde(default)]
        pub min_interval_hours: Option<i64>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub reviews_processed: i64,
        pub reviewers_notified: i64,
        pub emails_sent: i64,
        pub emails_failed: i64,
        pub settings: RunSettingsDTO,
    }
}

pub mod get_upcoming_reminders {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub force: Option<bool>,
        #[serde(default)]
        pub threshold_days: Option<i64>,
        #[serde(default)]
        pub min_interval_hours: Option<i64>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// `false` when reminders are disabled and the query was not forced
        pub enabled: bool,
        pub reminders: Vec<UpcomingReminderDTO>,
        pub settings: RunSettingsDTO,
    }
}

pub mod get_dispatch_log {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub limit: Option<i64>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub runs: Vec<DispatchLogEntryDTO>,
    }
}
