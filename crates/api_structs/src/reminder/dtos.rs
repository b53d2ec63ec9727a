use chrono::{DateTime, NaiveDate, Utc};
use kurator_domain::{
    DispatchLogEntry, ReminderItem, ReminderRunParams, ReminderSettings, ReviewerDigest,
    RunOutcome, Urgency, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsDTO {
    pub enabled: bool,
    pub threshold_days: i64,
    pub min_interval_hours: i64,
}

impl ReminderSettingsDTO {
    pub fn new(settings: &ReminderSettings) -> Self {
        Self {
            enabled: settings.enabled,
            threshold_days: settings.threshold_days,
            min_interval_hours: settings.min_interval_hours,
        }
    }
}

/// Settings a reminder run resolved, caller overrides included
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunSettingsDTO {
    pub threshold_days: i64,
    pub min_interval_hours: i64,
}

impl RunSettingsDTO {
    pub fn new(params: &ReminderRunParams) -> Self {
        Self {
            threshold_days: params.threshold_days,
            min_interval_hours: params.min_interval_hours,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderItemDTO {
    pub assignment_id: ID,
    pub product_id: ID,
    pub round_id: Option<ID>,
    pub deadline: NaiveDate,
    pub days_until_deadline: i64,
    pub label: String,
}

impl ReminderItemDTO {
    pub fn new(item: &ReminderItem) -> Self {
        Self {
            assignment_id: item.assignment_id.clone(),
            product_id: item.product_id.clone(),
            round_id: item.round_id.clone(),
            deadline: item.deadline,
            days_until_deadline: item.days_until_deadline,
            label: item.due_label(),
        }
    }
}

/// A consolidated reminder that a run would send to one reviewer
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReminderDTO {
    pub reviewer_id: ID,
    /// `None` when the reviewer record could not be resolved
    pub recipient: Option<String>,
    pub urgency: Urgency,
    pub subject: String,
    pub items: Vec<ReminderItemDTO>,
}

impl UpcomingReminderDTO {
    pub fn new(digest: &ReviewerDigest, recipient: Option<String>) -> Self {
        Self {
            reviewer_id: digest.reviewer_id.clone(),
            recipient,
            urgency: digest.urgency(),
            subject: digest.subject(),
            items: digest.items.iter().map(ReminderItemDTO::new).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DispatchLogEntryDTO {
    pub id: ID,
    pub run_at: DateTime<Utc>,
    pub outcome: RunOutcome,
    pub forced: bool,
    pub reviews_processed: i64,
    pub reviewers_notified: i64,
    pub emails_sent: i64,
    pub emails_failed: i64,
    pub threshold_days: i64,
    pub min_interval_hours: i64,
}

impl DispatchLogEntryDTO {
    pub fn new(entry: DispatchLogEntry) -> Self {
        Self {
            id: entry.id,
            run_at: entry.run_at,
            outcome: entry.outcome,
            forced: entry.forced,
            reviews_processed: entry.counts.reviews_processed,
            reviewers_notified: entry.counts.reviewers_notified,
            emails_sent: entry.counts.emails_sent,
            emails_failed: entry.counts.emails_failed,
            threshold_days: entry.threshold_days,
            min_interval_hours: entry.min_interval_hours,
        }
    }
}
