use crate::{
    eligibility::ReminderRunParams,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Reminders were disabled and the run was not forced
    Disabled,
    /// Eligibility was evaluated, possibly with nothing to send
    Evaluated,
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Evaluated => "evaluated",
        }
    }
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid run outcome: `{0}`")]
pub struct InvalidRunOutcomeError(pub String);

impl FromStr for RunOutcome {
    type Err = InvalidRunOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "evaluated" => Ok(Self::Evaluated),
            _ => Err(InvalidRunOutcomeError(s.to_string())),
        }
    }
}

/// Counters produced by one reminder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCounts {
    pub reviews_processed: i64,
    pub reviewers_notified: i64,
    pub emails_sent: i64,
    pub emails_failed: i64,
}

/// Append only record of one reminder run
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchLogEntry {
    pub id: ID,
    pub run_at: DateTime<Utc>,
    pub outcome: RunOutcome,
    pub forced: bool,
    pub counts: DispatchCounts,
    /// Resolved settings the run used, overrides included
    pub threshold_days: i64,
    pub min_interval_hours: i64,
}

impl DispatchLogEntry {
    pub fn new(
        run_at: DateTime<Utc>,
        params: &ReminderRunParams,
        outcome: RunOutcome,
        counts: DispatchCounts,
    ) -> Self {
        Self {
            id: Default::default(),
            run_at,
            outcome,
            forced: params.force,
            counts,
            threshold_days: params.threshold_days,
            min_interval_hours: params.min_interval_hours,
        }
    }
}

impl Entity for DispatchLogEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
