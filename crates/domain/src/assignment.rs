use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
    Declined,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Declined => "declined",
        }
    }

    /// Only open assignments are candidates for deadline reminders
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid assignment status: `{0}`")]
pub struct InvalidAssignmentStatusError(pub String);

impl FromStr for AssignmentStatus {
    type Err = InvalidAssignmentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "declined" => Ok(Self::Declined),
            _ => Err(InvalidAssignmentStatusError(s.to_string())),
        }
    }
}

/// The pairing of one reviewer with one catalog product.
///
/// This core only ever writes `last_reminder_sent_at`, everything else is owned
/// by the assignment workflow around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewAssignment {
    pub id: ID,
    pub reviewer_id: ID,
    pub product_id: ID,
    pub round_id: Option<ID>,
    pub status: AssignmentStatus,
    pub deadline: Option<NaiveDate>,
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
}

impl ReviewAssignment {
    pub fn new(reviewer_id: ID, product_id: ID, deadline: Option<NaiveDate>) -> Self {
        Self {
            id: Default::default(),
            reviewer_id,
            product_id,
            round_id: None,
            status: AssignmentStatus::Pending,
            deadline,
            last_reminder_sent_at: None,
        }
    }

    /// Whole days from `today` until the deadline. Negative when overdue.
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline
            .map(|deadline| deadline.signed_duration_since(today).num_days())
    }

    /// Records a reminder sent at `at`. Never moves the timestamp backwards.
    pub fn mark_reminded(&mut self, at: DateTime<Utc>) -> bool {
        match self.last_reminder_sent_at {
            Some(prev) if prev >= at => false,
            _ => {
                self.last_reminder_sent_at = Some(at);
                true
            }
        }
    }
}

impl Entity for ReviewAssignment {
    fn id(&self) -> &ID {
        &self.id
    }
}
