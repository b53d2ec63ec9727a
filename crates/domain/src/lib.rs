mod assignment;
mod bulk;
mod dispatch_log;
mod eligibility;
mod notification;
mod reminder_settings;
mod reviewer;
mod round;
mod shared;

pub use assignment::{AssignmentStatus, InvalidAssignmentStatusError, ReviewAssignment};
pub use bulk::{BulkFailure, BulkResult};
pub use chrono_tz::Tz;
pub use dispatch_log::{DispatchCounts, DispatchLogEntry, InvalidRunOutcomeError, RunOutcome};
pub use eligibility::{local_today, EligibilityWindow, ReminderRunParams};
pub use notification::{group_by_reviewer, ReminderItem, ReminderMessage, ReviewerDigest, Urgency};
pub use reminder_settings::{
    InvalidSettingError, ReminderSettings, ReminderSettingsPatch, DEFAULT_MIN_INTERVAL_HOURS,
    DEFAULT_THRESHOLD_DAYS,
};
pub use reviewer::Reviewer;
pub use round::{InvalidRoundError, InvalidRoundStatusError, ReviewRound, RoundStatus};
pub use shared::entity::{Entity, InvalidIDError, ID};
