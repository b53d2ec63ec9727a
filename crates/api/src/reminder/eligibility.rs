use chrono::{DateTime, NaiveDate, Utc};
use kurator_domain::{
    local_today, EligibilityWindow, InvalidSettingError, ReminderRunParams, ReviewAssignment,
};
use kurator_infra::KuratorContext;
use tracing::debug;

#[derive(Debug)]
pub enum ResolveParamsError {
    StoreUnavailable,
    InvalidSetting(InvalidSettingError),
}

/// Reads the stored settings once and applies the caller overrides for this run
pub async fn resolve_run_params(
    ctx: &KuratorContext,
    threshold_days: Option<i64>,
    min_interval_hours: Option<i64>,
    force: bool,
) -> Result<ReminderRunParams, ResolveParamsError> {
    let stored = ctx
        .repos
        .reminder_settings
        .get()
        .await
        .map_err(|_| ResolveParamsError::StoreUnavailable)?;

    ReminderRunParams::resolve(&stored, threshold_days, min_interval_hours, force)
        .map_err(ResolveParamsError::InvalidSetting)
}

#[derive(Debug, PartialEq)]
pub enum Selection {
    /// Reminders are disabled and the run was not forced
    Disabled,
    Eligible {
        today: NaiveDate,
        /// Most urgent first
        assignments: Vec<ReviewAssignment>,
    },
}

/// Computes the assignments due for a reminder at `now` from a single read of
/// the open assignments. Either the full eligible set is returned or the call
/// fails.
pub async fn select_eligible(
    ctx: &KuratorContext,
    params: &ReminderRunParams,
    now: DateTime<Utc>,
) -> anyhow::Result<Selection> {
    if params.is_disabled() {
        return Ok(Selection::Disabled);
    }

    let today = local_today(now, ctx.config.reminder_timezone);
    let window = EligibilityWindow::new(now, today, *params);
    let candidates = ctx
        .repos
        .review_assignments
        .find_open_due_by(window.last_deadline())
        .await?;
    let candidate_count = candidates.len();
    let assignments = window.select(candidates);
    debug!(
        "{} of {} open assignments due by {} are eligible for a reminder",
        assignments.len(),
        candidate_count,
        window.last_deadline()
    );

    Ok(Selection::Eligible { today, assignments })
}
