use crate::{
    assignment::ReviewAssignment,
    reminder_settings::{
        validate_min_interval_hours, validate_threshold_days, InvalidSettingError,
        ReminderSettings,
    },
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use std::convert::TryFrom;

/// The parameters of a single reminder run, resolved once when the run starts.
///
/// Caller overrides win over the stored `ReminderSettings` for this run only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderRunParams {
    pub enabled: bool,
    pub threshold_days: i64,
    pub min_interval_hours: i64,
    /// Bypasses both the enabled flag and the throttle
    pub force: bool,
}

impl ReminderRunParams {
    pub fn resolve(
        stored: &ReminderSettings,
        threshold_days: Option<i64>,
        min_interval_hours: Option<i64>,
        force: bool,
    ) -> Result<Self, InvalidSettingError> {
        let threshold_days = match threshold_days {
            Some(days) => validate_threshold_days(days)?,
            None => stored.threshold_days,
        };
        let min_interval_hours = match min_interval_hours {
            Some(hours) => validate_min_interval_hours(hours)?,
            None => stored.min_interval_hours,
        };

        Ok(Self {
            enabled: stored.enabled,
            threshold_days,
            min_interval_hours,
            force,
        })
    }

    pub fn is_disabled(&self) -> bool {
        !self.enabled && !self.force
    }

    /// A forced run ignores prior sends
    pub fn effective_min_interval_hours(&self) -> i64 {
        if self.force {
            0
        } else {
            self.min_interval_hours
        }
    }
}

/// The calendar date of `now` in the reminder time zone
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Decides which open assignments are due for a reminder at `now`.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityWindow {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
    pub params: ReminderRunParams,
}

impl EligibilityWindow {
    pub fn new(now: DateTime<Utc>, today: NaiveDate, params: ReminderRunParams) -> Self {
        Self { now, today, params }
    }

    /// Last deadline inside the window. Overdue deadlines are always inside.
    pub fn last_deadline(&self) -> NaiveDate {
        u64::try_from(self.params.threshold_days)
            .ok()
            .and_then(|days| self.today.checked_add_days(Days::new(days)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn is_in_window(&self, assignment: &ReviewAssignment) -> bool {
        match assignment.deadline {
            Some(deadline) => deadline <= self.last_deadline(),
            None => false,
        }
    }

    pub fn is_throttled(&self, assignment: &ReviewAssignment) -> bool {
        let last_sent = match assignment.last_reminder_sent_at {
            Some(ts) => ts,
            None => return false,
        };
        let min_interval_hours = self.params.effective_min_interval_hours();
        // Also covers a last send stamped ahead of `now` by a skewed clock
        if min_interval_hours == 0 {
            return false;
        }
        let min_interval_secs = min_interval_hours.saturating_mul(60 * 60);
        self.now
            .signed_duration_since(last_sent)
            .num_seconds()
            < min_interval_secs
    }

    pub fn is_eligible(&self, assignment: &ReviewAssignment) -> bool {
        assignment.status.is_open() && self.is_in_window(assignment) && !self.is_throttled(assignment)
    }

    /// Filters `assignments` down to the eligible ones, most urgent first
    pub fn select(&self, assignments: Vec<ReviewAssignment>) -> Vec<ReviewAssignment> {
        let mut eligible = assignments
            .into_iter()
            .filter(|a| self.is_eligible(a))
            .collect::<Vec<_>>();
        eligible.sort_by(|a1, a2| {
            a1.deadline
                .cmp(&a2.deadline)
                .then_with(|| a1.id.cmp(&a2.id))
        });
        eligible
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{AssignmentStatus, ID};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn params(threshold_days: i64, min_interval_hours: i64, force: bool) -> ReminderRunParams {
        ReminderRunParams {
            enabled: true,
            threshold_days,
            min_interval_hours,
            force,
        }
    }

    fn assignment_due_in(days: i64) -> ReviewAssignment {
        ReviewAssignment::new(
            ID::new(),
            ID::new(),
            Some(today() + Duration::days(days)),
        )
    }

    #[test]
    fn window_is_inclusive_and_contains_overdue() {
        let window = EligibilityWindow::new(now(), today(), params(3, 24, false));
        assert!(window.is_eligible(&assignment_due_in(0)));
        assert!(window.is_eligible(&assignment_due_in(3)));
        assert!(!window.is_eligible(&assignment_due_in(4)));
        assert!(window.is_eligible(&assignment_due_in(-1)));
        assert!(window.is_eligible(&assignment_due_in(-400)));

        let window = EligibilityWindow::new(now(), today(), params(0, 24, false));
        assert!(window.is_eligible(&assignment_due_in(0)));
        assert!(!window.is_eligible(&assignment_due_in(1)));
        assert!(window.is_eligible(&assignment_due_in(-1)));
    }

    #[test]
    fn assignments_without_deadline_or_closed_are_never_eligible() {
        let window = EligibilityWindow::new(now(), today(), params(3, 24, true));
        let mut assignment = assignment_due_in(1);
        assignment.deadline = None;
        assert!(!window.is_eligible(&assignment));

        for status in [AssignmentStatus::Completed, AssignmentStatus::Declined] {
            let mut assignment = assignment_due_in(1);
            assignment.status = status;
            assert!(!window.is_eligible(&assignment));
        }
        let mut assignment = assignment_due_in(1);
        assignment.status = AssignmentStatus::InProgress;
        assert!(window.is_eligible(&assignment));
    }

    #[test]
    fn throttle_excludes_recent_reminders_unless_forced() {
        let mut assignment = assignment_due_in(1);
        assignment.last_reminder_sent_at = Some(now() - Duration::hours(10));

        let window = EligibilityWindow::new(now(), today(), params(3, 24, false));
        assert!(window.is_throttled(&assignment));
        assert!(!window.is_eligible(&assignment));

        let forced = EligibilityWindow::new(now(), today(), params(3, 24, true));
        assert!(forced.is_eligible(&assignment));

        // Exactly the interval has elapsed
        assignment.last_reminder_sent_at = Some(now() - Duration::hours(24));
        assert!(window.is_eligible(&assignment));
    }

    #[test]
    fn zero_interval_ignores_sends_stamped_in_the_future() {
        let mut assignment = assignment_due_in(1);
        assignment.last_reminder_sent_at = Some(now() + Duration::seconds(5));

        let forced = EligibilityWindow::new(now(), today(), params(3, 24, true));
        assert!(!forced.is_throttled(&assignment));
        assert!(forced.is_eligible(&assignment));

        let no_interval = EligibilityWindow::new(now(), today(), params(3, 0, false));
        assert!(!no_interval.is_throttled(&assignment));

        let window = EligibilityWindow::new(now(), today(), params(3, 24, false));
        assert!(window.is_throttled(&assignment));
    }

    #[test]
    fn huge_thresholds_and_intervals_do_not_overflow() {
        let mut assignment = assignment_due_in(10_000);
        assignment.last_reminder_sent_at = Some(now() - Duration::days(365 * 50));
        let window = EligibilityWindow::new(now(), today(), params(i64::MAX, i64::MAX, false));
        assert!(window.is_in_window(&assignment));
        assert!(window.is_throttled(&assignment));
    }

    #[test]
    fn selection_is_sorted_most_urgent_first() {
        let window = EligibilityWindow::new(now(), today(), params(3, 24, false));
        let in_two = assignment_due_in(2);
        let overdue = assignment_due_in(-1);
        let today_ = assignment_due_in(0);
        let too_late = assignment_due_in(9);
        let selected = window.select(vec![
            in_two.clone(),
            too_late,
            overdue.clone(),
            today_.clone(),
        ]);
        assert_eq!(selected, vec![overdue, today_, in_two]);
    }

    #[test]
    fn it_resolves_run_params() {
        let stored = ReminderSettings {
            enabled: false,
            threshold_days: 3,
            min_interval_hours: 24,
        };
        let params = ReminderRunParams::resolve(&stored, Some(7), None, false).unwrap();
        assert!(params.is_disabled());
        assert_eq!(params.threshold_days, 7);
        assert_eq!(params.min_interval_hours, 24);
        assert_eq!(params.effective_min_interval_hours(), 24);

        let params = ReminderRunParams::resolve(&stored, None, Some(1), true).unwrap();
        assert!(!params.is_disabled());
        assert_eq!(params.min_interval_hours, 1);
        assert_eq!(params.effective_min_interval_hours(), 0);

        assert_eq!(
            ReminderRunParams::resolve(&stored, Some(-1), None, false),
            Err(InvalidSettingError::NegativeThreshold(-1))
        );
    }

    #[test]
    fn today_follows_the_reminder_timezone() {
        let late_evening_utc = Utc.with_ymd_and_hms(2024, 5, 10, 23, 30, 0).unwrap();
        assert_eq!(local_today(late_evening_utc, chrono_tz::UTC), today());
        assert_eq!(
            local_today(late_evening_utc, chrono_tz::Europe::Oslo),
            NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()
        );
    }
}
