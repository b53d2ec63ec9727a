use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_THRESHOLD_DAYS: i64 = 3;
pub const DEFAULT_MIN_INTERVAL_HOURS: i64 = 24;

/// Process wide reminder configuration. Exactly one logical instance exists
/// and it is seeded with the defaults on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub enabled: bool,
    /// Assignments with a deadline at most this many days ahead are reminded
    pub threshold_days: i64,
    /// Minimum time between two reminders for the same assignment
    pub min_interval_hours: i64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            min_interval_hours: DEFAULT_MIN_INTERVAL_HOURS,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidSettingError {
    #[error("threshold_days must be zero or positive, got {0}")]
    NegativeThreshold(i64),
    #[error("min_interval_hours must be zero or positive, got {0}")]
    NegativeInterval(i64),
}

/// Partial update of `ReminderSettings`. Absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReminderSettingsPatch {
    pub enabled: Option<bool>,
    pub threshold_days: Option<i64>,
    pub min_interval_hours: Option<i64>,
}

impl ReminderSettingsPatch {
    pub fn validate(&self) -> Result<(), InvalidSettingError> {
        if let Some(days) = self.threshold_days {
            validate_threshold_days(days)?;
        }
        if let Some(hours) = self.min_interval_hours {
            validate_min_interval_hours(hours)?;
        }
        Ok(())
    }
}

impl ReminderSettings {
    /// Applies the provided fields of `patch`, rejecting it as a whole if any
    /// value is out of range.
    pub fn apply(&mut self, patch: &ReminderSettingsPatch) -> Result<(), InvalidSettingError> {
        patch.validate()?;
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(days) = patch.threshold_days {
            self.threshold_days = days;
        }
        if let Some(hours) = patch.min_interval_hours {
            self.min_interval_hours = hours;
        }
        Ok(())
    }
}

pub fn validate_threshold_days(days: i64) -> Result<i64, InvalidSettingError> {
    if days < 0 {
        return Err(InvalidSettingError::NegativeThreshold(days));
    }
    Ok(days)
}

pub fn validate_min_interval_hours(hours: i64) -> Result<i64, InvalidSettingError> {
    if hours < 0 {
        return Err(InvalidSettingError::NegativeInterval(hours));
    }
    Ok(hours)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_seeds_defaults() {
        let settings = ReminderSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.threshold_days, 3);
        assert_eq!(settings.min_interval_hours, 24);
    }

    #[test]
    fn it_applies_only_provided_fields() {
        let mut settings = ReminderSettings::default();
        let patch = ReminderSettingsPatch {
            threshold_days: Some(5),
            ..Default::default()
        };
        settings.apply(&patch).unwrap();
        assert_eq!(
            settings,
            ReminderSettings {
                enabled: true,
                threshold_days: 5,
                min_interval_hours: 24,
            }
        );
    }

    #[test]
    fn it_rejects_negative_values_without_partial_application() {
        let mut settings = ReminderSettings::default();
        let patch = ReminderSettingsPatch {
            enabled: Some(false),
            threshold_days: Some(2),
            min_interval_hours: Some(-1),
        };
        assert_eq!(
            settings.apply(&patch),
            Err(InvalidSettingError::NegativeInterval(-1))
        );
        assert_eq!(settings, ReminderSettings::default());

        let patch = ReminderSettingsPatch {
            threshold_days: Some(-3),
            ..Default::default()
        };
        assert_eq!(
            patch.validate(),
            Err(InvalidSettingError::NegativeThreshold(-3))
        );
    }

    #[test]
    fn zero_is_a_valid_value() {
        let mut settings = ReminderSettings::default();
        let patch = ReminderSettingsPatch {
            enabled: None,
            threshold_days: Some(0),
            min_interval_hours: Some(0),
        };
        assert!(settings.apply(&patch).is_ok());
        assert_eq!(settings.threshold_days, 0);
        assert_eq!(settings.min_interval_hours, 0);
    }
}
