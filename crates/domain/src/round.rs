use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Lifecycle status of a `ReviewRound`.
///
/// Rounds are created as `Draft` and are moved forward by administrators.
/// `Archived` replaces deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    /// Round status is administrator-directed, so every target is reachable
    /// from every status, including backwards moves.
    /// A stricter lifecycle would restrict this relation.
    pub fn can_transition_to(&self, _target: RoundStatus) -> bool {
        true
    }
}

impl Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid round status: `{0}`, must be one of draft, active, completed or archived")]
pub struct InvalidRoundStatusError(pub String);

impl FromStr for RoundStatus {
    type Err = InvalidRoundStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(InvalidRoundStatusError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidRoundError {
    #[error("A review round needs a non empty name")]
    EmptyName,
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("Transition from {from} to {to} is not allowed")]
    ForbiddenTransition { from: RoundStatus, to: RoundStatus },
}

/// An administrator defined review cycle grouping many `ReviewAssignment`s
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRound {
    pub id: ID,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Deadline proposed for assignments created within this round
    pub default_deadline: Option<NaiveDate>,
    pub status: RoundStatus,
}

impl ReviewRound {
    pub fn new(
        name: String,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        default_deadline: Option<NaiveDate>,
    ) -> Result<Self, InvalidRoundError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(InvalidRoundError::EmptyName);
        }
        if let Some(end) = end_date {
            if end < start_date {
                return Err(InvalidRoundError::EndBeforeStart {
                    start: start_date,
                    end,
                });
            }
        }

        Ok(Self {
            id: Default::default(),
            name,
            start_date,
            end_date,
            default_deadline,
            status: RoundStatus::Draft,
        })
    }

    pub fn transition(&mut self, target: RoundStatus) -> Result<(), InvalidRoundError> {
        if !self.status.can_transition_to(target) {
            return Err(InvalidRoundError::ForbiddenTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }
}

impl Entity for ReviewRound {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn it_creates_draft_rounds() {
        let round = ReviewRound::new(" Spring ".into(), date(2024, 3, 1), None, None).unwrap();
        assert_eq!(round.status, RoundStatus::Draft);
        assert_eq!(round.name, "Spring");
    }

    #[test]
    fn it_rejects_invalid_rounds() {
        assert_eq!(
            ReviewRound::new("  ".into(), date(2024, 3, 1), None, None),
            Err(InvalidRoundError::EmptyName)
        );
        assert!(matches!(
            ReviewRound::new("Q1".into(), date(2024, 3, 1), Some(date(2024, 2, 1)), None),
            Err(InvalidRoundError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn it_parses_status() {
        assert_eq!("archived".parse(), Ok(RoundStatus::Archived));
        assert!("in_progress".parse::<RoundStatus>().is_err());
        assert!("Active".parse::<RoundStatus>().is_err());
        assert_eq!(RoundStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn transitions_are_permissive() {
        let mut round = ReviewRound::new("Q1".into(), date(2024, 1, 1), None, None).unwrap();
        for target in [
            RoundStatus::Active,
            RoundStatus::Completed,
            RoundStatus::Draft,
            RoundStatus::Archived,
            RoundStatus::Active,
        ] {
            assert!(round.transition(target).is_ok());
            assert_eq!(round.status, target);
        }
    }
}
