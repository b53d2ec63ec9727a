use chrono::NaiveDate;
use kurator_domain::{ReviewRound, RoundStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRoundDTO {
    pub id: ID,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub default_deadline: Option<NaiveDate>,
    pub status: RoundStatus,
}

impl ReviewRoundDTO {
    pub fn new(round: ReviewRound) -> Self {
        Self {
            id: round.id,
            name: round.name,
            start_date: round.start_date,
            end_date: round.end_date,
            default_deadline: round.default_deadline,
            status: round.status,
        }
    }
}
