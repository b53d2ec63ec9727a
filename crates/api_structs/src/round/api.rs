use crate::dtos::ReviewRoundDTO;
use chrono::NaiveDate;
use kurator_domain::{ReviewRound, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRoundResponse {
    pub round: ReviewRoundDTO,
}

impl ReviewRoundResponse {
    pub fn new(round: ReviewRound) -> Self {
        Self {
            round: ReviewRoundDTO::new(round),
        }
    }
}

pub mod create_round {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub start_date: NaiveDate,
        #[serde(default)]
        pub end_date: Option<NaiveDate>,
        #[serde(default)]
        pub default_deadline: Option<NaiveDate>,
    }

    pub type APIResponse = ReviewRoundResponse;
}

pub mod get_round {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub round_id: ID,
    }

    pub type APIResponse = ReviewRoundResponse;
}

pub mod transition_round_status {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub round_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// One of `draft`, `active`, `completed` or `archived`
        pub status: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub round: ReviewRoundDTO,
    }

    impl APIResponse {
        pub fn new(round: ReviewRound) -> Self {
            Self {
                success: true,
                round: ReviewRoundDTO::new(round),
            }
        }
    }
}

pub mod bulk_transition_round_status {
    use super::*;
    use kurator_domain::BulkResult;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Kept as raw strings, a malformed id is reported per item
        pub round_ids: Vec<String>,
        pub status: String,
    }

    pub type APIResponse = BulkResult;
}
