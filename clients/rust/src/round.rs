use crate::base::{APIResponse, BaseClient};
use chrono::NaiveDate;
use kurator_api_structs::*;
use kurator_domain::{RoundStatus, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct RoundClient {
    base: Arc<BaseClient>,
}

#[derive(Debug)]
pub struct CreateRoundInput {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub default_deadline: Option<NaiveDate>,
}

impl RoundClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateRoundInput) -> APIResponse<create_round::APIResponse> {
        let body = create_round::RequestBody {
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            default_deadline: input.default_deadline,
        };
        self.base
            .post(body, "rounds".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, round_id: &ID) -> APIResponse<get_round::APIResponse> {
        self.base
            .get(format!("rounds/{}", round_id), StatusCode::OK)
            .await
    }

    pub async fn transition(
        &self,
        round_id: &ID,
        status: RoundStatus,
    ) -> APIResponse<transition_round_status::APIResponse> {
        self.transition_raw(round_id, status.as_str()).await
    }

    /// Like `transition`, but sends the status exactly as given
    pub async fn transition_raw(
        &self,
        round_id: &ID,
        status: &str,
    ) -> APIResponse<transition_round_status::APIResponse> {
        let body = transition_round_status::RequestBody {
            status: status.to_string(),
        };
        self.base
            .put(body, format!("rounds/{}/status", round_id), StatusCode::OK)
            .await
    }

    /// Ids are sent as given, so unknown or malformed ids are reported per item
    pub async fn bulk_transition(
        &self,
        round_ids: Vec<String>,
        status: &str,
    ) -> APIResponse<bulk_transition_round_status::APIResponse> {
        let body = bulk_transition_round_status::RequestBody {
            round_ids,
            status: status.to_string(),
        };
        self.base
            .post(body, "rounds/status".into(), StatusCode::OK)
            .await
    }

    pub async fn archive(
        &self,
        round_ids: Vec<String>,
    ) -> APIResponse<bulk_transition_round_status::APIResponse> {
        self.bulk_transition(round_ids, RoundStatus::Archived.as_str())
            .await
    }
}
