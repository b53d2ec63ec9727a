use super::transition_round_status::{transition_round, TransitionError};
use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    bulk::apply_all,
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::bulk_transition_round_status::{APIResponse, RequestBody};
use kurator_domain::{BulkResult, InvalidRoundStatusError, RoundStatus, ID};
use kurator_infra::KuratorContext;
use tracing::info;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::InvalidStatus(e) => KuratorError::BadClientData(e.to_string()),
    }
}

pub async fn bulk_transition_round_status_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = BulkTransitionRoundStatusUseCase {
        round_ids: body.round_ids,
        status: body.status,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| {
            let res: APIResponse = res;
            HttpResponse::Ok().json(res)
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

/// Moves every given round to the same status. Archiving rounds is a bulk
/// transition to `archived`.
#[derive(Debug)]
pub struct BulkTransitionRoundStatusUseCase {
    pub round_ids: Vec<String>,
    pub status: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidStatus(InvalidRoundStatusError),
}

#[async_trait::async_trait(?Send)]
impl UseCase for BulkTransitionRoundStatusUseCase {
    type Response = BulkResult;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        let target = self
            .status
            .parse::<RoundStatus>()
            .map_err(UseCaseErrors::InvalidStatus)?;

        let round_ids = std::mem::take(&mut self.round_ids);
        let res = apply_all(round_ids, |round_id| async move {
            // A malformed id can not name an existing round
            let round_id = round_id
                .parse::<ID>()
                .map_err(|_| TransitionError::NotFound)?;
            transition_round(ctx, &round_id, target).await.map(|_| ())
        })
        .await;

        info!(
            "Bulk transition to {}: {} succeeded, {} failed",
            target,
            res.succeeded.len(),
            res.failed.len()
        );
        Ok(res)
    }
}

impl PermissionBoundary for BulkTransitionRoundStatusUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ManageReviewRounds]
    }
}
