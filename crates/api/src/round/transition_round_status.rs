use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::transition_round_status::{APIResponse, PathParams, RequestBody};
use kurator_domain::{InvalidRoundError, InvalidRoundStatusError, ReviewRound, RoundStatus, ID};
use kurator_infra::KuratorContext;
use thiserror::Error;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::InvalidStatus(e) => KuratorError::BadClientData(e.to_string()),
        UseCaseErrors::Transition(TransitionError::NotFound) => {
            KuratorError::NotFound("The review round was not found.".into())
        }
        UseCaseErrors::Transition(TransitionError::Forbidden(e)) => {
            KuratorError::BadClientData(e.to_string())
        }
        UseCaseErrors::Transition(TransitionError::StoreUnavailable) => {
            KuratorError::StoreUnavailable
        }
    }
}

pub async fn transition_round_status_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let usecase = TransitionRoundStatusUseCase {
        round_id: path.round_id.clone(),
        status: body.0.status,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|round| HttpResponse::Ok().json(APIResponse::new(round)))
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

/// Failure of a single round transition. The `Display` output is the failure
/// reason reported per item by bulk transitions.
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("NotFound")]
    NotFound,
    #[error("InvalidTransition")]
    Forbidden(InvalidRoundError),
    #[error("StoreUnavailable")]
    StoreUnavailable,
}

/// Moves the round to `target` in one atomic write. Assignments of the round
/// are left untouched.
pub async fn transition_round(
    ctx: &KuratorContext,
    round_id: &ID,
    target: RoundStatus,
) -> Result<ReviewRound, TransitionError> {
    let mut round = match ctx.repos.review_rounds.find(round_id).await {
        Ok(Some(round)) => round,
        Ok(None) => return Err(TransitionError::NotFound),
        Err(_) => return Err(TransitionError::StoreUnavailable),
    };
    round.transition(target).map_err(TransitionError::Forbidden)?;

    match ctx
        .repos
        .review_rounds
        .update_status(round_id, round.status)
        .await
    {
        Ok(Some(round)) => Ok(round),
        Ok(None) => Err(TransitionError::NotFound),
        Err(_) => Err(TransitionError::StoreUnavailable),
    }
}

#[derive(Debug)]
pub struct TransitionRoundStatusUseCase {
    pub round_id: ID,
    pub status: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidStatus(InvalidRoundStatusError),
    Transition(TransitionError),
}

#[async_trait::async_trait(?Send)]
impl UseCase for TransitionRoundStatusUseCase {
    type Response = ReviewRound;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        let target = self
            .status
            .parse::<RoundStatus>()
            .map_err(UseCaseErrors::InvalidStatus)?;

        transition_round(ctx, &self.round_id, target)
            .await
            .map_err(UseCaseErrors::Transition)
    }
}

impl PermissionBoundary for TransitionRoundStatusUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ManageReviewRounds]
    }
}
