use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::get_round::{APIResponse, PathParams};
use kurator_domain::{ReviewRound, ID};
use kurator_infra::KuratorContext;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::NotFound(round_id) => KuratorError::NotFound(format!(
            "The review round with id: {}, was not found.",
            round_id
        )),
        UseCaseErrors::StoreUnavailable => KuratorError::StoreUnavailable,
    }
}

pub async fn get_round_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let usecase = GetRoundUseCase {
        round_id: path.round_id.clone(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|round| HttpResponse::Ok().json(APIResponse::new(round)))
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

#[derive(Debug)]
pub struct GetRoundUseCase {
    pub round_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    StoreUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRoundUseCase {
    type Response = ReviewRound;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.review_rounds.find(&self.round_id).await {
            Ok(Some(round)) => Ok(round),
            Ok(None) => Err(UseCaseErrors::NotFound(self.round_id.clone())),
            Err(_) => Err(UseCaseErrors::StoreUnavailable),
        }
    }
}

impl PermissionBoundary for GetRoundUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ManageReviewRounds]
    }
}
