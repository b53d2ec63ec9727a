use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use kurator_api_structs::create_round::{APIResponse, RequestBody};
use kurator_domain::{InvalidRoundError, ReviewRound};
use kurator_infra::KuratorContext;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::InvalidRound(e) => KuratorError::BadClientData(format!(
            "Invalid review round provided. Error message: {}",
            e
        )),
        UseCaseErrors::StoreUnavailable => KuratorError::StoreUnavailable,
    }
}

pub async fn create_round_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateRoundUseCase {
        name: body.name,
        start_date: body.start_date,
        end_date: body.end_date,
        default_deadline: body.default_deadline,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|round| HttpResponse::Created().json(APIResponse::new(round)))
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

#[derive(Debug)]
pub struct CreateRoundUseCase {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub default_deadline: Option<NaiveDate>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidRound(InvalidRoundError),
    StoreUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateRoundUseCase {
    type Response = ReviewRound;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        let round = ReviewRound::new(
            self.name.clone(),
            self.start_date,
            self.end_date,
            self.default_deadline,
        )
        .map_err(UseCaseErrors::InvalidRound)?;

        ctx.repos
            .review_rounds
            .insert(&round)
            .await
            .map(|_| round)
            .map_err(|_| UseCaseErrors::StoreUnavailable)
    }
}

impl PermissionBoundary for CreateRoundUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ManageReviewRounds]
    }
}
