use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::{
    dtos::DispatchLogEntryDTO,
    get_dispatch_log::{APIResponse, QueryParams},
};
use kurator_domain::DispatchLogEntry;
use kurator_infra::KuratorContext;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::InvalidLimit(limit) => KuratorError::BadClientData(format!(
            "Invalid limit: {}, must be between 1 and {}",
            limit, MAX_LIMIT
        )),
        UseCaseErrors::StoreUnavailable => KuratorError::StoreUnavailable,
    }
}

pub async fn get_dispatch_log_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    query: web::Query<QueryParams>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let usecase = GetDispatchLogUseCase {
        limit: query.limit.unwrap_or(DEFAULT_LIMIT),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|runs| {
            HttpResponse::Ok().json(APIResponse {
                runs: runs.into_iter().map(DispatchLogEntryDTO::new).collect(),
            })
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

#[derive(Debug)]
pub struct GetDispatchLogUseCase {
    pub limit: i64,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidLimit(i64),
    StoreUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDispatchLogUseCase {
    type Response = Vec<DispatchLogEntry>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(UseCaseErrors::InvalidLimit(self.limit));
        }

        ctx.repos
            .dispatch_log
            .find_recent(self.limit)
            .await
            .map_err(|_| UseCaseErrors::StoreUnavailable)
    }
}

impl PermissionBoundary for GetDispatchLogUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadReminders]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn it_rejects_out_of_range_limits() {
        let ctx = KuratorContext::create_inmemory();
        for limit in [0, -3, MAX_LIMIT + 1] {
            let mut usecase = GetDispatchLogUseCase { limit };
            assert!(matches!(
                usecase.execute(&ctx).await,
                Err(UseCaseErrors::InvalidLimit(_))
            ));
        }

        let mut usecase = GetDispatchLogUseCase { limit: 5 };
        assert!(usecase.execute(&ctx).await.unwrap().is_empty());
    }
}
