use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::{dtos::ReminderSettingsDTO, get_reminder_settings::APIResponse};
use kurator_domain::ReminderSettings;
use kurator_infra::KuratorContext;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::StoreUnavailable => KuratorError::StoreUnavailable,
    }
}

pub async fn get_reminder_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    execute_with_policy(GetReminderSettingsUseCase {}, &policy, &ctx)
        .await
        .map(|settings| {
            let res: APIResponse = ReminderSettingsDTO::new(&settings);
            HttpResponse::Ok().json(res)
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

#[derive(Debug)]
pub struct GetReminderSettingsUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {
    StoreUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderSettingsUseCase {
    type Response = ReminderSettings;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .reminder_settings
            .get()
            .await
            .map_err(|_| UseCaseErrors::StoreUnavailable)
    }
}

impl PermissionBoundary for GetReminderSettingsUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadReminders]
    }
}
