use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::{
    dtos::ReminderSettingsDTO,
    update_reminder_settings::{APIResponse, RequestBody},
};
use kurator_domain::{InvalidSettingError, ReminderSettings, ReminderSettingsPatch};
use kurator_infra::KuratorContext;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::InvalidSetting(e) => KuratorError::BadClientData(format!(
            "Invalid reminder settings provided. Error message: {}",
            e
        )),
        UseCaseErrors::StoreUnavailable => KuratorError::StoreUnavailable,
    }
}

pub async fn update_reminder_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateReminderSettingsUseCase {
        patch: ReminderSettingsPatch {
            enabled: body.enabled,
            threshold_days: body.threshold_days,
            min_interval_hours: body.min_interval_hours,
        },
    };

    execute_with_policy(usecase, &policy, &ctx)
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
pub struct UpdateReminderSettingsUseCase {
    pub patch: ReminderSettingsPatch,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidSetting(InvalidSettingError),
    StoreUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderSettingsUseCase {
    type Response = ReminderSettings;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        self.patch.validate().map_err(UseCaseErrors::InvalidSetting)?;

        ctx.repos
            .reminder_settings
            .update(&self.patch)
            .await
            .map_err(|_| UseCaseErrors::StoreUnavailable)
    }
}

impl PermissionBoundary for UpdateReminderSettingsUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ManageReminderSettings]
    }
}
