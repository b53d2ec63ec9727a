use super::{
    dispatcher::dispatch,
    eligibility::{resolve_run_params, select_eligible, ResolveParamsError, Selection},
    ledger::record_run,
};
use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::{
    dtos::RunSettingsDTO,
    run_reminder_pass::{APIResponse, RequestBody},
};
use kurator_domain::{
    group_by_reviewer, DispatchCounts, DispatchLogEntry, InvalidSettingError, ReminderRunParams,
    RunOutcome,
};
use kurator_infra::KuratorContext;
use tracing::info;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::InvalidSetting(e) => KuratorError::BadClientData(format!(
            "Invalid reminder run overrides provided. Error message: {}",
            e
        )),
        UseCaseErrors::StoreUnavailable => KuratorError::StoreUnavailable,
    }
}

pub async fn run_reminder_pass_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = RunReminderPassUseCase {
        force: body.force,
        threshold_days: body.threshold_days,
        min_interval_hours: body.min_interval_hours,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|summary| {
            let counts = summary.entry.counts;
            HttpResponse::Ok().json(APIResponse {
                success: true,
                message: summary.message,
                reviews_processed: counts.reviews_processed,
                reviewers_notified: counts.reviewers_notified,
                emails_sent: counts.emails_sent,
                emails_failed: counts.emails_failed,
                settings: RunSettingsDTO::new(&summary.params),
            })
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

pub const DISABLED_MESSAGE: &str = "Reminders are disabled";
pub const NOTHING_TO_SEND_MESSAGE: &str = "No reminders needed";

/// Evaluates eligibility, sends the consolidated reminders and records the run.
/// Used both by administrators and by the daily reminder job.
#[derive(Debug)]
pub struct RunReminderPassUseCase {
    pub force: bool,
    pub threshold_days: Option<i64>,
    pub min_interval_hours: Option<i64>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub message: String,
    pub params: ReminderRunParams,
    pub entry: DispatchLogEntry,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidSetting(InvalidSettingError),
    StoreUnavailable,
}

impl From<ResolveParamsError> for UseCaseErrors {
    fn from(e: ResolveParamsError) -> Self {
        match e {
            ResolveParamsError::InvalidSetting(e) => Self::InvalidSetting(e),
            ResolveParamsError::StoreUnavailable => Self::StoreUnavailable,
        }
    }
}

fn summary_message(counts: &DispatchCounts) -> String {
    let mut message = format!(
        "Sent {} reminder email(s) to {} reviewer(s) covering {} review(s)",
        counts.emails_sent, counts.reviewers_notified, counts.reviews_processed
    );
    if counts.emails_failed > 0 {
        message.push_str(&format!(", {} email(s) failed", counts.emails_failed));
    }
    message
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunReminderPassUseCase {
    type Response = RunSummary;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &KuratorContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now();
        let params =
            resolve_run_params(ctx, self.threshold_days, self.min_interval_hours, self.force)
                .await?;

        let (today, eligible) = match select_eligible(ctx, &params, now)
            .await
            .map_err(|_| UseCaseErrors::StoreUnavailable)?
        {
            Selection::Disabled => {
                info!("Reminders are disabled, skipping reminder run");
                let entry = DispatchLogEntry::new(
                    now,
                    &params,
                    RunOutcome::Disabled,
                    DispatchCounts::default(),
                );
                return Ok(RunSummary {
                    message: DISABLED_MESSAGE.into(),
                    params,
                    entry: record_run(ctx, entry).await,
                });
            }
            Selection::Eligible { today, assignments } => (today, assignments),
        };

        if eligible.is_empty() {
            let entry = DispatchLogEntry::new(
                now,
                &params,
                RunOutcome::Evaluated,
                DispatchCounts::default(),
            );
            return Ok(RunSummary {
                message: NOTHING_TO_SEND_MESSAGE.into(),
                params,
                entry: record_run(ctx, entry).await,
            });
        }

        let reviews_processed = eligible.len() as i64;
        let digests = group_by_reviewer(eligible, today);
        let outcome = dispatch(ctx, &digests, now)
            .await
            .map_err(|_| UseCaseErrors::StoreUnavailable)?;

        let counts = DispatchCounts {
            reviews_processed,
            reviewers_notified: outcome.notified_reviewer_ids.len() as i64,
            emails_sent: outcome.sent,
            emails_failed: outcome.failed,
        };
        let entry = DispatchLogEntry::new(now, &params, RunOutcome::Evaluated, counts);

        Ok(RunSummary {
            message: summary_message(&counts),
            params,
            entry: record_run(ctx, entry).await,
        })
    }
}

impl PermissionBoundary for RunReminderPassUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::RunReminders]
    }
}
