use super::{
    dispatcher::find_reviewers,
    eligibility::{resolve_run_params, select_eligible, ResolveParamsError, Selection},
};
use crate::error::KuratorError;
use crate::shared::{
    auth::{protect_admin_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use kurator_api_structs::{
    dtos::{RunSettingsDTO, UpcomingReminderDTO},
    get_upcoming_reminders::{APIResponse, QueryParams},
};
use kurator_domain::{
    group_by_reviewer, InvalidSettingError, ReminderRunParams, Reviewer, ReviewerDigest,
};
use kurator_infra::KuratorContext;

fn handle_errors(e: UseCaseErrors) -> KuratorError {
    match e {
        UseCaseErrors::InvalidSetting(e) => KuratorError::BadClientData(format!(
            "Invalid reminder overrides provided. Error message: {}",
            e
        )),
        UseCaseErrors::StoreUnavailable => KuratorError::StoreUnavailable,
    }
}

pub async fn get_upcoming_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<KuratorContext>,
    query: web::Query<QueryParams>,
) -> Result<HttpResponse, KuratorError> {
    let policy = protect_admin_route(&http_req, &ctx)?;

    let query = query.0;
    let usecase = GetUpcomingRemindersUseCase {
        force: query.force.unwrap_or(false),
        threshold_days: query.threshold_days,
        min_interval_hours: query.min_interval_hours,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|upcoming| {
            HttpResponse::Ok().json(APIResponse {
                enabled: upcoming.enabled,
                reminders: upcoming
                    .reminders
                    .iter()
                    .map(|(digest, reviewer)| {
                        UpcomingReminderDTO::new(digest, reviewer.as_ref().map(|r| r.email.clone()))
                    })
                    .collect(),
                settings: RunSettingsDTO::new(&upcoming.params),
            })
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unauthorized(e) => KuratorError::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => handle_errors(e),
        })
}

/// Dry run of a reminder pass: what would be sent now, without sending or
/// marking anything.
#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {
    pub force: bool,
    pub threshold_days: Option<i64>,
    pub min_interval_hours: Option<i64>,
}

#[derive(Debug)]
pub struct UpcomingReminders {
    pub enabled: bool,
    pub params: ReminderRunParams,
    pub reminders: Vec<(ReviewerDigest, Option<Reviewer>)>,
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

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = UpcomingReminders;

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
                return Ok(UpcomingReminders {
                    enabled: false,
                    params,
                    reminders: Vec::new(),
                })
            }
            Selection::Eligible { today, assignments } => (today, assignments),
        };

        let digests = group_by_reviewer(eligible, today);
        let mut reviewers = find_reviewers(ctx, &digests)
            .await
            .map_err(|_| UseCaseErrors::StoreUnavailable)?;
        let reminders = digests
            .into_iter()
            .map(|digest| {
                let reviewer = reviewers.remove(&digest.reviewer_id);
                (digest, reviewer)
            })
            .collect();

        Ok(UpcomingReminders {
            enabled: true,
            params,
            reminders,
        })
    }
}

impl PermissionBoundary for GetUpcomingRemindersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadReminders]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use kurator_domain::{ReviewAssignment, Urgency, ID};
    use kurator_infra::{FixedSys, InMemoryMailTransport};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn it_previews_without_sending_or_marking() {
        let mut ctx = KuratorContext::create_inmemory();
        let mail = Arc::new(InMemoryMailTransport::new());
        ctx.mail = mail.clone();
        ctx.sys = Arc::new(FixedSys(now()));
        ctx.config.reminder_timezone = chrono_tz::UTC;

        let ada = Reviewer::new("Ada".into(), "ada@example.com".into());
        ctx.repos.reviewers.insert(&ada).await.unwrap();
        let assignment = ReviewAssignment::new(
            ada.id.clone(),
            ID::new(),
            Some(now().date_naive() + Duration::days(1)),
        );
        ctx.repos
            .review_assignments
            .insert(&assignment)
            .await
            .unwrap();
        let orphan = ReviewAssignment::new(
            ID::new(),
            ID::new(),
            Some(now().date_naive() - Duration::days(2)),
        );
        ctx.repos.review_assignments.insert(&orphan).await.unwrap();

        let mut usecase = GetUpcomingRemindersUseCase {
            force: false,
            threshold_days: None,
            min_interval_hours: None,
        };
        let upcoming = usecase.execute(&ctx).await.unwrap();
        assert!(upcoming.enabled);
        assert_eq!(upcoming.reminders.len(), 2);

        let (digest, reviewer) = &upcoming.reminders[0];
        assert_eq!(digest.urgency(), Urgency::Urgent);
        assert!(reviewer.is_none());
        let (digest, reviewer) = &upcoming.reminders[1];
        assert_eq!(digest.urgency(), Urgency::DueSoon);
        assert_eq!(reviewer.as_ref(), Some(&ada));

        assert!(mail.sent().is_empty());
        let assignment = ctx
            .repos
            .review_assignments
            .find(&assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert!(assignment.last_reminder_sent_at.is_none());
        assert!(ctx.repos.dispatch_log.find_recent(10).await.unwrap().is_empty());
    }
}
