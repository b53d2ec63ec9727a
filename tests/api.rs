mod helpers;

use chrono::{Duration, NaiveDate, Utc};
use helpers::setup::{spawn_app, TestApp};
use kurator_domain::{local_today, ReviewAssignment, Reviewer};
use kurator_sdk::{
    APIErrorVariant, CreateRoundInput, GetUpcomingRemindersInput, KuratorSDK, RoundStatus,
    RunOutcome, RunRemindersInput, UpdateReminderSettingsInput, Urgency, ID,
};

async fn seed_reviewer(app: &TestApp, name: &str, email: &str) -> Reviewer {
    let reviewer = Reviewer::new(name.into(), email.into());
    app.ctx.repos.reviewers.insert(&reviewer).await.unwrap();
    reviewer
}

async fn seed_assignment(app: &TestApp, reviewer: &Reviewer, days: i64) -> ReviewAssignment {
    let today = local_today(Utc::now(), app.ctx.config.reminder_timezone);
    let assignment = ReviewAssignment::new(
        reviewer.id.clone(),
        ID::new(),
        Some(today + Duration::days(days)),
    );
    app.ctx
        .repos
        .review_assignments
        .insert(&assignment)
        .await
        .unwrap();
    assignment
}

async fn create_round(sdk: &KuratorSDK, name: &str) -> ID {
    sdk.round
        .create(CreateRoundInput {
            name: name.into(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            default_deadline: None,
        })
        .await
        .expect("To create round")
        .round
        .id
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_reminder_routes_require_credentials() {
    let (app, _) = spawn_app().await;
    let anonymous = KuratorSDK::new(app.address.clone(), "");
    let res = anonymous.reminder.get_settings().await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Unauthorized);

    let wrong_token = KuratorSDK::with_token(app.address.clone(), "not-a-jwt");
    let res = wrong_token.reminder.run(RunRemindersInput::default()).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Unauthorized);
}

#[actix_web::main]
#[test]
async fn test_reminder_settings_roundtrip() {
    let (_, sdk) = spawn_app().await;
    let settings = sdk.reminder.get_settings().await.unwrap();
    assert!(settings.enabled);
    assert_eq!(settings.threshold_days, 3);
    assert_eq!(settings.min_interval_hours, 24);

    let updated = sdk
        .reminder
        .update_settings(UpdateReminderSettingsInput {
            threshold_days: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.threshold_days, 5);
    assert_eq!(updated.min_interval_hours, 24);
    assert!(updated.enabled);

    let res = sdk
        .reminder
        .update_settings(UpdateReminderSettingsInput {
            enabled: Some(false),
            min_interval_hours: Some(-1),
            ..Default::default()
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);

    // Rejected update left everything untouched
    let settings = sdk.reminder.get_settings().await.unwrap();
    assert!(settings.enabled);
    assert_eq!(settings.threshold_days, 5);
}

#[actix_web::main]
#[test]
async fn test_run_sends_one_reminder_per_reviewer_and_throttles() {
    let (app, sdk) = spawn_app().await;
    let ada = seed_reviewer(&app, "Ada", "ada@example.com").await;
    let bob = seed_reviewer(&app, "Bob", "bob@example.com").await;
    seed_assignment(&app, &ada, -1).await;
    seed_assignment(&app, &ada, 2).await;
    seed_assignment(&app, &bob, 1).await;
    // Outside the default window
    seed_assignment(&app, &bob, 10).await;

    let upcoming = sdk
        .reminder
        .upcoming(GetUpcomingRemindersInput::default())
        .await
        .unwrap();
    assert!(upcoming.enabled);
    assert_eq!(upcoming.reminders.len(), 2);
    assert_eq!(upcoming.reminders[0].reviewer_id, ada.id);
    assert_eq!(upcoming.reminders[0].urgency, Urgency::Urgent);
    assert_eq!(upcoming.reminders[0].items.len(), 2);
    assert_eq!(
        upcoming.reminders[0].recipient.as_deref(),
        Some("ada@example.com")
    );
    // Previewing sends nothing
    assert!(app.mail.sent().is_empty());

    let res = sdk.reminder.run(RunRemindersInput::default()).await.unwrap();
    assert!(res.success);
    assert_eq!(res.reviews_processed, 3);
    assert_eq!(res.reviewers_notified, 2);
    assert_eq!(res.emails_sent, 2);
    assert_eq!(res.emails_failed, 0);
    assert_eq!(res.settings.threshold_days, 3);

    let sent = app.mail.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].subject.starts_with("[Urgent]"));

    // Everything was reminded just now
    let res = sdk.reminder.run(RunRemindersInput::default()).await.unwrap();
    assert_eq!(res.emails_sent, 0);
    assert_eq!(res.reviews_processed, 0);

    let res = sdk
        .reminder
        .run(RunRemindersInput {
            force: true,
            threshold_days: Some(30),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(res.reviews_processed, 4);
    assert_eq!(res.emails_sent, 2);
    assert_eq!(res.settings.threshold_days, 30);

    let runs = sdk.reminder.runs(None).await.unwrap().runs;
    assert_eq!(runs.len(), 3);
    assert!(runs[0].forced);
    assert_eq!(runs[0].outcome, RunOutcome::Evaluated);
    assert_eq!(runs[0].reviews_processed, 4);
}

#[actix_web::main]
#[test]
async fn test_disabled_reminders_only_run_when_forced() {
    let (app, sdk) = spawn_app().await;
    let ada = seed_reviewer(&app, "Ada", "ada@example.com").await;
    seed_assignment(&app, &ada, 0).await;

    sdk.reminder
        .update_settings(UpdateReminderSettingsInput {
            enabled: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    let res = sdk.reminder.run(RunRemindersInput::default()).await.unwrap();
    assert!(res.success);
    assert_eq!(res.emails_sent, 0);
    assert!(app.mail.sent().is_empty());

    let upcoming = sdk
        .reminder
        .upcoming(GetUpcomingRemindersInput::default())
        .await
        .unwrap();
    assert!(!upcoming.enabled);
    assert!(upcoming.reminders.is_empty());

    let res = sdk
        .reminder
        .run(RunRemindersInput {
            force: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(res.emails_sent, 1);
    assert_eq!(app.mail.sent()[0].to_address, "ada@example.com");

    let runs = sdk.reminder.runs(Some(1)).await.unwrap().runs;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].emails_sent, 1);

    let res = sdk.reminder.runs(Some(0)).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);
}

#[actix_web::main]
#[test]
async fn test_failed_delivery_is_counted_and_retried() {
    let (app, sdk) = spawn_app().await;
    let ada = seed_reviewer(&app, "Ada", "ada@example.com").await;
    let bob = seed_reviewer(&app, "Bob", "bob@example.com").await;
    seed_assignment(&app, &ada, 1).await;
    let bobs = seed_assignment(&app, &bob, 1).await;
    app.mail.fail_for("bob@example.com");

    let res = sdk.reminder.run(RunRemindersInput::default()).await.unwrap();
    assert!(res.success);
    assert_eq!(res.emails_sent, 1);
    assert_eq!(res.emails_failed, 1);
    assert_eq!(res.reviewers_notified, 1);

    let assignment = app
        .ctx
        .repos
        .review_assignments
        .find(&bobs.id)
        .await
        .unwrap()
        .unwrap();
    assert!(assignment.last_reminder_sent_at.is_none());

    // Bob is still eligible on the next run
    let upcoming = sdk
        .reminder
        .upcoming(GetUpcomingRemindersInput::default())
        .await
        .unwrap();
    assert_eq!(upcoming.reminders.len(), 1);
    assert_eq!(upcoming.reminders[0].reviewer_id, bob.id);
}

#[actix_web::main]
#[test]
async fn test_round_lifecycle() {
    let (_, sdk) = spawn_app().await;
    let round_id = create_round(&sdk, "Autumn").await;

    let round = sdk.round.get(&round_id).await.unwrap().round;
    assert_eq!(round.status, RoundStatus::Draft);
    assert_eq!(round.name, "Autumn");

    let res = sdk
        .round
        .transition(&round_id, RoundStatus::Active)
        .await
        .unwrap();
    assert!(res.success);
    assert_eq!(res.round.status, RoundStatus::Active);

    let res = sdk.round.transition_raw(&round_id, "finished").await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);

    let res = sdk.round.transition(&ID::new(), RoundStatus::Completed).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);

    let res = sdk.round.get(&ID::new()).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);
}

#[actix_web::main]
#[test]
async fn test_bulk_archive_reports_every_id() {
    let (_, sdk) = spawn_app().await;
    let r1 = create_round(&sdk, "Spring").await;
    let r3 = create_round(&sdk, "Summer").await;
    let missing = ID::new().to_string();

    let res = sdk
        .round
        .archive(vec![r1.to_string(), missing.clone(), r3.to_string()])
        .await
        .unwrap();
    assert_eq!(res.succeeded, vec![r1.to_string(), r3.to_string()]);
    assert_eq!(res.failed.len(), 1);
    assert_eq!(res.failed[0].id, missing);
    assert_eq!(res.failed[0].reason, "NotFound");

    for id in [r1, r3] {
        let round = sdk.round.get(&id).await.unwrap().round;
        assert_eq!(round.status, RoundStatus::Archived);
    }

    let res = sdk
        .round
        .bulk_transition(vec!["not-an-id".into()], "active")
        .await
        .unwrap();
    assert!(res.succeeded.is_empty());
    assert_eq!(res.failed[0].id, "not-an-id");

    let res = sdk.round.bulk_transition(vec![], "deleted").await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);
}
