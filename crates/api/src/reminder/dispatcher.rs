use super::ledger::mark_sent;
use chrono::{DateTime, Utc};
use kurator_domain::{Reviewer, ReviewerDigest, ID};
use kurator_infra::KuratorContext;
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Default, PartialEq)]
pub struct DispatchOutcome {
    pub sent: i64,
    pub failed: i64,
    pub notified_reviewer_ids: Vec<ID>,
}

/// Loads the reviewer records of the given digests, keyed by reviewer id
pub async fn find_reviewers(
    ctx: &KuratorContext,
    digests: &[ReviewerDigest],
) -> anyhow::Result<HashMap<ID, Reviewer>> {
    let reviewer_ids = digests
        .iter()
        .map(|d| d.reviewer_id.clone())
        .collect::<Vec<_>>();
    let reviewers = ctx.repos.reviewers.find_many(&reviewer_ids).await?;

    Ok(reviewers
        .into_iter()
        .map(|reviewer| (reviewer.id.clone(), reviewer))
        .collect())
}

/// Sends one consolidated reminder per digest.
///
/// Digests are processed one at a time: send, then mark the reviewer's
/// assignments as reminded at `now`. A failed send or an unknown reviewer
/// counts as a failed email and marks nothing.
pub async fn dispatch(
    ctx: &KuratorContext,
    digests: &[ReviewerDigest],
    now: DateTime<Utc>,
) -> anyhow::Result<DispatchOutcome> {
    let reviewers = find_reviewers(ctx, digests).await?;
    let mut outcome = DispatchOutcome::default();

    for digest in digests {
        let reviewer = match reviewers.get(&digest.reviewer_id) {
            Some(reviewer) => reviewer,
            None => {
                warn!(
                    "Unable to find reviewer: {} for {} eligible assignment(s), skipping",
                    digest.reviewer_id,
                    digest.items.len()
                );
                outcome.failed += 1;
                continue;
            }
        };

        let message = digest.compose(reviewer);
        match ctx.mail.send(&message).await {
            Ok(()) => {
                outcome.sent += 1;
                outcome.notified_reviewer_ids.push(digest.reviewer_id.clone());
                let updated = mark_sent(ctx, &digest.assignment_ids(), now).await;
                info!(
                    "Sent reminder to reviewer: {} covering {} assignment(s), {} marked",
                    digest.reviewer_id,
                    digest.items.len(),
                    updated
                );
            }
            Err(e) => {
                warn!(
                    "Unable to send reminder to reviewer: {}. Error: {:?}",
                    digest.reviewer_id, e
                );
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};
    use kurator_domain::{group_by_reviewer, ReviewAssignment};
    use kurator_infra::InMemoryMailTransport;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()
    }

    async fn setup_reviewer(ctx: &KuratorContext, name: &str) -> Reviewer {
        let reviewer = Reviewer::new(name.into(), format!("{}@example.com", name));
        ctx.repos.reviewers.insert(&reviewer).await.unwrap();
        reviewer
    }

    async fn setup_assignment(ctx: &KuratorContext, reviewer: &ID, days: i64) -> ReviewAssignment {
        let assignment = ReviewAssignment::new(
            reviewer.clone(),
            ID::new(),
            Some(now().date_naive() + Duration::days(days)),
        );
        ctx.repos
            .review_assignments
            .insert(&assignment)
            .await
            .unwrap();
        assignment
    }

    #[actix_web::main]
    #[test]
    async fn failed_sends_mark_nothing() {
        let mut ctx = KuratorContext::create_inmemory();
        let mail = Arc::new(InMemoryMailTransport::new());
        ctx.mail = mail.clone();

        let ada = setup_reviewer(&ctx, "ada").await;
        let bob = setup_reviewer(&ctx, "bob").await;
        mail.fail_for("bob@example.com");
        let ada_assignment = setup_assignment(&ctx, &ada.id, 1).await;
        let bob_assignment = setup_assignment(&ctx, &bob.id, 2).await;

        let digests = group_by_reviewer(
            vec![ada_assignment.clone(), bob_assignment.clone()],
            now().date_naive(),
        );
        let outcome = dispatch(&ctx, &digests, now()).await.unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome {
                sent: 1,
                failed: 1,
                notified_reviewer_ids: vec![ada.id.clone()],
            }
        );

        let sent = mail.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_address, "ada@example.com");

        let ada_assignment = ctx
            .repos
            .review_assignments
            .find(&ada_assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ada_assignment.last_reminder_sent_at, Some(now()));
        let bob_assignment = ctx
            .repos
            .review_assignments
            .find(&bob_assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bob_assignment.last_reminder_sent_at, None);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_reviewers_count_as_failed() {
        let mut ctx = KuratorContext::create_inmemory();
        let mail = Arc::new(InMemoryMailTransport::new());
        ctx.mail = mail.clone();

        let assignment = setup_assignment(&ctx, &ID::new(), 0).await;
        let digests = group_by_reviewer(vec![assignment.clone()], now().date_naive());
        let outcome = dispatch(&ctx, &digests, now()).await.unwrap();
        assert_eq!(outcome.sent, 0);
        assert_eq!(outcome.failed, 1);
        assert!(mail.sent().is_empty());

        let assignment = ctx
            .repos
            .review_assignments
            .find(&assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert!(assignment.last_reminder_sent_at.is_none());
    }
}
