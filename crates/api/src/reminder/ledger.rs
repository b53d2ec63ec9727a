use chrono::{DateTime, Utc};
use kurator_domain::{DispatchLogEntry, ID};
use kurator_infra::KuratorContext;
use tracing::{error, info};

/// Marks the assignments of a successfully notified reviewer. Failures are
/// logged and reported as zero updated assignments.
pub async fn mark_sent(ctx: &KuratorContext, assignment_ids: &[ID], at: DateTime<Utc>) -> u64 {
    match ctx
        .repos
        .review_assignments
        .mark_reminded(assignment_ids, at)
        .await
    {
        Ok(updated) => updated,
        Err(e) => {
            error!(
                "Unable to mark assignments: {:?} as reminded at {}. Error: {:?}",
                assignment_ids, at, e
            );
            0
        }
    }
}

/// Appends the log entry of a finished run. Failures are logged only.
pub async fn record_run(ctx: &KuratorContext, entry: DispatchLogEntry) -> DispatchLogEntry {
    match ctx.repos.dispatch_log.insert(&entry).await {
        Ok(()) => info!(
            outcome = %entry.outcome,
            forced = entry.forced,
            reviews_processed = entry.counts.reviews_processed,
            reviewers_notified = entry.counts.reviewers_notified,
            emails_sent = entry.counts.emails_sent,
            emails_failed = entry.counts.emails_failed,
            "Reminder run recorded"
        ),
        Err(e) => error!("Unable to record reminder run: {:?}. Error: {:?}", entry, e),
    }
    entry
}
