use super::IReviewAssignmentRepo;
use chrono::{DateTime, NaiveDate, Utc};
use kurator_domain::{ReviewAssignment, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresReviewAssignmentRepo {
    pool: PgPool,
}

impl PostgresReviewAssignmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewAssignmentRaw {
    assignment_uid: Uuid,
    reviewer_uid: Uuid,
    product_uid: Uuid,
    round_uid: Option<Uuid>,
    status: String,
    deadline: Option<NaiveDate>,
    last_reminder_sent_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReviewAssignmentRaw> for ReviewAssignment {
    type Error = anyhow::Error;

    fn try_from(e: ReviewAssignmentRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.assignment_uid.into(),
            reviewer_id: e.reviewer_uid.into(),
            product_id: e.product_uid.into(),
            round_id: e.round_uid.map(|id| id.into()),
            status: e.status.parse()?,
            deadline: e.deadline,
            last_reminder_sent_at: e.last_reminder_sent_at,
        })
    }
}

fn to_domain(rows: Vec<ReviewAssignmentRaw>) -> anyhow::Result<Vec<ReviewAssignment>> {
    rows.into_iter().map(ReviewAssignment::try_from).collect()
}

fn to_uuids(ids: &[ID]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.inner_ref()).collect()
}

#[async_trait::async_trait]
impl IReviewAssignmentRepo for PostgresReviewAssignmentRepo {
    async fn insert(&self, assignment: &ReviewAssignment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO review_assignments(
                assignment_uid, reviewer_uid, product_uid, round_uid, status, deadline, last_reminder_sent_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(assignment.id.inner_ref())
        .bind(assignment.reviewer_id.inner_ref())
        .bind(assignment.product_id.inner_ref())
        .bind(assignment.round_id.as_ref().map(|id| *id.inner_ref()))
        .bind(assignment.status.as_str())
        .bind(assignment.deadline)
        .bind(assignment.last_reminder_sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert review assignment: {:?}. DB returned error: {:?}",
                assignment, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, assignment_id: &ID) -> anyhow::Result<Option<ReviewAssignment>> {
        let res: Option<ReviewAssignmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM review_assignments
            WHERE assignment_uid = $1
            "#,
        )
        .bind(assignment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find review assignment with id: {:?} failed. DB returned error: {:?}",
                assignment_id, e
            );
            e
        })?;
        res.map(ReviewAssignment::try_from).transpose()
    }

    async fn find_open_due_by(
        &self,
        last_deadline: NaiveDate,
    ) -> anyhow::Result<Vec<ReviewAssignment>> {
        let rows: Vec<ReviewAssignmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM review_assignments
            WHERE status IN ('pending', 'in_progress') AND
            deadline IS NOT NULL AND
            deadline <= $1
            "#,
        )
        .bind(last_deadline)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find open review assignments due by: {} failed. DB returned error: {:?}",
                last_deadline, e
            );
            e
        })?;
        to_domain(rows)
    }

    async fn mark_reminded(&self, assignment_ids: &[ID], at: DateTime<Utc>) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE review_assignments
            SET last_reminder_sent_at = $2
            WHERE assignment_uid = ANY($1) AND
            (last_reminder_sent_at IS NULL OR last_reminder_sent_at < $2)
            "#,
        )
        .bind(to_uuids(assignment_ids))
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Mark review assignments: {:?} as reminded failed. DB returned error: {:?}",
                assignment_ids, e
            );
            e
        })?;
        Ok(res.rows_affected())
    }
}
