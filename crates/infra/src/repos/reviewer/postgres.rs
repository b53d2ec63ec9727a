use super::IReviewerRepo;
use kurator_domain::{Reviewer, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReviewerRepo {
    pool: PgPool,
}

impl PostgresReviewerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewerRaw {
    reviewer_uid: Uuid,
    name: String,
    email: String,
}

impl From<ReviewerRaw> for Reviewer {
    fn from(e: ReviewerRaw) -> Self {
        Self {
            id: e.reviewer_uid.into(),
            name: e.name,
            email: e.email,
        }
    }
}

#[async_trait::async_trait]
impl IReviewerRepo for PostgresReviewerRepo {
    async fn insert(&self, reviewer: &Reviewer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reviewers(reviewer_uid, name, email)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(reviewer.id.inner_ref())
        .bind(&reviewer.name)
        .bind(&reviewer.email)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reviewer: {:?}. DB returned error: {:?}",
                reviewer, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_many(&self, reviewer_ids: &[ID]) -> anyhow::Result<Vec<Reviewer>> {
        let ids = reviewer_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let rows: Vec<ReviewerRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reviewers
            WHERE reviewer_uid = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reviewers with ids: {:?} failed. DB returned error: {:?}",
                reviewer_ids, e
            );
            e
        })?;
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
