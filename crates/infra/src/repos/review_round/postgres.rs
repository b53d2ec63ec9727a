use super::IReviewRoundRepo;
use chrono::NaiveDate;
use kurator_domain::{ReviewRound, RoundStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresReviewRoundRepo {
    pool: PgPool,
}

impl PostgresReviewRoundRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewRoundRaw {
    round_uid: Uuid,
    name: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    default_deadline: Option<NaiveDate>,
    status: String,
}

impl TryFrom<ReviewRoundRaw> for ReviewRound {
    type Error = anyhow::Error;

    fn try_from(e: ReviewRoundRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.round_uid.into(),
            name: e.name,
            start_date: e.start_date,
            end_date: e.end_date,
            default_deadline: e.default_deadline,
            status: e.status.parse()?,
        })
    }
}

#[async_trait::async_trait]
impl IReviewRoundRepo for PostgresReviewRoundRepo {
    async fn insert(&self, round: &ReviewRound) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO review_rounds(round_uid, name, start_date, end_date, default_deadline, status)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(round.id.inner_ref())
        .bind(&round.name)
        .bind(round.start_date)
        .bind(round.end_date)
        .bind(round.default_deadline)
        .bind(round.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert review round: {:?}. DB returned error: {:?}",
                round, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, round_id: &ID) -> anyhow::Result<Option<ReviewRound>> {
        let res: Option<ReviewRoundRaw> = sqlx::query_as(
            r#"
            SELECT * FROM review_rounds
            WHERE round_uid = $1
            "#,
        )
        .bind(round_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find review round with id: {:?} failed. DB returned error: {:?}",
                round_id, e
            );
            e
        })?;
        res.map(ReviewRound::try_from).transpose()
    }

    async fn update_status(
        &self,
        round_id: &ID,
        status: RoundStatus,
    ) -> anyhow::Result<Option<ReviewRound>> {
        let res: Option<ReviewRoundRaw> = sqlx::query_as(
            r#"
            UPDATE review_rounds
            SET status = $2
            WHERE round_uid = $1
            RETURNING *
            "#,
        )
        .bind(round_id.inner_ref())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Update status of review round with id: {:?} to {} failed. DB returned error: {:?}",
                round_id, status, e
            );
            e
        })?;
        res.map(ReviewRound::try_from).transpose()
    }
}
