use super::IReviewRoundRepo;
use crate::repos::shared::inmemory_repo::*;
use kurator_domain::{ReviewRound, RoundStatus, ID};

pub struct InMemoryReviewRoundRepo {
    rounds: std::sync::Mutex<Vec<ReviewRound>>,
}

impl InMemoryReviewRoundRepo {
    pub fn new() -> Self {
        Self {
            rounds: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReviewRoundRepo for InMemoryReviewRoundRepo {
    async fn insert(&self, round: &ReviewRound) -> anyhow::Result<()> {
        insert(round, &self.rounds);
        Ok(())
    }

    async fn find(&self, round_id: &ID) -> anyhow::Result<Option<ReviewRound>> {
        Ok(find(round_id, &self.rounds))
    }

    async fn update_status(
        &self,
        round_id: &ID,
        status: RoundStatus,
    ) -> anyhow::Result<Option<ReviewRound>> {
        let (mut updated, _) = update_many(
            &self.rounds,
            |r| r.id == *round_id,
            |r| {
                r.status = status;
                true
            },
        );
        Ok(updated.pop())
    }
}
