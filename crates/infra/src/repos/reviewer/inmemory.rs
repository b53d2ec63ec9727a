use super::IReviewerRepo;
use crate::repos::shared::inmemory_repo::*;
use kurator_domain::{Reviewer, ID};

pub struct InMemoryReviewerRepo {
    reviewers: std::sync::Mutex<Vec<Reviewer>>,
}

impl InMemoryReviewerRepo {
    pub fn new() -> Self {
        Self {
            reviewers: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReviewerRepo for InMemoryReviewerRepo {
    async fn insert(&self, reviewer: &Reviewer) -> anyhow::Result<()> {
        insert(reviewer, &self.reviewers);
        Ok(())
    }

    async fn find_many(&self, reviewer_ids: &[ID]) -> anyhow::Result<Vec<Reviewer>> {
        Ok(find_by(&self.reviewers, |r| reviewer_ids.contains(&r.id)))
    }
}
