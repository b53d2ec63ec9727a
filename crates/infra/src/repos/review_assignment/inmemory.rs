use super::IReviewAssignmentRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, NaiveDate, Utc};
use kurator_domain::{ReviewAssignment, ID};

pub struct InMemoryReviewAssignmentRepo {
    assignments: std::sync::Mutex<Vec<ReviewAssignment>>,
}

impl InMemoryReviewAssignmentRepo {
    pub fn new() -> Self {
        Self {
            assignments: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReviewAssignmentRepo for InMemoryReviewAssignmentRepo {
    async fn insert(&self, assignment: &ReviewAssignment) -> anyhow::Result<()> {
        insert(assignment, &self.assignments);
        Ok(())
    }

    async fn find(&self, assignment_id: &ID) -> anyhow::Result<Option<ReviewAssignment>> {
        Ok(find(assignment_id, &self.assignments))
    }

    async fn find_open_due_by(
        &self,
        last_deadline: NaiveDate,
    ) -> anyhow::Result<Vec<ReviewAssignment>> {
        Ok(find_by(&self.assignments, |a| {
            a.status.is_open() && matches!(a.deadline, Some(deadline) if deadline <= last_deadline)
        }))
    }

    async fn mark_reminded(&self, assignment_ids: &[ID], at: DateTime<Utc>) -> anyhow::Result<u64> {
        let (_, changed) = update_many(
            &self.assignments,
            |a| assignment_ids.contains(&a.id),
            |a| a.mark_reminded(at),
        );
        Ok(changed)
    }
}
