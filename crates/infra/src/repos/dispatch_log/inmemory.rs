use super::IDispatchLogRepo;
use crate::repos::shared::inmemory_repo::*;
use kurator_domain::DispatchLogEntry;
use std::convert::TryFrom;

pub struct InMemoryDispatchLogRepo {
    entries: std::sync::Mutex<Vec<DispatchLogEntry>>,
}

impl InMemoryDispatchLogRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDispatchLogRepo for InMemoryDispatchLogRepo {
    async fn insert(&self, entry: &DispatchLogEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_recent(&self, limit: i64) -> anyhow::Result<Vec<DispatchLogEntry>> {
        let mut entries = find_by(&self.entries, |_| true);
        entries.sort_by(|e1, e2| e2.run_at.cmp(&e1.run_at));
        entries.truncate(usize::try_from(limit).unwrap_or_default());
        Ok(entries)
    }
}
