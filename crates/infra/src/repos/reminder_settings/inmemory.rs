use super::IReminderSettingsRepo;
use kurator_domain::{ReminderSettings, ReminderSettingsPatch};
use std::sync::Mutex;

pub struct InMemoryReminderSettingsRepo {
    settings: Mutex<Option<ReminderSettings>>,
}

impl InMemoryReminderSettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl IReminderSettingsRepo for InMemoryReminderSettingsRepo {
    async fn get(&self) -> anyhow::Result<ReminderSettings> {
        let mut settings = self.settings.lock().unwrap();
        Ok(*settings.get_or_insert_with(Default::default))
    }

    async fn update(&self, patch: &ReminderSettingsPatch) -> anyhow::Result<ReminderSettings> {
        let mut settings = self.settings.lock().unwrap();
        let settings = settings.get_or_insert_with(Default::default);
        settings.apply(patch)?;
        Ok(*settings)
    }
}
