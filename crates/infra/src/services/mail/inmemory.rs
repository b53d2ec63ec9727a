use super::IMailTransport;
use kurator_domain::ReminderMessage;
use std::sync::Mutex;

/// Records every message instead of delivering it. Sends to addresses
/// registered with `fail_for` are rejected.
pub struct InMemoryMailTransport {
    sent: Mutex<Vec<ReminderMessage>>,
    failing_addresses: Mutex<Vec<String>>,
}

impl InMemoryMailTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_addresses: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, address: &str) {
        self.failing_addresses
            .lock()
            .unwrap()
            .push(address.to_string());
    }

    pub fn sent(&self) -> Vec<ReminderMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailTransport for InMemoryMailTransport {
    async fn send(&self, message: &ReminderMessage) -> anyhow::Result<()> {
        let rejected = self
            .failing_addresses
            .lock()
            .unwrap()
            .contains(&message.to_address);
        if rejected {
            return Err(anyhow::anyhow!(
                "Mail transport rejected reminder to: {}",
                message.to_address
            ));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
