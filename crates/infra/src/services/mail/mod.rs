mod http;
mod inmemory;

pub use http::HttpMailTransport;
pub use inmemory::InMemoryMailTransport;

use kurator_domain::ReminderMessage;

/// Outbound delivery of rendered reminder emails
#[async_trait::async_trait]
pub trait IMailTransport: Send + Sync {
    /// Succeeds only when the message was accepted for delivery
    async fn send(&self, message: &ReminderMessage) -> anyhow::Result<()>;
}

/// Used when no mail gateway is configured. Every send fails, so no assignment
/// is ever marked as reminded without an email having gone out.
pub struct UnconfiguredMailTransport {}

#[async_trait::async_trait]
impl IMailTransport for UnconfiguredMailTransport {
    async fn send(&self, message: &ReminderMessage) -> anyhow::Result<()> {
        Err(anyhow::anyhow!(
            "No mail gateway is configured, unable to send reminder to: {}",
            message.to_address
        ))
    }
}
