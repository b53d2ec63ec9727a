use super::IMailTransport;
use crate::config::MailConfig;
use kurator_domain::ReminderMessage;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailAddress<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailRequest<'a> {
    from: &'a str,
    to: Vec<MailAddress<'a>>,
    subject: &'a str,
    text: &'a str,
}

/// Posts reminders as JSON to an HTTP mail gateway
pub struct HttpMailTransport {
    client: Client,
    config: MailConfig,
}

impl HttpMailTransport {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl IMailTransport for HttpMailTransport {
    async fn send(&self, message: &ReminderMessage) -> anyhow::Result<()> {
        let body = SendMailRequest {
            from: &self.config.from,
            to: vec![MailAddress {
                name: &message.to_name,
                email: &message.to_address,
            }],
            subject: &message.subject,
            text: &message.body,
        };

        let mut req = self.client.post(self.config.api_url.clone()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            req = req.header("authorization", format!("Bearer {}", api_key));
        }

        match req.send().await {
            Ok(res) => res.error_for_status().map(|_| ()).map_err(|e| {
                error!(
                    "[Unexpected Response] Mail gateway rejected reminder to: {}. Error message: {:?}",
                    message.to_address, e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Mail gateway request for reminder to: {} failed. Error message: {:?}",
                    message.to_address, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
