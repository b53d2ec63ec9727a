mod base;
mod reminder;
mod round;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use kurator_api_structs::dtos::*;
pub use kurator_domain::{BulkFailure, BulkResult, RoundStatus, RunOutcome, Urgency, ID};
use reminder::ReminderClient;
pub use reminder::{GetUpcomingRemindersInput, RunRemindersInput, UpdateReminderSettingsInput};
use round::RoundClient;
pub use round::CreateRoundInput;
use status::StatusClient;
use std::sync::Arc;


/// Kurator Server SDK
///
/// The SDK contains methods for interacting with the Kurator server API.
#[derive(Clone)]
pub struct KuratorSDK {
    pub reminder: ReminderClient,
    pub round: RoundClient,
    pub status: StatusClient,
}

impl KuratorSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::from_base(base)
    }

    /// Authenticates with a bearer token instead of the admin api key
    pub fn with_token<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_bearer_token(token.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        Self {
            reminder: ReminderClient::new(base.clone()),
            round: RoundClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
