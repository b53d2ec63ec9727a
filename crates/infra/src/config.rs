use chrono_tz::Tz;
use kurator_utils::create_prefixed_secret;
use tracing::{info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct ReminderJobConfig {
    /// Whether the server should run the daily reminder pass itself
    pub enabled: bool,
    /// Hour of the day (0-23, in the reminder time zone) the pass runs at
    pub hour: u32,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Endpoint of the HTTP mail gateway reminders are posted to
    pub api_url: Url,
    pub api_key: Option<String>,
    /// Sender address of reminder emails
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Api key granting full administrator access, sent in the `x-api-key` header
    pub admin_api_key: String,
    /// Secret used to verify HS256 signed bearer tokens
    pub jwt_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Time zone that decides what "today" is when comparing deadlines
    pub reminder_timezone: Tz,
    pub reminder_job: ReminderJobConfig,
    /// `None` when no mail gateway is configured, reminders can then not be delivered
    pub mail: Option<MailConfig>,
}

fn env_or_generated_secret(var: &str, prefix: &str) -> String {
    match std::env::var(var) {
        Ok(secret) => secret,
        Err(_) => {
            info!("Did not find {} environment variable. Going to create one.", var);
            let secret = create_prefixed_secret(prefix, 30);
            info!("{} was generated and set to: {}", var, secret);
            secret
        }
    }
}

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(val) => val,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    var, raw, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_mail_config() -> Option<MailConfig> {
    let raw_url = match std::env::var("MAIL_API_URL") {
        Ok(url) => url,
        Err(_) => {
            warn!("MAIL_API_URL is not set, reminder emails can not be delivered.");
            return None;
        }
    };
    let api_url = match Url::parse(&raw_url) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => url,
        _ => {
            warn!(
                "The given MAIL_API_URL: {} is not a valid http(s) url, reminder emails can not be delivered.",
                raw_url
            );
            return None;
        }
    };

    Some(MailConfig {
        api_url,
        api_key: std::env::var("MAIL_API_KEY").ok(),
        from: std::env::var("MAIL_FROM").unwrap_or_else(|_| "reviews@kurator.local".into()),
    })
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = env_or_generated_secret("ADMIN_API_KEY", "ak");
        let jwt_secret = env_or_generated_secret("AUTH_JWT_SECRET", "jwt");
        let port = parse_env_or("PORT", 5000_usize);
        let reminder_timezone = parse_env_or("REMINDER_TIMEZONE", chrono_tz::UTC);

        let mut hour = parse_env_or("REMINDER_JOB_HOUR", 8_u32);
        if hour > 23 {
            warn!(
                "The given REMINDER_JOB_HOUR: {} is out of range, falling back to 8.",
                hour
            );
            hour = 8;
        }
        let reminder_job = ReminderJobConfig {
            enabled: parse_env_or("REMINDER_JOB_ENABLED", true),
            hour,
        };

        Self {
            admin_api_key,
            jwt_secret,
            port,
            reminder_timezone,
            reminder_job,
            mail: parse_mail_config(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
