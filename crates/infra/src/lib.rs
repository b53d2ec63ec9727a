mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailConfig, ReminderJobConfig};
pub use repos::{
    IDispatchLogRepo, IReminderSettingsRepo, IReviewAssignmentRepo, IReviewRoundRepo,
    IReviewerRepo, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};

#[derive(Clone)]
pub struct KuratorContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mail: Arc<dyn IMailTransport>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

fn create_mail_transport(config: &Config) -> Arc<dyn IMailTransport> {
    match &config.mail {
        Some(mail_config) => Arc::new(HttpMailTransport::new(mail_config.clone())),
        None => Arc::new(UnconfiguredMailTransport {}),
    }
}

impl KuratorContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        Self {
            mail: create_mail_transport(&config),
            repos,
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context backed by inmemory repositories and a recording mail transport
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            mail: Arc::new(InMemoryMailTransport::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> KuratorContext {
    KuratorContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
