use kurator_api::Application;
use kurator_infra::{InMemoryMailTransport, KuratorContext};
use kurator_sdk::KuratorSDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: KuratorContext,
    pub mail: Arc<InMemoryMailTransport>,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, KuratorSDK) {
    let mut ctx = KuratorContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.reminder_job.enabled = false;
    let mail = Arc::new(InMemoryMailTransport::new());
    ctx.mail = mail.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = KuratorSDK::new(address.clone(), ctx.config.admin_api_key.clone());
    let app = TestApp { ctx, mail, address };
    (app, sdk)
}
