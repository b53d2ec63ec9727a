mod telemetry;

use kurator_api::Application;
use kurator_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("kurator_server".into(), "info".into());
    init_subscriber(subscriber);

    if let Err(e) = run_migration().await {
        error!("Unable to run the database migrations. Error: {:?}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
    }

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
