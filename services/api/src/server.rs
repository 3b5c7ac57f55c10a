use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredNotifier};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_intake::config::AppConfig;
use loan_intake::error::AppError;
use loan_intake::telemetry;
use loan_intake::workflows::loan::{LoanApplicationService, SqliteApplicationStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(SqliteApplicationStore::open(&config.storage.database_path)?);
    let notifier = Arc::new(ConfiguredNotifier::from_config(config.mail.as_ref())?);
    let application_service = Arc::new(LoanApplicationService::new(store, notifier));

    let app = with_application_routes(application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database = %config.storage.database_path.display(),
        mail = config.mail.is_some(),
        "loan intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
