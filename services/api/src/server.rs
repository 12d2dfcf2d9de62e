use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, Services};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use networking_lab::config::AppConfig;
use networking_lab::telemetry;
use networking_lab::AppError;
use std::sync::atomic::Ordering;
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

    let catalog = load_catalog(&config.quiz)?;
    let services = Services::from_config(&config, catalog);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_service_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_dir = %config.storage.data_dir.display(),
        admin = config.admin.is_configured(),
        "networking lab api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
