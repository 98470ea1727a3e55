use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ictaaa_site::config::AppConfig;
use ictaaa_site::error::AppError;
use ictaaa_site::mailer::{MailerService, SmtpMailTransport};
use ictaaa_site::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let transport = Arc::new(SmtpMailTransport::from_config(&config.mail)?);
    let mailer = Arc::new(MailerService::new(transport, config.mail.sender()));

    let app = with_site_routes(mailer)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "conference site services ready");

    axum::serve(listener, app).await?;
    Ok(())
}
