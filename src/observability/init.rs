//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "healthdesk-otlp.json";

/// Installs the global subscriber exporting spans to
/// `<data dir>/healthdesk-otlp.json`.
///
/// The filter comes from `config.trace_level` (default `info`) and accepts any
/// `EnvFilter` directive such as `healthdesk=debug`. Tracing is optional: if the
/// data directory cannot be created, or a subscriber is already installed, this
/// returns without doing anything.
///
/// # Example
///
/// ```no_run
/// use healthdesk::observability::init_tracing;
/// use healthdesk::Config;
///
/// let config = Config {
///     trace_level: Some("debug".into()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is active");
/// ```
pub fn init_tracing(config: &Config) {
    let directive = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "Healthdesk"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(directive))
        .with(otel_layer)
        .try_init();
}
