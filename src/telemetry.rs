use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{MetricExporter, SpanExporter};
use opentelemetry_sdk::{Resource, metrics::SdkMeterProvider, trace::SdkTracerProvider};
use tracing_appender::rolling::RollingFileAppender;
use tracing_opentelemetry::MetricsLayer;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::Layer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Setting this variable turns on OTLP export
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

fn get_resource() -> Resource {
    static RESOURCE: OnceLock<Resource> = OnceLock::new();
    RESOURCE
        .get_or_init(|| Resource::builder().with_service_name("webcrawl").build())
        .clone()
}

fn init_traces() -> anyhow::Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder().with_http().build()?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(get_resource())
        .build())
}

fn init_metrics() -> anyhow::Result<SdkMeterProvider> {
    let exporter = MetricExporter::builder().with_http().build()?;

    Ok(SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .with_resource(get_resource())
        .build())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing-subscriber, returning an OtelGuard when OTLP export is on
///
/// Logs go to stderr, or to `log_file` when one is given. Stdout is left to
/// tool output and the stdio MCP transport.
pub fn init_tracing_subscriber(
    log_file: Option<RollingFileAppender>,
) -> anyhow::Result<Option<OtelGuard>> {
    let fmt_layer = match log_file {
        Some(appender) => fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        None => fmt::layer().with_writer(std::io::stderr).boxed(),
    };
    let console_layer = fmt_layer.with_filter(env_filter());

    let (metrics_layer, trace_layer, guard) = if std::env::var_os(OTLP_ENDPOINT_VAR).is_some() {
        let tracer_provider = init_traces()?;
        let meter_provider = init_metrics()?;
        let tracer = tracer_provider.tracer("webcrawl");
        (
            Some(MetricsLayer::new(meter_provider.clone())),
            Some(OpenTelemetryLayer::new(tracer)),
            Some(OtelGuard {
                tracer_provider,
                meter_provider,
            }),
        )
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(metrics_layer)
        .with(trace_layer)
        .init();

    Ok(guard)
}

pub struct OtelGuard {
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Err(err) = self.tracer_provider.shutdown() {
            eprintln!("{err:?}");
        }
        if let Err(err) = self.meter_provider.shutdown() {
            eprintln!("{err:?}");
        }
    }
}
