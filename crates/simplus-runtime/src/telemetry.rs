//! Log and span pipeline for the bridge.
//!
//! [`init_tracing`] installs one global subscriber made of three layers:
//!
//! 1. a console formatter, compact or JSON per [`LogFormat`],
//! 2. an `EnvFilter` built from `RUST_LOG` (default `info`),
//! 3. an OpenTelemetry layer, present only when an OTLP endpoint is set.
//!
//! | Variable | Effect |
//! |---|---|
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | OTLP/HTTP collector base URL, e.g. `http://localhost:4318`. |
//! | `RUST_LOG` | Log filter. |
//! | `SIMPLUS_LOG_FORMAT` | `json` for newline-delimited JSON, anything else for compact text. |
//!
//! ```rust,no_run
//! let _guard = simplus_runtime::telemetry::init_tracing("simplus");
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "SIMPLUS_LOG_FORMAT";
const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Console log rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Read `SIMPLUS_LOG_FORMAT`.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }

    fn layer(self) -> Box<dyn Layer<Registry> + Send + Sync> {
        match self {
            LogFormat::Compact => fmt::layer().compact().boxed(),
            LogFormat::Json => fmt::layer().json().boxed(),
        }
    }
}

/// Install the global subscriber.
///
/// Hold the returned guard until the process exits; dropping it flushes
/// pending spans.  A second call leaves the first subscriber in place and
/// only reports the conflict on stderr.
pub fn init_tracing(service_name: &str) -> TracerProviderGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let provider = std::env::var(OTLP_ENDPOINT_ENV)
        .ok()
        .and_then(|endpoint| build_provider(service_name, endpoint));
    let otel = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer("simplus")));

    if let Err(e) = tracing_subscriber::registry()
        .with(LogFormat::from_env().layer())
        .with(filter)
        .with(otel)
        .try_init()
    {
        eprintln!("[simplus] tracing already initialised: {e}");
    }

    TracerProviderGuard(provider)
}

/// Shuts the span provider down on drop.
pub struct TracerProviderGuard(Option<SdkTracerProvider>);

impl TracerProviderGuard {
    /// Whether spans are being exported.
    pub fn is_exporting(&self) -> bool {
        self.0.is_some()
    }
}

impl Drop for TracerProviderGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.0.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("[simplus] span provider shutdown failed: {e}");
        }
    }
}

/// OTLP/HTTP provider for `endpoint`, or `None` if the exporter cannot be
/// built.
fn build_provider(service_name: &str, endpoint: String) -> Option<SdkTracerProvider> {
    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("[simplus] OTLP exporter init failed: {e}");
            return None;
        }
    };

    // Replays are synchronous, so spans go out one by one instead of through
    // a batch processor.
    Some(
        SdkTracerProvider::builder()
            .with_resource(
                Resource::builder()
                    .with_service_name(service_name.to_string())
                    .build(),
            )
            .with_simple_exporter(exporter)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_values() {
        assert_eq!(LogFormat::parse(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("compact")), LogFormat::Compact);
        assert_eq!(LogFormat::parse(Some("")), LogFormat::Compact);
        assert_eq!(LogFormat::parse(None), LogFormat::Compact);
    }

    #[test]
    fn guard_without_provider() {
        let guard = TracerProviderGuard(None);
        assert!(!guard.is_exporting());
        drop(guard);
    }
}
