//! Observability hooks for the executor.
//!
//! With the `metrics` feature, [`METRICS`] collects statement counts, errors and
//! durations through OpenTelemetry into a Prometheus registry ([`EntityServiceMetrics::render`]).
//! With the `tracing` feature, [`tracing_helpers`] provides the spans the executor
//! and `connect` run inside.

#[cfg(feature = "metrics")]
pub use self::prometheus_metrics::{EntityServiceMetrics, METRICS};

#[cfg(feature = "metrics")]
mod prometheus_metrics {
    use once_cell::sync::Lazy;
    use opentelemetry::{
        global,
        metrics::{Counter, Histogram, MeterProvider as _},
    };
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Registry, TextEncoder};
    use std::time::Duration;

    pub static METRICS: Lazy<EntityServiceMetrics> = Lazy::new(EntityServiceMetrics::init);

    pub struct EntityServiceMetrics {
        registry: Registry,
        _provider: Option<SdkMeterProvider>,
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        pub connect_duration: Histogram<f64>,
    }

    impl EntityServiceMetrics {
        pub fn init() -> Self {
            let registry = Registry::new();
            let exporter = opentelemetry_prometheus::exporter()
                .with_registry(registry.clone())
                .build();
            let (meter, provider) = match exporter {
                Ok(exporter) => {
                    let provider = SdkMeterProvider::builder().with_reader(exporter).build();
                    (provider.meter("entity_service"), Some(provider))
                }
                Err(e) => {
                    log::warn!("prometheus exporter unavailable, metrics will not be exported: {e}");
                    (global::meter("entity_service"), None)
                }
            };

            let queries_total = meter
                .u64_counter("entity_service_queries_total")
                .with_description("Total statements executed")
                .build();

            let query_errors_total = meter
                .u64_counter("entity_service_query_errors_total")
                .with_description("Statements that failed")
                .build();

            let query_duration = meter
                .f64_histogram("entity_service_query_duration_seconds")
                .with_description("Duration of statements")
                .build();

            let connect_duration = meter
                .f64_histogram("entity_service_connect_duration_seconds")
                .with_description("Time spent establishing connections")
                .build();

            Self {
                registry,
                _provider: provider,
                queries_total,
                query_errors_total,
                query_duration,
                connect_duration,
            }
        }

        pub fn record_query_duration(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_connect_duration(&self, elapsed: Duration) {
            self.connect_duration.record(elapsed.as_secs_f64(), &[]);
        }

        /// Prometheus text exposition of everything collected so far
        pub fn render(&self) -> String {
            TextEncoder::new()
                .encode_to_string(&self.registry.gather())
                .unwrap_or_else(|e| {
                    log::warn!("failed to encode metrics: {e}");
                    String::new()
                })
        }
    }

}

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::{info_span, Span};

    /// Span around one executor call
    pub fn execute_query_span(sql: &str) -> Span {
        info_span!(
            "entity_service.execute_query",
            db.system = "postgresql",
            db.statement = %sql
        )
    }

    /// Span around `connect`
    pub fn acquire_connection_span() -> Span {
        info_span!("entity_service.connect", db.system = "postgresql")
    }
}
