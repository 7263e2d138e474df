//! Logging and OpenTelemetry setup for Creativerse binaries.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("creativerse=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Install a plain fmt subscriber.
///
/// `RUST_LOG` wins over `verbose` when set.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_filter(default_filter(verbose)),
        )
        .try_init()?;
    Ok(())
}

/// Initialize OpenTelemetry with the stdout span exporter.
///
/// Spans go to stdout alongside human-readable fmt logs. Both layers
/// respect `RUST_LOG`.
///
/// # Errors
///
/// Returns error if subscriber initialization fails.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::default())
        .build();

    let tracer = provider.tracer("creativerse");

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(default_filter(true));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(default_filter(true));

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Flush pending spans before exit.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}
