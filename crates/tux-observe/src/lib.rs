//! Observability setup for Tux: structured logging via `tracing` with an
//! optional OpenTelemetry stdout exporter for completion spans.

pub mod tracing_setup;
