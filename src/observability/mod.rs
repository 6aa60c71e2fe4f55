//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK provider → OTLP JSON lines → rotating file
//! ```
//!
//! Spans land in `~/.local/share/zellij/drivesphere/drivesphere-otlp.json`.
//! The file rotates at 10 MB and keeps three numbered backups. The level
//! comes from the `trace_level` plugin option (default `"info"`).
//!
//! - `init`: subscriber installation
//! - `exporter`: span exporter and tracer provider
//! - `otlp_json`: OTLP JSON encoding
//! - `rotation`: size-rotated append-only file

mod exporter;
mod init;
mod otlp_json;
mod rotation;

pub use init::{init_tracing, TRACE_FILE_NAME};
