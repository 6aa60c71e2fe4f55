//! Background worker for catalog storage operations.
//!
//! All file I/O happens on Zellij's worker thread so the plugin never blocks
//! while rendering. Messages carry trace context across the thread boundary.
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Request processing against the catalog store

pub mod handler;
pub mod messages;

pub use handler::{init_worker_tracing, CatalogWorker};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
