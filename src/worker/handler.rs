//! Catalog worker: runs storage requests off the render thread.
//!
//! [`CatalogWorker`] owns the [`CatalogStore`] and turns each
//! [`WorkerMessage`] into a [`WorkerResponse`]. The Zellij worker shim in the
//! plugin binary only moves JSON payloads in and out of it.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::error::{DriveSphereError, Result};
use crate::domain::{NewVehicle, Vehicle};
use crate::infrastructure::paths;
use crate::storage::{CatalogStore, JsonCatalog, VehicleRecord};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Worker-side state. The store is opened lazily by the first request.
#[derive(Default)]
pub struct CatalogWorker {
    store: Option<Box<dyn CatalogStore>>,
    catalog_file: Option<PathBuf>,
}

impl CatalogWorker {
    /// Builds a worker around an already opened store.
    #[must_use]
    pub fn with_store(store: Box<dyn CatalogStore>) -> Self {
        Self {
            store: Some(store),
            catalog_file: None,
        }
    }

    /// Returns the store, opening `requested` first when it differs from
    /// the current catalog.
    ///
    /// The requested path is recorded before the open is attempted, so a
    /// failed load leaves later requests pointed at the configured file.
    /// Without a request, only a previously loaded catalog is used.
    fn store_for(&mut self, requested: Option<PathBuf>) -> Result<&mut Box<dyn CatalogStore>> {
        if let Some(requested) = requested {
            if self.catalog_file.as_ref() != Some(&requested) {
                self.store = None;
                self.catalog_file = Some(requested);
            }
        }

        if self.store.is_none() {
            let path = self.catalog_file.clone().ok_or_else(|| {
                DriveSphereError::Worker("no catalog loaded".to_string())
            })?;
            tracing::debug!(path = ?path, "opening catalog store");
            self.store = Some(Box::new(JsonCatalog::open(path)?));
        }

        self.store
            .as_mut()
            .ok_or_else(|| DriveSphereError::Worker("catalog store not initialized".to_string()))
    }

    fn to_vehicles(records: Vec<VehicleRecord>) -> Vec<Vehicle> {
        records.into_iter().map(Vehicle::from).collect()
    }

    /// Turns a storage result into a response, logging the outcome.
    fn handle_store_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_catalog(&mut self, catalog_file: &str) -> WorkerResponse {
        let requested = if catalog_file.is_empty() {
            paths::default_catalog_file()
        } else {
            PathBuf::from(catalog_file)
        };

        Self::handle_store_result(
            "load catalog",
            self.store_for(Some(requested)).and_then(|store| {
                let vehicles = store.list_vehicles()?;
                let car_types = store.car_types()?;
                Ok((vehicles, car_types))
            }),
            |(records, car_types)| WorkerResponse::CatalogLoaded {
                vehicles: Self::to_vehicles(records),
                car_types,
            },
        )
    }

    fn handle_create_vehicle(&mut self, vehicle: NewVehicle) -> WorkerResponse {
        let created_at = chrono::Utc::now().timestamp();

        Self::handle_store_result(
            "create vehicle",
            self.store_for(None).and_then(|store| {
                let record = store.create_vehicle(vehicle, created_at)?;
                let vehicles = store.list_vehicles()?;
                Ok((record, vehicles))
            }),
            |(record, records)| WorkerResponse::VehicleCreated {
                vehicle: record.into(),
                vehicles: Self::to_vehicles(records),
            },
        )
    }

    fn handle_delete_vehicle(&mut self, id: i64) -> WorkerResponse {
        Self::handle_store_result(
            "delete vehicle",
            self.store_for(None).and_then(|store| {
                store.delete_vehicle(id)?;
                store.list_vehicles()
            }),
            |records| WorkerResponse::VehicleDeleted {
                id,
                vehicles: Self::to_vehicles(records),
            },
        )
    }

    /// Re-enters the sender's trace so worker spans become its children.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadCatalog { catalog_file, .. } => self.handle_load_catalog(&catalog_file),
            WorkerMessage::CreateVehicle { vehicle, .. } => self.handle_create_vehicle(vehicle),
            WorkerMessage::DeleteVehicle { id, .. } => self.handle_delete_vehicle(id),
        }
    }

    /// Decodes a JSON request, handles it and encodes the response.
    ///
    /// Malformed requests are answered with [`WorkerResponse::Error`]. Returns
    /// `None` only if the response itself cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("malformed worker message: {e}"),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs tracing on the worker thread once per worker lifetime.
///
/// Uses the default configuration, so worker spans land in the same trace
/// file as the plugin's.
pub fn init_worker_tracing() {
    if WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        return;
    }
    crate::observability::init_tracing(&crate::Config::default());
}
