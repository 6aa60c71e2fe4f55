//! Worker thread message types for cross-thread communication.
//!
//! Requests flow from the plugin to the catalog worker as [`WorkerMessage`]
//! and come back as [`WorkerResponse`]. Every request carries an optional
//! [`TraceContext`] so worker spans join the plugin's trace.

use crate::domain::{NewVehicle, Vehicle};
use serde::{Deserialize, Serialize};

/// Serialized OpenTelemetry span identity, passed across the thread boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the sending span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the active span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, which is the
    /// case whenever tracing has not been initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that stamp the current trace context on a variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_catalog(LoadCatalog { catalog_file: String }),
    create_vehicle(CreateVehicle { vehicle: NewVehicle }),
    delete_vehicle(DeleteVehicle { id: i64 }),
}

/// Requests handled by the catalog worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Open the catalog file (if needed) and return every record.
    LoadCatalog {
        /// Path of the JSON catalog, already expanded for the sandbox.
        catalog_file: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Validate and store a new vehicle.
    CreateVehicle {
        vehicle: NewVehicle,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove a vehicle by id.
    DeleteVehicle {
        id: i64,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadCatalog { trace_context, .. }
            | Self::CreateVehicle { trace_context, .. }
            | Self::DeleteVehicle { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short variant name for span and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoadCatalog { .. } => "LoadCatalog",
            Self::CreateVehicle { .. } => "CreateVehicle",
            Self::DeleteVehicle { .. } => "DeleteVehicle",
        }
    }
}

/// Results sent back from the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The full catalog and the car types offered by the form.
    CatalogLoaded {
        vehicles: Vec<Vehicle>,
        car_types: Vec<String>,
    },

    /// A vehicle was stored. `vehicles` is the catalog after the insert.
    VehicleCreated {
        vehicle: Vehicle,
        vehicles: Vec<Vehicle>,
    },

    /// A vehicle was removed. `vehicles` is the catalog after the removal.
    VehicleDeleted { id: i64, vehicles: Vec<Vehicle> },

    /// The request failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
