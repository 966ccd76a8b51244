//! HTTP surface for the car registry.
//!
//! This module exposes a compact Axum router:
//!
//! - `PUT /car` – Register a car from a JSON body `{ "make": ..., "model": ... }`. Responds
//!   `201 Created` with the stored record (or a fixed acknowledgement when
//!   `REGISTER_RESPONSE=ack`), `409 Conflict` when the pair is already registered, and
//!   `400 Bad Request` when the body is missing or malformed.
//! - `GET /car?make=&model=` – Look up a car by make and/or model. Query terms are trimmed.
//!   Responds `200 OK` with the record, `204 No Content` when nothing matches, and
//!   `400 Bad Request` when neither term is supplied.
//! - `GET /metrics` – Observe registration and lookup counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.

use crate::config::RegisterResponse;
use crate::registry::{Record, RegistryApi, RegistryError};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Status string carried by the fixed registration acknowledgement.
pub const ACK_STATUS: &str = "registered";

/// Build the HTTP router exposing the registry.
pub fn create_router<S>(service: Arc<S>, register_response: RegisterResponse) -> Router
where
    S: RegistryApi + 'static,
{
    Router::new()
        .route("/car", get(lookup_car::<S>).put(register_car::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .with_state(AppState {
            service,
            register_response,
        })
}

struct AppState<S> {
    service: Arc<S>,
    register_response: RegisterResponse,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            register_response: self.register_response,
        }
    }
}

/// Fixed body returned by `PUT /car` in acknowledgement mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Always [`ACK_STATUS`].
    pub status: String,
}

impl Acknowledgement {
    fn registered() -> Self {
        Self {
            status: ACK_STATUS.to_string(),
        }
    }
}

/// Register a car unless the same make/model pair already exists.
async fn register_car<S>(
    State(state): State<AppState<S>>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Response, AppError>
where
    S: RegistryApi,
{
    let Json(record) = payload.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Rejected registration payload");
        RegistryError::MalformedInput(rejection.body_text())
    })?;
    let stored = state.service.register(record)?;
    let response = match state.register_response {
        RegisterResponse::Record => (StatusCode::CREATED, Json(stored)).into_response(),
        RegisterResponse::Ack => {
            (StatusCode::CREATED, Json(Acknowledgement::registered())).into_response()
        }
    };
    Ok(response)
}

/// Query parameters accepted by `GET /car`.
#[derive(Deserialize)]
struct LookupParams {
    #[serde(default)]
    make: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

/// Return the first car matching the supplied make and/or model.
async fn lookup_car<S>(
    State(state): State<AppState<S>>,
    Query(params): Query<LookupParams>,
) -> Result<Response, AppError>
where
    S: RegistryApi,
{
    let found = state
        .service
        .lookup(params.make.as_deref(), params.model.as_deref())?;
    Ok(match found {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Return a snapshot of the registry counters.
async fn get_metrics<S>(State(state): State<AppState<S>>) -> impl IntoResponse
where
    S: RegistryApi,
{
    Json(state.service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery in tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "register",
                method: "PUT",
                path: "/car",
                description: "Register a car. Returns 201 on success, 409 if the make/model pair already exists, 400 for a missing or malformed body.",
                request_example: Some(json!({
                    "make": "Honda",
                    "model": "Civic"
                })),
            },
            CommandDescriptor {
                name: "lookup",
                method: "GET",
                path: "/car?make={make}&model={model}",
                description: "Find a car by make and/or model. Returns 200 with the car, 204 when nothing matches, 400 when neither term is given.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return registration and lookup counters.",
                request_example: None,
            },
        ],
    })
}

struct AppError(RegistryError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            RegistryError::Conflict => StatusCode::CONFLICT.into_response(),
            err @ (RegistryError::InvalidQuery | RegistryError::MalformedInput(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(inner: RegistryError) -> Self {
        Self(inner)
    }
}
