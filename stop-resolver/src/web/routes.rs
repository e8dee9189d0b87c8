//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::domain::Coordinate;
use crate::resolve::{
    ResolveError, dedupe_nearby, find_stop_by_name, resolve_directions, vehicles_for_service,
};
use crate::transit::{FetchError, TransitSource};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/services/:service_id/directions", get(service_directions))
        .route("/api/stops/nearby", get(nearby_stops))
        .route("/api/stops/lookup", get(lookup_stop))
        .route("/api/vehicles", get(vehicles))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Split a service's stops into outbound and inbound.
async fn service_directions(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<DirectionsResponse>, AppError> {
    let catalog = state.source.stops().await?;
    let assignment = resolve_directions(&catalog, &service_id)
        .apply_policy(state.config.unclassified_policy);

    Ok(Json(DirectionsResponse {
        service: service_id.trim().to_string(),
        outbound: StopResult::from_stops(&assignment.outbound),
        inbound: StopResult::from_stops(&assignment.inbound),
        unclassified: StopResult::from_stops(&assignment.unclassified),
    }))
}

/// Stops around a point, one per name cluster.
async fn nearby_stops(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<NearbyResponse>, AppError> {
    let center = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let radius = match req.radius {
        Some(r) if r.is_finite() && r > 0.0 => r,
        Some(r) => {
            return Err(AppError::BadRequest {
                message: format!("Invalid radius: {r}"),
            });
        }
        None => state.config.nearby_radius_m,
    };

    let catalog = state.source.stops().await?;
    let stops = dedupe_nearby(&catalog, center, radius, state.config.merge_radius_m);

    Ok(Json(NearbyResponse {
        stops: StopResult::from_stops(&stops),
    }))
}

/// Look up a single stop by display name.
async fn lookup_stop(
    State(state): State<AppState>,
    Query(req): Query<LookupRequest>,
) -> Result<Json<StopResult>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Stop name must not be empty".to_string(),
        });
    }

    let catalog = state.source.stops().await?;
    let stop = find_stop_by_name(&catalog, &req.name)?;

    Ok(Json(StopResult::from_stop(stop)))
}

/// Latest vehicle positions from the background session.
async fn vehicles(
    State(state): State<AppState>,
    Query(req): Query<VehiclesRequest>,
) -> Json<VehiclesResponse> {
    let Some(snapshot) = state.vehicles.latest() else {
        return Json(VehiclesResponse {
            ready: false,
            vehicles: Vec::new(),
        });
    };

    let vehicles = vehicles_for_service(&snapshot, req.service.as_deref())
        .iter()
        .map(VehicleResult::from_vehicle)
        .collect();

    Json(VehiclesResponse {
        ready: true,
        vehicles,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::StopNotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
