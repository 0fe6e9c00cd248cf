//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{DomainError, RouteId, StopId, TransportType, TripId, validate_coordinates};
use crate::geo::distance_km;
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops", get(list_stops).post(create_stop))
        .route("/stops/nearby", get(nearby_stops))
        .route("/stops/:id", get(get_stop).delete(delete_stop))
        .route("/stops/:id/routes", get(stop_routes))
        .route("/stops/:id/route_ids", get(stop_route_ids))
        .route("/routes", get(list_routes).post(create_route))
        .route("/routes/:id", get(get_route).delete(delete_route))
        .route("/routes/:id/stops", get(route_stops).post(add_route_stop))
        .route("/routes/:id/stops/:stop_id", delete(remove_route_stop))
        .route("/routes/:id/trips", get(route_trips))
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/:id", get(get_trip))
        .route("/trips/:id/stops", post(add_trip_stop))
        .route("/path", get(shortest_path))
        .route("/reachable", get(reachable))
        .route("/distance", get(distance))
        .route("/graph", get(graph_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

// ========== stops ==========

async fn list_stops(State(state): State<AppState>) -> Json<StopListResponse> {
    Json(StopListResponse {
        stops: state.system.all_stops().await,
    })
}

async fn get_stop(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let stop = state
        .system
        .get_stop(StopId(id))
        .await
        .ok_or_else(|| AppError::not_found(format!("stop {id} not found")))?;
    Ok(Json(stop).into_response())
}

async fn create_stop(
    State(state): State<AppState>,
    Json(req): Json<CreateStopRequest>,
) -> Result<Response, AppError> {
    let stop = req.into_stop()?;
    state.system.add_stop(stop.clone()).await?;
    Ok((StatusCode::CREATED, Json(stop)).into_response())
}

async fn delete_stop(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let stop = state.system.remove_stop(StopId(id)).await?;
    Ok(Json(stop).into_response())
}

/// Stops within a radius of a point, nearest first.
async fn nearby_stops(
    State(state): State<AppState>,
    Query(req): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, AppError> {
    validate_coordinates(req.lat, req.lon)?;

    let radius_km = req.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("invalid radius: {radius_km}"),
        });
    }

    let stops = state
        .system
        .find_nearby_stops(req.lat, req.lon, radius_km)
        .await
        .into_iter()
        .map(|(stop, distance_km)| NearbyStop { stop, distance_km })
        .collect();

    Ok(Json(NearbyResponse { stops }))
}

/// Routes calling at a stop.
///
/// Route stop lists may name ids with no stop record, so an unknown stop is
/// not an error: it simply matches whichever routes list it.
async fn stop_routes(State(state): State<AppState>, Path(id): Path<i64>) -> Json<RouteListResponse> {
    Json(RouteListResponse {
        routes: state.system.find_routes_through_stop(StopId(id)).await,
    })
}

/// Ids of routes calling at a stop, in ascending order.
async fn stop_route_ids(State(state): State<AppState>, Path(id): Path<i64>) -> Json<StopRouteIdsResponse> {
    let stop_id = StopId(id);
    Json(StopRouteIdsResponse {
        stop_id,
        route_ids: state.system.routes_through_stop_ids(stop_id).await,
    })
}

// ========== routes ==========

async fn list_routes(
    State(state): State<AppState>,
    Query(req): Query<RoutesQuery>,
) -> Json<RouteListResponse> {
    let routes = match req.transport_type {
        Some(kind) => {
            let kind = TransportType::from(kind);
            state.system.find_routes_by_type(&kind).await
        }
        None => state.system.all_routes().await,
    };
    Json(RouteListResponse { routes })
}

async fn get_route(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let route = state
        .system
        .get_route(RouteId(id))
        .await
        .ok_or_else(|| AppError::not_found(format!("route {id} not found")))?;
    Ok(Json(route).into_response())
}

async fn create_route(
    State(state): State<AppState>,
    Json(req): Json<CreateRouteRequest>,
) -> Result<Response, AppError> {
    let route = req.into_route()?;
    state.system.add_route(route.clone()).await?;
    Ok((StatusCode::CREATED, Json(route)).into_response())
}

async fn delete_route(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let route = state.system.remove_route(RouteId(id)).await?;
    Ok(Json(route).into_response())
}

async fn route_stops(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RouteStopsResponse>, AppError> {
    let route = state
        .system
        .get_route(RouteId(id))
        .await
        .ok_or_else(|| AppError::not_found(format!("route {id} not found")))?;
    Ok(Json(RouteStopsResponse {
        route_id: route.id,
        stop_ids: route.stop_ids,
    }))
}

/// Append a stop to the end of a route.
async fn add_route_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddRouteStopRequest>,
) -> Result<Json<RouteStopsResponse>, AppError> {
    let route_id = RouteId(id);
    let stop_ids = state
        .system
        .add_stop_to_route(route_id, StopId(req.stop_id))
        .await?;
    Ok(Json(RouteStopsResponse { route_id, stop_ids }))
}

/// Remove every occurrence of a stop from a route.
async fn remove_route_stop(
    State(state): State<AppState>,
    Path((id, stop_id)): Path<(i64, i64)>,
) -> Result<Json<RemovedStopsResponse>, AppError> {
    let route_id = RouteId(id);
    let removed = state
        .system
        .remove_stop_from_route(route_id, StopId(stop_id))
        .await?;
    Ok(Json(RemovedStopsResponse { route_id, removed }))
}

async fn route_trips(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TripListResponse>, AppError> {
    let trips = state.system.find_trips_by_route(RouteId(id)).await?;
    Ok(Json(TripListResponse { trips }))
}

// ========== trips ==========

/// All trips, or those running inside `?from=&to=`.
async fn list_trips(
    State(state): State<AppState>,
    Query(req): Query<TripsQuery>,
) -> Result<Json<TripListResponse>, AppError> {
    let trips = match req.window()? {
        Some((from, to)) => state.system.find_trips_by_time_range(from, to).await,
        None => state.system.all_trips().await,
    };
    Ok(Json(TripListResponse { trips }))
}

async fn get_trip(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let trip = state
        .system
        .get_trip(TripId(id))
        .await
        .ok_or_else(|| AppError::not_found(format!("trip {id} not found")))?;
    Ok(Json(trip).into_response())
}

async fn create_trip(
    State(state): State<AppState>,
    Json(req): Json<CreateTripRequest>,
) -> Result<Response, AppError> {
    let trip = req.into_trip()?;
    state.system.add_trip(trip.clone()).await?;
    Ok((StatusCode::CREATED, Json(trip)).into_response())
}

async fn add_trip_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddTripStopRequest>,
) -> Result<Json<TripStopsResponse>, AppError> {
    let trip_id = TripId(id);
    let stop_sequence = state
        .system
        .add_stop_to_trip(trip_id, StopId(req.stop_id), req.sequence.unwrap_or(usize::MAX))
        .await?;
    Ok(Json(TripStopsResponse {
        trip_id,
        stop_sequence,
    }))
}

// ========== network queries ==========

async fn shortest_path(State(state): State<AppState>, Query(req): Query<PathQuery>) -> Json<PathResponse> {
    let stops = state
        .system
        .find_shortest_path(StopId(req.from), StopId(req.to))
        .await;

    // A stop deleted since the path was computed leaves no distance to report
    let distance_km = state
        .system
        .journey_distance_km(&stops)
        .await
        .unwrap_or(0.0);

    Json(PathResponse {
        found: !stops.is_empty(),
        stops,
        distance_km,
    })
}

async fn reachable(State(state): State<AppState>, Query(req): Query<ReachableQuery>) -> Json<ReachableResponse> {
    let depth = req.depth.unwrap_or(DEFAULT_DEPTH);
    Json(ReachableResponse {
        stops: state.system.find_reachable(StopId(req.from), depth).await,
    })
}

async fn distance(Query(req): Query<DistanceQuery>) -> Result<Json<DistanceResponse>, AppError> {
    validate_coordinates(req.lat1, req.lon1)?;
    validate_coordinates(req.lat2, req.lon2)?;
    Ok(Json(DistanceResponse {
        distance_km: distance_km(req.lat1, req.lon1, req.lat2, req.lon2),
    }))
}

async fn graph_info(State(state): State<AppState>) -> Json<GraphResponse> {
    Json(state.system.graph_info().await.into())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    fn not_found(message: String) -> Self {
        AppError::NotFound { message }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            StoreError::Duplicate { .. } | StoreError::Domain(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            StoreError::Io(_) | StoreError::Json(_) => AppError::Internal {
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
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
