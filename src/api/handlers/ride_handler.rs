//! Ride handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::MAX_LOCATION_LENGTH;
use crate::domain::{Location, NewRide, Principal, RideAction, RideResponse};
use crate::errors::AppResult;

/// Ride request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRideRequest {
    #[validate(length(
        min = 1,
        max = MAX_LOCATION_LENGTH,
        message = "pickup_location must be 1-255 characters"
    ))]
    #[schema(example = "Piața Unirii")]
    pub pickup_location: String,
    #[validate(range(min = -90.0, max = 90.0, message = "pickup_lat must be within [-90, 90]"))]
    #[schema(example = 44.4268)]
    pub pickup_lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "pickup_lng must be within [-180, 180]"))]
    #[schema(example = 26.1025)]
    pub pickup_lng: f64,
    #[validate(length(
        min = 1,
        max = MAX_LOCATION_LENGTH,
        message = "dropoff_location must be 1-255 characters"
    ))]
    #[schema(example = "Aeroportul Otopeni")]
    pub dropoff_location: String,
    #[validate(range(min = -90.0, max = 90.0, message = "dropoff_lat must be within [-90, 90]"))]
    #[schema(example = 44.5711)]
    pub dropoff_lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "dropoff_lng must be within [-180, 180]"))]
    #[schema(example = 26.0850)]
    pub dropoff_lng: f64,
    /// Trip length; at least 0.1 km
    #[schema(example = 10.0)]
    pub distance_km: f64,
}

impl From<CreateRideRequest> for NewRide {
    fn from(request: CreateRideRequest) -> Self {
        NewRide {
            pickup: Location::new(request.pickup_location, request.pickup_lat, request.pickup_lng),
            dropoff: Location::new(
                request.dropoff_location,
                request.dropoff_lat,
                request.dropoff_lng,
            ),
            distance_km: request.distance_km,
        }
    }
}

/// Create ride routes
pub fn ride_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ride).get(list_rides))
        .route("/:id", get(get_ride))
        .route("/:id/accept", post(accept_ride))
        .route("/:id/start", post(start_ride))
        .route("/:id/complete", post(complete_ride))
        .route("/:id/cancel", post(cancel_ride))
}

/// Request a ride
#[utoipa::path(
    post,
    path = "/rides",
    tag = "Rides",
    security(("bearer_auth" = [])),
    request_body = CreateRideRequest,
    responses(
        (status = 201, description = "Ride requested and priced", body = RideResponse),
        (status = 400, description = "Validation error or price overflow"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_ride(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRideRequest>,
) -> AppResult<(StatusCode, Json<RideResponse>)> {
    let ride = state
        .dispatch_service
        .create_ride(&principal, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(RideResponse::from(ride))))
}

/// List my rides
///
/// Drivers get rides assigned to their profile, clients get rides they requested.
#[utoipa::path(
    get,
    path = "/rides",
    tag = "Rides",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rides, newest first", body = Vec<RideResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_rides(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RideResponse>>> {
    let rides = state.dispatch_service.list_rides(&principal).await?;
    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

/// Get one of my rides
#[utoipa::path(
    get,
    path = "/rides/{id}",
    tag = "Rides",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ride ID")),
    responses(
        (status = 200, description = "Ride", body = RideResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ride not found or not visible")
    )
)]
pub async fn get_ride(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RideResponse>> {
    let ride = state.dispatch_service.get_ride(&principal, id).await?;
    Ok(Json(RideResponse::from(ride)))
}

async fn run_command(
    state: &AppState,
    principal: &Principal,
    id: Uuid,
    action: RideAction,
) -> AppResult<Json<RideResponse>> {
    let ride = state.dispatch_service.execute(principal, id, action).await?;
    Ok(Json(RideResponse::from(ride)))
}

/// Accept a requested ride (drivers with a profile)
#[utoipa::path(
    post,
    path = "/rides/{id}/accept",
    tag = "Rides",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ride ID")),
    responses(
        (status = 200, description = "Ride accepted", body = RideResponse),
        (status = 403, description = "Caller is not a driver"),
        (status = 404, description = "Ride or driver profile not found"),
        (status = 409, description = "Invalid transition or concurrent update")
    )
)]
pub async fn accept_ride(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RideResponse>> {
    run_command(&state, &principal, id, RideAction::Accept).await
}

/// Start an accepted ride
#[utoipa::path(
    post,
    path = "/rides/{id}/start",
    tag = "Rides",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ride ID")),
    responses(
        (status = 200, description = "Ride in progress", body = RideResponse),
        (status = 404, description = "Ride not found"),
        (status = 409, description = "Invalid transition or concurrent update")
    )
)]
pub async fn start_ride(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RideResponse>> {
    run_command(&state, &principal, id, RideAction::Start).await
}

/// Complete a ride in progress
#[utoipa::path(
    post,
    path = "/rides/{id}/complete",
    tag = "Rides",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ride ID")),
    responses(
        (status = 200, description = "Ride completed", body = RideResponse),
        (status = 404, description = "Ride not found"),
        (status = 409, description = "Invalid transition or concurrent update")
    )
)]
pub async fn complete_ride(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RideResponse>> {
    run_command(&state, &principal, id, RideAction::Complete).await
}

/// Cancel a ride that has not finished
#[utoipa::path(
    post,
    path = "/rides/{id}/cancel",
    tag = "Rides",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ride ID")),
    responses(
        (status = 200, description = "Ride cancelled", body = RideResponse),
        (status = 404, description = "Ride not found"),
        (status = 409, description = "Invalid transition or concurrent update")
    )
)]
pub async fn cancel_ride(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RideResponse>> {
    run_command(&state, &principal, id, RideAction::Cancel).await
}
