//! Driver profile handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MAX_CAR_MODEL_LENGTH, MAX_CAR_PLATE_LENGTH, MAX_LICENSE_NUMBER_LENGTH};
use crate::domain::{CreateDriver, DriverResponse, Principal, UpdateDriver};
use crate::errors::AppResult;

/// Driver profile creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDriverRequest {
    #[validate(length(
        min = 1,
        max = MAX_LICENSE_NUMBER_LENGTH,
        message = "license_number must be 1-20 characters"
    ))]
    #[schema(example = "B-123456")]
    pub license_number: String,
    #[validate(length(
        min = 1,
        max = MAX_CAR_MODEL_LENGTH,
        message = "car_model must be 1-50 characters"
    ))]
    #[schema(example = "Dacia Logan")]
    pub car_model: String,
    #[validate(length(
        min = 1,
        max = MAX_CAR_PLATE_LENGTH,
        message = "car_plate must be 1-10 characters"
    ))]
    #[schema(example = "B123ABC")]
    pub car_plate: String,
    /// Defaults to false
    #[serde(default)]
    pub is_available: bool,
}

impl From<CreateDriverRequest> for CreateDriver {
    fn from(request: CreateDriverRequest) -> Self {
        CreateDriver {
            license_number: request.license_number,
            car_model: request.car_model,
            car_plate: request.car_plate,
            is_available: request.is_available,
        }
    }
}

/// Driver profile partial update; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDriverRequest {
    #[validate(length(
        min = 1,
        max = MAX_LICENSE_NUMBER_LENGTH,
        message = "license_number must be 1-20 characters"
    ))]
    pub license_number: Option<String>,
    #[validate(length(
        min = 1,
        max = MAX_CAR_MODEL_LENGTH,
        message = "car_model must be 1-50 characters"
    ))]
    pub car_model: Option<String>,
    #[validate(length(
        min = 1,
        max = MAX_CAR_PLATE_LENGTH,
        message = "car_plate must be 1-10 characters"
    ))]
    pub car_plate: Option<String>,
    #[validate(range(min = 0.0, message = "rating cannot be negative"))]
    #[schema(example = 4.8)]
    pub rating: Option<f64>,
    pub is_available: Option<bool>,
}

impl From<UpdateDriverRequest> for UpdateDriver {
    fn from(request: UpdateDriverRequest) -> Self {
        UpdateDriver {
            license_number: request.license_number,
            car_model: request.car_model,
            car_plate: request.car_plate,
            rating: request.rating,
            is_available: request.is_available,
        }
    }
}

/// Create driver routes
pub fn driver_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile))
        .route("/me", get(get_profile).patch(update_profile))
        .route("/available", get(list_available))
}

/// Create my driver profile
#[utoipa::path(
    post,
    path = "/drivers",
    tag = "Drivers",
    security(("bearer_auth" = [])),
    request_body = CreateDriverRequest,
    responses(
        (status = 201, description = "Profile created", body = DriverResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller lacks driver capability"),
        (status = 409, description = "Profile already exists")
    )
)]
pub async fn create_profile(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDriverRequest>,
) -> AppResult<(StatusCode, Json<DriverResponse>)> {
    let driver = state
        .driver_service
        .create_profile(&principal, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(DriverResponse::from(driver))))
}

/// Get my driver profile
#[utoipa::path(
    get,
    path = "/drivers/me",
    tag = "Drivers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Driver profile", body = DriverResponse),
        (status = 404, description = "No profile")
    )
)]
pub async fn get_profile(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
) -> AppResult<Json<DriverResponse>> {
    let driver = state.driver_service.get_profile(&principal).await?;
    Ok(Json(DriverResponse::from(driver)))
}

/// Update my driver profile
#[utoipa::path(
    patch,
    path = "/drivers/me",
    tag = "Drivers",
    security(("bearer_auth" = [])),
    request_body = UpdateDriverRequest,
    responses(
        (status = 200, description = "Updated profile", body = DriverResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No profile")
    )
)]
pub async fn update_profile(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateDriverRequest>,
) -> AppResult<Json<DriverResponse>> {
    let driver = state
        .driver_service
        .update_profile(&principal, payload.into())
        .await?;

    Ok(Json(DriverResponse::from(driver)))
}

/// List drivers currently accepting rides
#[utoipa::path(
    get,
    path = "/drivers/available",
    tag = "Drivers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Available drivers with their user accounts", body = Vec<DriverResponse>)
    )
)]
pub async fn list_available(State(state): State<AppState>) -> AppResult<Json<Vec<DriverResponse>>> {
    let available = state.driver_service.list_available().await?;
    Ok(Json(available.into_iter().map(DriverResponse::from).collect()))
}
