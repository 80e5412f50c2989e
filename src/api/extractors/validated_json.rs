//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON and rule violations both become `AppError::Validation`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// One message per violated rule, ordered by field name
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::ride_handler::CreateRideRequest;

    fn request(pickup_lat: f64, dropoff_lng: f64) -> CreateRideRequest {
        CreateRideRequest {
            pickup_location: "Piața Unirii".to_string(),
            pickup_lat,
            pickup_lng: 26.1,
            dropoff_location: "Aeroportul Otopeni".to_string(),
            dropoff_lat: 44.57,
            dropoff_lng,
            distance_km: 16.5,
        }
    }

    #[test]
    fn test_coordinates_out_of_range_are_reported_in_field_order() {
        let errors = request(91.0, -181.0).validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "dropoff_lng must be within [-180, 180], pickup_lat must be within [-90, 90]"
        );
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request(44.42, 26.08).validate().is_ok());
    }
}
