//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{driver_handler, ride_handler, user_handler};
use crate::domain::{DriverResponse, RideAction, RideResponse, RideStatus, Role, UserResponse};
use crate::services::TokenResponse;

/// OpenAPI documentation for the ride dispatch service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ride Dispatch",
        version = "0.1.0",
        description = "Ride requests, driver profiles and the ride lifecycle",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Ride endpoints
        ride_handler::create_ride,
        ride_handler::list_rides,
        ride_handler::get_ride,
        ride_handler::accept_ride,
        ride_handler::start_ride,
        ride_handler::complete_ride,
        ride_handler::cancel_ride,
        // Driver endpoints
        driver_handler::create_profile,
        driver_handler::get_profile,
        driver_handler::update_profile,
        driver_handler::list_available,
        // User endpoints
        user_handler::get_current_user,
    ),
    components(
        schemas(
            // Domain types
            RideStatus,
            RideAction,
            RideResponse,
            DriverResponse,
            Role,
            UserResponse,
            TokenResponse,
            // Request bodies
            ride_handler::CreateRideRequest,
            driver_handler::CreateDriverRequest,
            driver_handler::UpdateDriverRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Rides", description = "Ride requests and lifecycle commands"),
        (name = "Drivers", description = "Driver profiles"),
        (name = "Users", description = "Current user")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_ride_command_is_documented() {
        let doc = ApiDoc::openapi();
        for action in RideAction::ALL {
            let path = format!("/rides/{{id}}/{action}");
            assert!(doc.paths.paths.contains_key(&path), "missing {path}");
        }
    }
}
