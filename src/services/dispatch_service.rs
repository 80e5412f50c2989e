//! Dispatch service - ride creation, listing and lifecycle commands.
//!
//! A command runs as: fetch the ride by id, check the command table,
//! resolve the acting driver where needed, apply the transition in memory,
//! then persist with a compare-and-swap on the status that was read.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::commands::{access_for, Access};
use crate::domain::{Driver, NewRide, Principal, Ride, RideAction};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

const ACCEPT_DENIED: &str = "Only drivers can accept rides";

/// Dispatch service trait for dependency injection.
#[async_trait]
pub trait DispatchService: Send + Sync {
    /// Price and persist a new ride requested by `principal`
    async fn create_ride(&self, principal: &Principal, request: NewRide) -> AppResult<Ride>;

    /// Drivers see rides assigned to their profile, clients see rides they
    /// requested. Newest first.
    async fn list_rides(&self, principal: &Principal) -> AppResult<Vec<Ride>>;

    /// One ride from the principal's listing scope
    async fn get_ride(&self, principal: &Principal, ride_id: Uuid) -> AppResult<Ride>;

    /// Run a lifecycle command against a ride
    async fn execute(
        &self,
        principal: &Principal,
        ride_id: Uuid,
        action: RideAction,
    ) -> AppResult<Ride>;

    async fn accept(&self, principal: &Principal, ride_id: Uuid) -> AppResult<Ride> {
        self.execute(principal, ride_id, RideAction::Accept).await
    }

    async fn start(&self, principal: &Principal, ride_id: Uuid) -> AppResult<Ride> {
        self.execute(principal, ride_id, RideAction::Start).await
    }

    async fn complete(&self, principal: &Principal, ride_id: Uuid) -> AppResult<Ride> {
        self.execute(principal, ride_id, RideAction::Complete).await
    }

    async fn cancel(&self, principal: &Principal, ride_id: Uuid) -> AppResult<Ride> {
        self.execute(principal, ride_id, RideAction::Cancel).await
    }
}

/// Concrete implementation of DispatchService using Unit of Work.
pub struct RideDispatcher<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RideDispatcher<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn driver_profile(&self, principal: &Principal) -> AppResult<Option<Driver>> {
        self.uow.drivers().find_by_user_id(principal.id).await
    }

    /// Resolve the acting driver according to the command table
    async fn authorize(
        &self,
        principal: &Principal,
        action: RideAction,
    ) -> AppResult<Option<Driver>> {
        match access_for(action, principal.role()) {
            Access::Deny => Err(AppError::forbidden(ACCEPT_DENIED)),
            Access::DriverProfile => self
                .driver_profile(principal)
                .await?
                .ok_or_not_found("Driver profile")
                .map(Some),
            Access::Anyone => Ok(None),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> DispatchService for RideDispatcher<U> {
    async fn create_ride(&self, principal: &Principal, request: NewRide) -> AppResult<Ride> {
        let ride = Ride::request(principal.id, request)?;
        let ride = self.uow.rides().create(&ride).await?;

        tracing::info!(
            ride_id = %ride.id,
            client_id = %principal.id,
            distance_km = ride.distance_km,
            price = %ride.price,
            "Ride requested"
        );
        Ok(ride)
    }

    async fn list_rides(&self, principal: &Principal) -> AppResult<Vec<Ride>> {
        if principal.is_driver {
            match self.driver_profile(principal).await? {
                Some(driver) => self.uow.rides().list_by_driver(driver.id).await,
                None => Ok(Vec::new()),
            }
        } else {
            self.uow.rides().list_by_client(principal.id).await
        }
    }

    async fn get_ride(&self, principal: &Principal, ride_id: Uuid) -> AppResult<Ride> {
        let ride = self
            .uow
            .rides()
            .find_by_id(ride_id)
            .await?
            .ok_or_not_found("Ride")?;

        let visible = if principal.is_driver {
            self.driver_profile(principal)
                .await?
                .is_some_and(|driver| ride.is_assigned_to(driver.id))
        } else {
            ride.client_id == principal.id
        };

        if visible {
            Ok(ride)
        } else {
            Err(AppError::NotFound("Ride".to_string()))
        }
    }

    async fn execute(
        &self,
        principal: &Principal,
        ride_id: Uuid,
        action: RideAction,
    ) -> AppResult<Ride> {
        let rides = self.uow.rides();
        let mut ride = rides.find_by_id(ride_id).await?.ok_or_not_found("Ride")?;

        let driver = self.authorize(principal, action).await?;

        let transition = match action {
            RideAction::Accept => {
                let driver = driver.ok_or_else(|| AppError::forbidden(ACCEPT_DENIED))?;
                ride.accept(&driver)
            }
            RideAction::Start => ride.start(),
            RideAction::Complete => ride.complete(),
            RideAction::Cancel => ride.cancel(),
        }
        .inspect_err(|err| {
            tracing::debug!(ride_id = %ride_id, actor = %principal.id, "Rejected: {}", err);
        })?;

        let saved = match rides.update_status(&ride, transition.from).await {
            Ok(saved) => saved,
            Err(err @ AppError::Conflict(_)) => {
                tracing::warn!(
                    ride_id = %ride_id,
                    action = %action,
                    expected = %transition.from,
                    actor = %principal.id,
                    "Lost compare-and-swap on ride status"
                );
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        tracing::info!(
            ride_id = %saved.id,
            action = %action,
            from = %transition.from,
            to = %transition.to,
            actor = %principal.id,
            "Ride transition applied"
        );
        Ok(saved)
    }
}
