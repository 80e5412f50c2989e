//! Ride lifecycle state machine.
//!
//! ```text
//! requested -> accepted -> in_progress -> completed
//!     \___________\______________\______> cancelled
//! ```
//!
//! Transitions mutate the ride in memory only. The returned [`Transition`]
//! records the status the ride was read with, which the store compares
//! against before persisting.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::driver::Driver;
use super::error::{DomainError, DomainResult};
use super::ride::{Ride, RideStatus};

/// Actions that move a ride through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RideAction {
    Accept,
    Start,
    Complete,
    Cancel,
}

impl RideAction {
    pub const ALL: [RideAction; 4] = [
        RideAction::Accept,
        RideAction::Start,
        RideAction::Complete,
        RideAction::Cancel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RideAction::Accept => "accept",
            RideAction::Start => "start",
            RideAction::Complete => "complete",
            RideAction::Cancel => "cancel",
        }
    }

    /// Status reached by applying this action from `current`, if legal.
    pub fn target(&self, current: RideStatus) -> Option<RideStatus> {
        use RideStatus::*;

        match (self, current) {
            (RideAction::Accept, Requested) => Some(Accepted),
            (RideAction::Start, Accepted) => Some(InProgress),
            (RideAction::Complete, InProgress) => Some(Completed),
            (RideAction::Cancel, Requested | Accepted | InProgress) => Some(Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for RideAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status change applied to a ride
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: RideAction,
    pub from: RideStatus,
    pub to: RideStatus,
}

impl Ride {
    /// Assign `driver` and move a requested ride to accepted.
    pub fn accept(&mut self, driver: &Driver) -> DomainResult<Transition> {
        let transition = self.plan(RideAction::Accept)?;
        self.driver_id = Some(driver.id);
        Ok(self.commit(transition))
    }

    pub fn start(&mut self) -> DomainResult<Transition> {
        self.apply(RideAction::Start)
    }

    pub fn complete(&mut self) -> DomainResult<Transition> {
        self.apply(RideAction::Complete)
    }

    /// Cancel a ride that has not finished. An assigned driver is kept.
    pub fn cancel(&mut self) -> DomainResult<Transition> {
        self.apply(RideAction::Cancel)
    }

    /// Whether `driver_id` is the driver assigned to this ride
    pub fn is_assigned_to(&self, driver_id: Uuid) -> bool {
        self.driver_id == Some(driver_id)
    }

    fn apply(&mut self, action: RideAction) -> DomainResult<Transition> {
        let transition = self.plan(action)?;
        Ok(self.commit(transition))
    }

    fn plan(&self, action: RideAction) -> DomainResult<Transition> {
        let to = action
            .target(self.status)
            .ok_or(DomainError::InvalidTransition {
                action,
                current: self.status,
            })?;

        Ok(Transition {
            action,
            from: self.status,
            to,
        })
    }

    fn commit(&mut self, transition: Transition) -> Transition {
        self.status = transition.to;
        self.updated_at = Utc::now();
        transition
    }
}
