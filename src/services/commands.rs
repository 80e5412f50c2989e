//! Who may issue which ride command.
//!
//! Every (action, role) pair has exactly one row. Only `accept` is
//! restricted; `start`, `complete` and `cancel` are open to any
//! authenticated principal that can address the ride by id.

use crate::domain::{RideAction, Role};

/// Authorization policy for a ride command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Always refused with `Forbidden`
    Deny,
    /// Allowed once the principal's driver profile is resolved
    DriverProfile,
    /// No check beyond authentication
    Anyone,
}

const COMMAND_TABLE: [(RideAction, Role, Access); 8] = [
    (RideAction::Accept, Role::Client, Access::Deny),
    (RideAction::Accept, Role::Driver, Access::DriverProfile),
    (RideAction::Start, Role::Client, Access::Anyone),
    (RideAction::Start, Role::Driver, Access::Anyone),
    (RideAction::Complete, Role::Client, Access::Anyone),
    (RideAction::Complete, Role::Driver, Access::Anyone),
    (RideAction::Cancel, Role::Client, Access::Anyone),
    (RideAction::Cancel, Role::Driver, Access::Anyone),
];

/// Look up the policy for `action` issued by a principal with `role`
pub fn access_for(action: RideAction, role: Role) -> Access {
    COMMAND_TABLE
        .iter()
        .find(|(a, r, _)| *a == action && *r == role)
        .map(|(_, _, access)| *access)
        .unwrap_or(Access::Deny)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_has_exactly_one_row() {
        for action in RideAction::ALL {
            for role in [Role::Client, Role::Driver] {
                let rows = COMMAND_TABLE
                    .iter()
                    .filter(|(a, r, _)| *a == action && *r == role)
                    .count();
                assert_eq!(rows, 1, "{action} by {role}");
            }
        }
    }

    #[test]
    fn test_only_drivers_with_profile_accept() {
        assert_eq!(access_for(RideAction::Accept, Role::Client), Access::Deny);
        assert_eq!(
            access_for(RideAction::Accept, Role::Driver),
            Access::DriverProfile
        );
    }

    #[test]
    fn test_other_commands_are_unchecked() {
        for action in [RideAction::Start, RideAction::Complete, RideAction::Cancel] {
            assert_eq!(access_for(action, Role::Client), Access::Anyone);
            assert_eq!(access_for(action, Role::Driver), Access::Anyone);
        }
    }
}
