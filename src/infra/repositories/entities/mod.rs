//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod driver;
pub mod ride;
pub mod user;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use driver::{ActiveModel as DriverActiveModel, Entity as DriverEntity, Model as DriverModel};
#[allow(unused_imports)]
pub use ride::{ActiveModel as RideActiveModel, Entity as RideEntity, Model as RideModel};
#[allow(unused_imports)]
pub use user::{Entity as UserEntity, Model as UserModel};
