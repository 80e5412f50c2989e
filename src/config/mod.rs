//! Configuration loaded from the environment, plus service-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
