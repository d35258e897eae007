pub mod aggregate;

pub use aggregate::{credentials_present, IntegrationParams, Provider};
