pub mod aggregate;

pub use aggregate::IntegrationItem;
