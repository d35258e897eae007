pub mod a001_integration;
pub mod a002_integration_item;
