pub mod a001_integration_item;
pub mod a002_hubspot_connection;
