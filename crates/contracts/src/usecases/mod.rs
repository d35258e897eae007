pub mod u501_load_items;
pub mod u502_hubspot_oauth;
