pub mod api_client;
pub mod config;
pub mod datetime;
pub mod error;
pub mod form;
pub mod model;
pub mod page;
