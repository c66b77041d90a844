pub mod blog;
pub mod config;
pub mod csrf;
pub mod error;
pub mod mail;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;
