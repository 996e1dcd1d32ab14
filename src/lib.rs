pub mod configuration;
pub mod errors;
pub mod models;
pub mod modules;
pub mod routes;
pub mod state;
pub mod store;
