pub mod auth;
pub mod error;
pub mod models;
pub mod policy;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;
