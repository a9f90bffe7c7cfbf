// src/routes.rs

pub mod auth;
pub mod routes;
pub mod tasks;
