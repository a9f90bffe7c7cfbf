pub mod tasks_handlers;
pub mod tasks_models;
