#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Account registration and login, stateless bearer-token verification,"]
#![doc = "and an ownership-scoped task lifecycle. Business logic, domain models,"]
#![doc = "the auth guard, routing configuration, and error handling all live"]
#![doc = "here; the main binary only wires a store backend and runs the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
