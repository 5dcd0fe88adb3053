//! Users API service
//!
//! A REST API over an in-memory collection of users and their nested
//! addresses. Requests flow from [`routes`] through the [`service`] layer,
//! which redacts passwords, down to the [`repositories`] store.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod state;

use common::ServerConfig;

use crate::{repositories::UserRepository, state::AppState};

/// Build the application router for a configuration
pub fn app(config: &ServerConfig) -> axum::Router {
    let repository = if config.seed_data {
        UserRepository::with_seed_data()
    } else {
        UserRepository::new()
    };

    routes::create_router(AppState::new(repository))
}
