//! Application state shared across handlers

use crate::{repositories::UserRepository, service::UserManager};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_manager: UserManager,
}

impl AppState {
    /// Build the state around a repository
    pub fn new(repository: UserRepository) -> Self {
        Self {
            user_manager: UserManager::new(repository),
        }
    }
}
