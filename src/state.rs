//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::UserService;
use crate::infrastructure::persistence::PgUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PgUserRepository>>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService<PgUserRepository>>) -> Self {
        Self { user_service }
    }
}
