//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{PosCatalogue, UserDirectory};

/// Service handles shared across workers.
#[derive(Clone)]
pub struct AppState {
    users: Arc<dyn UserDirectory>,
    pos: Arc<dyn PosCatalogue>,
}

impl AppState {
    /// Bundle the driving-port implementations used by the handlers.
    pub fn new(users: Arc<dyn UserDirectory>, pos: Arc<dyn PosCatalogue>) -> Self {
        Self { users, pos }
    }

    /// User operations.
    pub fn users(&self) -> &dyn UserDirectory {
        self.users.as_ref()
    }

    /// Point-of-sale operations.
    pub fn pos(&self) -> &dyn PosCatalogue {
        self.pos.as_ref()
    }
}
