//! User domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable user identifier.
pub type UserId = Uuid;

/// Person that tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Creates a user with a generated stable ID.
    ///
    /// Does not validate `email`; callers go through the tracker service.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, email)
    }

    /// Creates a user with a caller-provided ID.
    pub fn with_id(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }
}
