//! Authenticated caller handed to business operations.
//!
//! The HTTP layer builds an [`Actor`] from verified token claims; services
//! never look identity up on their own.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self { Self { id, role } }

    pub fn user(id: Uuid) -> Self { Self::new(id, UserRole::User) }

    pub fn admin(id: Uuid) -> Self { Self::new(id, UserRole::Admin) }

    pub fn is_admin(&self) -> bool { self.role == UserRole::Admin }
}
