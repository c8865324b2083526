//! User lookup.

pub mod memory;

pub use memory::InMemoryUserDirectory;

use async_trait::async_trait;

use tokenward_core::result::AppResult;
use tokenward_core::types::UserId;
use tokenward_entity::user::ApplicationUser;

/// Source of truth for user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by id. An unknown id is `Ok(None)`.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<ApplicationUser>>;
}
