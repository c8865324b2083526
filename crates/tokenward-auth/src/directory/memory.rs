//! In-process user directory.

use async_trait::async_trait;
use dashmap::DashMap;

use tokenward_core::result::AppResult;
use tokenward_core::types::UserId;
use tokenward_entity::user::ApplicationUser;

use super::UserDirectory;

/// A [`UserDirectory`] backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<UserId, ApplicationUser>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user, returning the previous record.
    pub fn insert(&self, user: ApplicationUser) -> Option<ApplicationUser> {
        self.users.insert(user.id, user)
    }

    /// Remove a user, returning the removed record.
    pub fn remove(&self, id: UserId) -> Option<ApplicationUser> {
        self.users.remove(&id).map(|(_, user)| user)
    }
}

impl FromIterator<ApplicationUser> for InMemoryUserDirectory {
    fn from_iter<I: IntoIterator<Item = ApplicationUser>>(iter: I) -> Self {
        let directory = Self::new();
        for user in iter {
            directory.insert(user);
        }
        directory
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<ApplicationUser>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}
