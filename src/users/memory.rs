use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::repo::UserStore;
use super::repo_types::{StoreError, User, UserId};

/// In-process store with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<UserId, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let taken = rows.iter().any(|u| {
            u.username == username || u.email == email || u.password_hash == password_hash
        });
        if taken {
            return Err(StoreError::Conflict);
        }
        let id = rows.len() as UserId + 1;
        rows.push(User {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.username == username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_user_can_be_found() {
        let store = MemoryUserStore::default();
        let id = store.create("alice", "h1", "a@x.com").await.unwrap();
        let user = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@x.com");
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn any_duplicate_column_conflicts() {
        let store = MemoryUserStore::default();
        store.create("alice", "h1", "a@x.com").await.unwrap();
        for (u, p, e) in [
            ("alice", "h2", "b@x.com"),
            ("bob", "h1", "b@x.com"),
            ("bob", "h2", "a@x.com"),
        ] {
            let err = store.create(u, p, e).await.unwrap_err();
            assert!(matches!(err, StoreError::Conflict));
        }
        assert_eq!(store.len(), 1);
    }
}
