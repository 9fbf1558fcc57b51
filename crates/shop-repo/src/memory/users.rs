use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use shop_types::domain::user::{normalize_email, User, UserRecord};
use shop_types::ports::user_repository::UserRepository;
use shop_types::ports::RepoError;

use super::InMemoryRepo;

#[async_trait]
impl UserRepository for InMemoryRepo {
    async fn create_user(&self, record: UserRecord) -> Result<bool, RepoError> {
        match self.users.entry(normalize_email(&record.user.email)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(true)
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError> {
        Ok(self.users.get(&normalize_email(email)).map(|r| r.clone()))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .iter()
            .find(|kv| kv.value().user.id == id)
            .map(|kv| kv.value().user.clone()))
    }

    async fn create_session(&self, token: String, user_id: String) -> Result<(), RepoError> {
        self.sessions.insert(token, user_id);
        Ok(())
    }

    async fn session_user(&self, token: &str) -> Result<Option<User>, RepoError> {
        let user_id = match self.sessions.get(token) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        self.get_user(&user_id).await
    }

    async fn revoke_session(&self, token: &str) -> Result<bool, RepoError> {
        Ok(self.sessions.remove(token).is_some())
    }
}
