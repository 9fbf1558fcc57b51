use async_trait::async_trait;

use crate::domain::user::{User, UserRecord};
use crate::ports::RepoError;

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Returns false when the email is already registered.
    async fn create_user(&self, record: UserRecord) -> Result<bool, RepoError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError>;
    async fn get_user(&self, id: &str) -> Result<Option<User>, RepoError>;

    async fn create_session(&self, token: String, user_id: String) -> Result<(), RepoError>;
    async fn session_user(&self, token: &str) -> Result<Option<User>, RepoError>;
    async fn revoke_session(&self, token: &str) -> Result<bool, RepoError>;
}
