//! Password login and bearer-token sessions.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use shop_types::domain::user::{AuthSession, User, UserRecord};
use shop_types::ports::user_repository::UserRepository;
use uuid::Uuid;

use crate::errors::AppError;

/// Minimum password length for self-registered accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

pub struct AuthService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let record = self
            .repo
            .find_user_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;
        verify_password(password, &record.password_hash)?;
        tracing::info!(user_id = %record.user.id, "login");
        self.open_session(record.user).await
    }

    pub async fn register(
        &self,
        name: String,
        email: String,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        let user = User::new(Uuid::new_v4().to_string(), name, email, false)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let record = UserRecord {
            user: user.clone(),
            password_hash: hash_password(password)?,
        };
        if !self.repo.create_user(record).await? {
            return Err(AppError::Conflict(format!(
                "email {} already registered",
                user.email
            )));
        }
        tracing::info!(user_id = %user.id, "user registered");
        self.open_session(user).await
    }

    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        if self.repo.revoke_session(token).await? {
            Ok(())
        } else {
            Err(AppError::Unauthorized("unknown session".into()))
        }
    }

    pub async fn current_user(&self, token: &str) -> Result<User, AppError> {
        self.repo
            .session_user(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid or expired session".into()))
    }

    async fn open_session(&self, user: User) -> Result<AuthSession, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        self.repo
            .create_session(token.clone(), user.id.clone())
            .await?;
        Ok(AuthSession { token, user })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hash: {e}")))
}

fn verify_password(password: &str, hash: &str) -> Result<(), AppError> {
    let parsed = PasswordHash::new(hash).map_err(|_| invalid_credentials())?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| invalid_credentials())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_repo::memory::InMemoryRepo;

    #[tokio::test]
    async fn register_login_me_logout() {
        let svc = AuthService::new(InMemoryRepo::new());
        let registered = svc
            .register("Ann".into(), "ann@example.com".into(), "hunter2hunter2")
            .await
            .unwrap();
        assert!(!registered.user.is_admin);

        let session = svc
            .login("ANN@example.com", "hunter2hunter2")
            .await
            .unwrap();
        assert_ne!(session.token, registered.token);
        assert_eq!(
            svc.current_user(&session.token).await.unwrap(),
            registered.user
        );

        svc.logout(&session.token).await.unwrap();
        assert!(matches!(
            svc.current_user(&session.token).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.logout(&session.token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email() {
        let svc = AuthService::new(InMemoryRepo::new());
        svc.register("Ann".into(), "ann@example.com".into(), "correct horse")
            .await
            .unwrap();
        assert!(matches!(
            svc.login("ann@example.com", "wrong").await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.login("bob@example.com", "correct horse").await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn register_validation() {
        let svc = AuthService::new(InMemoryRepo::new());
        assert!(matches!(
            svc.register("Ann".into(), "ann@example.com".into(), "short")
                .await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            svc.register("Ann".into(), "not-an-email".into(), "long enough")
                .await,
            Err(AppError::BadRequest(_))
        ));
        svc.register("Ann".into(), "ann@example.com".into(), "long enough")
            .await
            .unwrap();
        assert!(matches!(
            svc.register("Ann 2".into(), "ann@example.com".into(), "long enough")
                .await,
            Err(AppError::Conflict(_))
        ));
    }
}
