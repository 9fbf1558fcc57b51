use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// A user plus the credential we check at login. Never serialized.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Returned by login and register; `token` goes in `Authorization: Bearer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl User {
    pub fn new(id: String, name: String, email: String, is_admin: bool) -> anyhow::Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("name empty");
        }
        if !email.contains('@') {
            anyhow::bail!("invalid email");
        }
        Ok(Self {
            id,
            name,
            email: normalize_email(&email),
            is_admin,
        })
    }
}

/// Emails are compared trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_normalizes_email() {
        let user = User::new(
            "user1".into(),
            "John Doe".into(),
            " User@Example.com ".into(),
            false,
        )
        .unwrap();
        assert_eq!(user.email, "user@example.com");
    }

    #[test]
    fn validation_errors() {
        assert!(User::new("u".into(), "".into(), "a@b.com".into(), false).is_err());
        assert!(User::new("u".into(), "Ann".into(), "invalid".into(), false).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let user = User::new("admin1".into(), "Admin User".into(), "admin@example.com".into(), true)
            .unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["isAdmin"], serde_json::json!(true));
    }
}
