//! User reference data.
//!
//! Users are read-only for the engine: the board never creates or edits
//! them. The roster comes from configuration and identifies users by their
//! email, which is the key stored on tasks (`assignedTo`, `createdBy`).

use serde::{Deserialize, Serialize};

/// Role flag for a user. Admins see every task on the board; regular users
/// see their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    User,
}

/// A user known to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Find a user by email in a roster.
pub fn find_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|user| user.email == email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<User> {
        vec![
            User {
                id: "1".to_string(),
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                role: UserRole::Admin,
            },
            User {
                id: "2".to_string(),
                name: "Alex Kit".to_string(),
                email: "alex.kit@example.com".to_string(),
                role: UserRole::User,
            },
        ]
    }

    #[test]
    fn find_by_email_matches_exactly() {
        let users = roster();
        assert_eq!(
            find_by_email(&users, "alex.kit@example.com").map(|u| u.name.as_str()),
            Some("Alex Kit")
        );
        assert!(find_by_email(&users, "nobody@example.com").is_none());
    }

    #[test]
    fn role_serializes_as_upper_tokens() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
    }
}
