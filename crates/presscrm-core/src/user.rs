use crate::types::{UserRole, UserTeam};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person acting on leads. Reference data: created once, never mutated by
/// the workflow rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: UserRole,
    pub team: UserTeam,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        team: UserTeam,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            role,
            team,
            created_at,
        }
    }

    /// Initials shown in place of a missing avatar.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_from_name() {
        let user = User::new(
            "u2",
            "Sarah Sales",
            "sarah@example.com",
            UserRole::TeleSales,
            UserTeam::Sales,
            Utc::now(),
        );
        assert_eq!(user.initials(), "SS");
    }

    #[test]
    fn avatar_omitted_when_absent() {
        let user = User::new(
            "u1",
            "John Admin",
            "admin@example.com",
            UserRole::SuperAdmin,
            UserTeam::Management,
            Utc::now(),
        );
        let yaml = serde_yaml::to_string(&user).unwrap();
        assert!(!yaml.contains("avatar"));
        assert!(yaml.contains("role: super_admin"));
        assert!(yaml.contains("team: Management"));
    }
}
