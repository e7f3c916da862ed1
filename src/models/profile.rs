use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
}

/// Resolved identity of the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_uses_backend_spelling() {
        assert_eq!(serde_json::to_value(Role::SuperAdmin).unwrap(), json!("SUPER_ADMIN"));
        let role: Role = serde_json::from_value(json!("ADMIN")).unwrap();
        assert_eq!(role, Role::Admin);
    }
}
