use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RecordId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref(), self.username.as_deref(), "Student")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Admin {
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref(), self.username.as_deref(), "Administrator")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "roleName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdminRole {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed role")
    }
}

fn display_name<'a>(name: Option<&'a str>, username: Option<&'a str>, fallback: &'a str) -> &'a str {
    name.filter(|s| !s.trim().is_empty())
        .or_else(|| username.filter(|s| !s.trim().is_empty()))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_display_name() {
        let user: User = serde_json::from_str(r#"{"id":1,"username":"jdoe"}"#).unwrap();
        assert_eq!(user.display_name(), "jdoe");
        assert_eq!(User::default().display_name(), "Student");
    }

    #[test]
    fn test_admin_role_alias() {
        let role: AdminRole = serde_json::from_str(r#"{"id":2,"roleName":"EDITOR"}"#).unwrap();
        assert_eq!(role.display_name(), "EDITOR");
        assert_eq!(Admin::default().display_name(), "Administrator");
    }
}
