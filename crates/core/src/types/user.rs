//! User records.

use serde::{Deserialize, Serialize};

use super::UserId;
use crate::store::Record;

/// Name given to a user created without one.
pub const DEFAULT_USER_NAME: &str = "新用户";

/// A user in the mock store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: i64,
    pub email: String,
}

impl User {
    /// Create a user with every field given.
    #[must_use]
    pub fn new(id: i64, name: &str, age: i64, email: &str) -> Self {
        Self {
            id: UserId::new(id),
            name: name.to_string(),
            age,
            email: email.to_string(),
        }
    }
}

/// Client-supplied user fields for create (POST) and merge (PUT).
///
/// Absent and `null` fields are both `None`. Unknown keys, including `id`,
/// are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFields {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
}

impl Record for User {
    type Id = UserId;
    type Fields = UserFields;

    fn id(&self) -> UserId {
        self.id
    }

    fn create(id: UserId, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name.unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            age: fields.age.unwrap_or(0),
            email: fields.email.unwrap_or_default(),
        }
    }

    fn merge(&mut self, fields: UserFields) {
        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(age) = fields.age {
            self.age = age;
        }
        if let Some(email) = fields.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_applies_defaults() {
        let user = User::create(UserId::new(4), UserFields::default());
        assert_eq!(user, User::new(4, DEFAULT_USER_NAME, 0, ""));
    }

    #[test]
    fn test_fields_ignore_id_and_unknown_keys() {
        let fields: UserFields =
            serde_json::from_str(r#"{"id": 99, "name": "Zed", "nickname": "z"}"#).unwrap();
        assert_eq!(
            fields,
            UserFields {
                name: Some("Zed".to_string()),
                ..UserFields::default()
            }
        );
    }

    #[test]
    fn test_fields_reject_wrong_types() {
        let result = serde_json::from_str::<UserFields>(r#"{"age": "forty"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_only_overwrites_present_fields() {
        let mut user = User::new(1, "张三", 25, "zhangsan@example.com");
        user.merge(UserFields {
            age: Some(26),
            ..UserFields::default()
        });
        assert_eq!(user, User::new(1, "张三", 26, "zhangsan@example.com"));
    }
}
