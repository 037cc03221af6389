//! # User Model

use serde::{Deserialize, Serialize};

/// A user as served by the API
///
/// Only the id and display name are kept; every other field the server
/// sends (email, address, company...) is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_should_ignore_extra_server_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"city": "Gwenborough"}
        }))
        .unwrap();

        assert_eq!(user, User::new(1, "Leanne Graham"));
    }
}
