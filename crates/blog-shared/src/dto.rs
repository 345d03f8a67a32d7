//! Data Transfer Objects - request/response types for the API.
//!
//! JSON field names follow the API's Portuguese vocabulary (`titulo`,
//! `tema`, `usuario`, ...). Request fields are optional so that missing
//! values reach validation and come back as field errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a related record by id, e.g. `"tema": {"id": 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Post body for create and update. A client-sent `data` is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    pub id: Option<i64>,
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "texto")]
    pub body: Option<String>,
    #[serde(rename = "tema")]
    pub theme: Option<EntityRef>,
    #[serde(rename = "usuario")]
    pub user: Option<EntityRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "texto")]
    pub body: String,
    /// Last modification, set by the server.
    #[serde(rename = "data")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "tema")]
    pub theme: EntityRef,
    #[serde(rename = "usuario")]
    pub user: Option<EntityRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub id: Option<i64>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Posts filed under the theme. Only filled when a single theme is read.
    #[serde(rename = "postagem", default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostResponse>>,
}

/// Account body for registration and update. `senha` is plaintext.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRequest {
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "usuario")]
    pub login: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
}

/// Public view of an account. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub login: String,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "usuario", default)]
    pub login: String,
    #[serde(rename = "senha", default)]
    pub password: String,
}

/// Successful login: the account plus its access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub login: String,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    /// `"Bearer <jwt>"`, ready for the `Authorization` header.
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_uses_wire_names() {
        let json = r#"{
            "titulo": "Primeira postagem",
            "texto": "Texto da postagem",
            "data": "2020-01-01T00:00:00Z",
            "tema": {"id": 3}
        }"#;

        let req: PostRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.id, None);
        assert_eq!(req.title.as_deref(), Some("Primeira postagem"));
        assert_eq!(req.theme, Some(EntityRef { id: 3 }));
        assert_eq!(req.user, None);
    }

    #[test]
    fn test_empty_post_request_is_all_missing() {
        let req: PostRequest = serde_json::from_str("{}").unwrap();

        assert!(req.title.is_none());
        assert!(req.body.is_none());
        assert!(req.theme.is_none());
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let json = serde_json::to_value(UserResponse {
            id: 1,
            name: "Root".to_string(),
            login: "root@root.com".to_string(),
            photo: None,
        })
        .unwrap();

        assert_eq!(json["usuario"], "root@root.com");
        assert!(json.get("senha").is_none());
    }

    #[test]
    fn test_theme_response_posts_only_when_loaded() {
        let bare = serde_json::to_value(ThemeResponse {
            id: 1,
            description: "Programação em Rust".to_string(),
            posts: None,
        })
        .unwrap();
        assert!(bare.get("postagem").is_none());

        let loaded = serde_json::to_value(ThemeResponse {
            id: 1,
            description: "Programação em Rust".to_string(),
            posts: Some(Vec::new()),
        })
        .unwrap();
        assert_eq!(loaded["postagem"], serde_json::json!([]));
    }
}
