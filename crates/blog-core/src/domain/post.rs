use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, TextRule, Validate};

const TITLE: TextRule = TextRule {
    field: "titulo",
    min: 5,
    max: 100,
    required_message: "O atributo título é obrigatório!",
    size_message: "O atributo título deve conter no mínimo 5 e no máximo 100 caracteres.",
};

const BODY: TextRule = TextRule {
    field: "texto",
    min: 10,
    max: 1000,
    required_message: "O atributo texto é obrigatório!",
    size_message: "O atributo texto deve conter no mínimo 10 e no máximo 1000 caracteres.",
};

/// Post entity - a blog entry filed under a theme.
///
/// Related rows are referenced by id only and never loaded with the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub updated_at: DateTime<Utc>,
    pub theme_id: i64,
    pub user_id: Option<i64>,
}

/// A validated post that has not been stored yet. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub updated_at: DateTime<Utc>,
    pub theme_id: i64,
    pub user_id: Option<i64>,
}

/// Post as received from a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub theme_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl Validate for PostInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        TITLE.check(self.title.as_deref(), &mut errors);
        BODY.check(self.body.as_deref(), &mut errors);
        if self.theme_id.is_none() {
            errors.push(FieldError::new("tema", "O atributo tema é obrigatório!"));
        }
        errors
    }
}

impl PostInput {
    /// Builds the insert record, discarding any client-supplied id.
    ///
    /// Call only after [`Validate::validate`] returned no errors.
    pub(crate) fn into_new(self, now: DateTime<Utc>) -> NewPost {
        NewPost {
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            updated_at: now,
            theme_id: self.theme_id.unwrap_or_default(),
            user_id: self.user_id,
        }
    }

    /// Builds the full replacement record for an existing post.
    pub(crate) fn into_post(self, id: i64, now: DateTime<Utc>) -> Post {
        let new = self.into_new(now);
        Post {
            id,
            title: new.title,
            body: new.body,
            updated_at: new.updated_at,
            theme_id: new.theme_id,
            user_id: new.user_id,
        }
    }
}
