use serde::{Deserialize, Serialize};

use super::Post;
use crate::validation::{FieldError, TextRule, Validate};

const DESCRIPTION: TextRule = TextRule {
    field: "descricao",
    min: 10,
    max: 100,
    required_message: "O atributo descrição é obrigatório!",
    size_message: "O atributo descrição deve conter no mínimo 10 e no máximo 100 caracteres.",
};

/// Theme entity - a topic grouping posts. Deleting a theme deletes its posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub description: String,
}

/// A theme together with the posts filed under it.
#[derive(Debug, Clone)]
pub struct ThemeWithPosts {
    pub theme: Theme,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone)]
pub struct NewTheme {
    pub description: String,
}

/// Theme as received from a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct ThemeInput {
    pub id: Option<i64>,
    pub description: Option<String>,
}

impl Validate for ThemeInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        DESCRIPTION.check(self.description.as_deref(), &mut errors);
        errors
    }
}

impl ThemeInput {
    pub(crate) fn into_new(self) -> NewTheme {
        NewTheme {
            description: self.description.unwrap_or_default(),
        }
    }

    pub(crate) fn into_theme(self, id: i64) -> Theme {
        Theme {
            id,
            description: self.description.unwrap_or_default(),
        }
    }
}
