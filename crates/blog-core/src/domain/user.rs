use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, Validate, is_blank, is_email};

/// Minimum plaintext password length accepted on input.
pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 255;
const MAX_PHOTO_LEN: usize = 5000;

/// User entity - an account holder.
///
/// `password_hash` is an Argon2 PHC string and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub login: String,
    pub password_hash: String,
    pub photo: Option<String>,
}

/// User as received from a client. `password` is plaintext here.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub photo: Option<String>,
}

impl Validate for UserInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        match self.name.as_deref() {
            Some(name) if !is_blank(name) => {
                if name.chars().count() > MAX_NAME_LEN {
                    errors.push(FieldError::new(
                        "nome",
                        "O atributo nome deve conter no máximo 255 caracteres.",
                    ));
                }
            }
            _ => errors.push(FieldError::new("nome", "O atributo nome é obrigatório!")),
        }

        match self.login.as_deref() {
            Some(login) if !is_blank(login) => {
                if !is_email(login) {
                    errors.push(FieldError::new(
                        "usuario",
                        "O atributo usuário deve ser um email válido!",
                    ));
                }
            }
            _ => errors.push(FieldError::new(
                "usuario",
                "O atributo usuário é obrigatório!",
            )),
        }

        match self.password.as_deref() {
            Some(password) if !is_blank(password) => {
                if password.chars().count() < MIN_PASSWORD_LEN {
                    errors.push(FieldError::new(
                        "senha",
                        "A senha deve conter no mínimo 8 caracteres.",
                    ));
                }
            }
            _ => errors.push(FieldError::new("senha", "O atributo senha é obrigatório!")),
        }

        if let Some(photo) = self.photo.as_deref() {
            if photo.chars().count() > MAX_PHOTO_LEN {
                errors.push(FieldError::new(
                    "foto",
                    "O link da foto deve conter no máximo 5000 caracteres.",
                ));
            }
        }

        errors
    }
}

impl UserInput {
    /// Blank photo links are stored as absent.
    pub(crate) fn photo(&self) -> Option<String> {
        self.photo.clone().filter(|p| !is_blank(p))
    }
}
