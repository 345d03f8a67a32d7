use std::sync::Arc;

use crate::domain::{NewUser, User, UserInput};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

use super::{ensure_valid, ensure_valid_update, not_found_as};

/// Returned when a login is already registered to another account.
pub const USER_EXISTS: &str = "O usuário já existe!";

const ENTITY: &str = "User";

/// User account use cases. Passwords are hashed before they reach the store.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    pub async fn register(&self, input: UserInput) -> Result<User, DomainError> {
        ensure_valid(&input)?;

        let login = input.login.clone().unwrap_or_default();
        if self.users.find_by_login(&login).await?.is_some() {
            return Err(DomainError::Duplicate(USER_EXISTS.to_string()));
        }

        let new = NewUser {
            name: input.name.clone().unwrap_or_default(),
            login,
            password_hash: self.hash(input.password.as_deref())?,
            photo: input.photo(),
        };

        self.users.insert(new).await.map_err(duplicate_login)
    }

    pub async fn update(&self, input: UserInput) -> Result<User, DomainError> {
        let id = ensure_valid_update(&input, input.id)?;

        if !self.users.exists(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }

        let login = input.login.clone().unwrap_or_default();
        if let Some(owner) = self.users.find_by_login(&login).await? {
            if owner.id != id {
                return Err(DomainError::Duplicate(USER_EXISTS.to_string()));
            }
        }

        let user = User {
            id,
            name: input.name.clone().unwrap_or_default(),
            login,
            password_hash: self.hash(input.password.as_deref())?,
            photo: input.photo(),
        };

        self.users.update(user).await.map_err(|err| match err {
            RepoError::NotFound => DomainError::not_found(ENTITY, id),
            other => duplicate_login(other),
        })
    }

    /// Delete an account. Posts it authored stay, detached from the author.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.users.delete(id).await.map_err(not_found_as(ENTITY, id))
    }

    fn hash(&self, password: Option<&str>) -> Result<String, DomainError> {
        self.passwords
            .hash(password.unwrap_or_default())
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

/// The unique index on login can still fire when two registrations race.
fn duplicate_login(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => DomainError::Duplicate(USER_EXISTS.to_string()),
        other => other.into(),
    }
}
