use std::sync::Arc;

use crate::domain::User;
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};
use crate::validation::is_blank;

/// An authenticated account, carrying the stored hash for comparison.
#[derive(Debug, Clone)]
pub struct Principal {
    user: User,
}

impl Principal {
    pub fn username(&self) -> &str {
        &self.user.login
    }

    pub fn password_hash(&self) -> &str {
        &self.user.password_hash
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }
}

/// Login request contents.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_in: i64,
}

/// Username/password to token exchange, and token to principal resolution.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Resolve a login to its stored account.
    pub async fn load_by_username(&self, username: &str) -> Result<Principal, AuthError> {
        if is_blank(username) {
            return Err(AuthError::BlankUsername);
        }

        match self.users.find_by_login(username).await? {
            Some(user) => Ok(Principal { user }),
            None => Err(AuthError::UserNotFound(username.to_string())),
        }
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        let principal = self.load_by_username(&credentials.login).await?;

        if !self
            .passwords
            .verify(&credentials.password, principal.password_hash())?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let user = principal.into_user();
        let token = self.tokens.generate_token(user.id, &user.login)?;

        Ok(Session {
            user,
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    /// Validate a bearer token and load the account it was issued to.
    ///
    /// Tokens of deleted accounts, or issued before a login change, are
    /// rejected.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.tokens.validate_token(token)?;
        let principal = self.load_by_username(&claims.email).await?;

        if principal.user.id != claims.user_id {
            return Err(AuthError::InvalidToken("subject mismatch".to_string()));
        }

        Ok(principal)
    }
}
