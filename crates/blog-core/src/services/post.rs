use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Post, PostInput};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, ThemeRepository, UserRepository};

use super::{ensure_valid, ensure_valid_update, not_found_as};

/// Returned when a post references a theme that is not stored.
pub const THEME_MISSING: &str = "O tema não existe!";
/// Returned when a post references an author that is not stored.
pub const USER_MISSING: &str = "O usuário não existe!";

const ENTITY: &str = "Post";

/// Post use cases.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    themes: Arc<dyn ThemeRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        themes: Arc<dyn ThemeRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            themes,
            users,
        }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    /// Case-insensitive substring search over titles.
    pub async fn search_by_title(&self, text: &str) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all_by_title_containing(text).await?)
    }

    /// Store a new post. Any client-supplied id is ignored and the
    /// timestamp is set here.
    pub async fn create(&self, input: PostInput) -> Result<Post, DomainError> {
        ensure_valid(&input)?;

        let new = input.into_new(Utc::now());
        let (theme_id, user_id) = (new.theme_id, new.user_id);
        self.ensure_references(theme_id, user_id).await?;

        match self.posts.insert(new).await {
            Ok(post) => Ok(post),
            Err(RepoError::ForeignKey(_)) => Err(self.missing_reference(theme_id, user_id).await),
            Err(other) => Err(other.into()),
        }
    }

    /// Replace an existing post. The stored row is untouched on any failure.
    pub async fn update(&self, input: PostInput) -> Result<Post, DomainError> {
        let id = ensure_valid_update(&input, input.id)?;

        if !self.posts.exists(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }

        let post = input.into_post(id, Utc::now());
        let (theme_id, user_id) = (post.theme_id, post.user_id);
        self.ensure_references(theme_id, user_id).await?;

        match self.posts.update(post).await {
            Ok(post) => Ok(post),
            Err(RepoError::ForeignKey(_)) => Err(self.missing_reference(theme_id, user_id).await),
            Err(other) => Err(not_found_as(ENTITY, id)(other)),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(not_found_as(ENTITY, id))
    }

    async fn ensure_references(
        &self,
        theme_id: i64,
        user_id: Option<i64>,
    ) -> Result<(), DomainError> {
        if !self.themes.exists(theme_id).await? {
            return Err(DomainError::MissingReference(THEME_MISSING));
        }

        if let Some(user_id) = user_id {
            if !self.users.exists(user_id).await? {
                return Err(DomainError::MissingReference(USER_MISSING));
            }
        }

        Ok(())
    }

    /// The store rejected a reference that passed [`Self::ensure_references`],
    /// so the row went away in between. Name the one that is gone now.
    async fn missing_reference(&self, theme_id: i64, user_id: Option<i64>) -> DomainError {
        match self.ensure_references(theme_id, user_id).await {
            Err(err) => err,
            Ok(()) => DomainError::MissingReference(THEME_MISSING),
        }
    }
}
