use async_trait::async_trait;

use crate::domain::{NewPost, NewTheme, NewUser, Post, Theme, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `T` is the stored entity, `N` the record inserted before the store
/// assigns an id. All entities use an `i64` surrogate key.
#[async_trait]
pub trait BaseRepository<T, N>: Send + Sync
where
    T: Send + 'static,
    N: Send + 'static,
{
    /// All stored entities, ordered by id.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError>;

    /// Whether a row with this id exists.
    async fn exists(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Insert a new entity and return it with its assigned id.
    async fn insert(&self, new: N) -> Result<T, RepoError>;

    /// Replace every column of an existing entity.
    ///
    /// Returns [`RepoError::NotFound`] when no row has the entity's id.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost> {
    /// Posts whose title contains `text`, ignoring case.
    async fn find_all_by_title_containing(&self, text: &str) -> Result<Vec<Post>, RepoError>;

    /// Posts filed under a theme, ordered by id.
    async fn find_all_by_theme(&self, theme_id: i64) -> Result<Vec<Post>, RepoError>;
}

/// Theme repository.
#[async_trait]
pub trait ThemeRepository: BaseRepository<Theme, NewTheme> {
    /// Themes whose description contains `text`, ignoring case.
    async fn find_all_by_description_containing(
        &self,
        text: &str,
    ) -> Result<Vec<Theme>, RepoError>;

    /// Delete a theme and every post filed under it in one transaction.
    ///
    /// Returns the number of posts removed, or [`RepoError::NotFound`] when
    /// the theme does not exist (in which case nothing is deleted).
    async fn delete_with_posts(&self, id: i64) -> Result<u64, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser> {
    /// Find a user by their login (email).
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError>;
}
