use std::sync::Arc;

use crate::domain::{Theme, ThemeInput, ThemeWithPosts};
use crate::error::DomainError;
use crate::ports::{PostRepository, ThemeRepository};

use super::{ensure_valid, ensure_valid_update, not_found_as};

const ENTITY: &str = "Theme";

/// Theme use cases.
pub struct ThemeService {
    themes: Arc<dyn ThemeRepository>,
    posts: Arc<dyn PostRepository>,
}

impl ThemeService {
    pub fn new(themes: Arc<dyn ThemeRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { themes, posts }
    }

    pub async fn list(&self) -> Result<Vec<Theme>, DomainError> {
        Ok(self.themes.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Theme, DomainError> {
        self.themes
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    /// The theme plus its posts. Posts are read only here; they are managed
    /// through [`super::PostService`].
    pub async fn get_with_posts(&self, id: i64) -> Result<ThemeWithPosts, DomainError> {
        let theme = self.get(id).await?;
        let posts = self.posts.find_all_by_theme(id).await?;

        Ok(ThemeWithPosts { theme, posts })
    }

    pub async fn search_by_description(&self, text: &str) -> Result<Vec<Theme>, DomainError> {
        Ok(self.themes.find_all_by_description_containing(text).await?)
    }

    pub async fn create(&self, input: ThemeInput) -> Result<Theme, DomainError> {
        ensure_valid(&input)?;
        Ok(self.themes.insert(input.into_new()).await?)
    }

    pub async fn update(&self, input: ThemeInput) -> Result<Theme, DomainError> {
        let id = ensure_valid_update(&input, input.id)?;

        self.themes
            .update(input.into_theme(id))
            .await
            .map_err(not_found_as(ENTITY, id))
    }

    /// Delete a theme together with its posts. Returns how many posts went
    /// with it.
    pub async fn delete(&self, id: i64) -> Result<u64, DomainError> {
        self.themes
            .delete_with_posts(id)
            .await
            .map_err(not_found_as(ENTITY, id))
    }
}
