//! In-memory store - used when no database is configured, and by tests.
//!
//! Mirrors the PostgreSQL schema rules: ids come from per-table sequences
//! starting at 1, `login` is unique, posts need an existing theme (and author
//! when one is set), deleting a theme deletes its posts and deleting a user
//! detaches their posts. Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, NewTheme, NewUser, Post, Theme, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, ThemeRepository, UserRepository};

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    themes: BTreeMap<i64, Theme>,
    users: BTreeMap<i64, User>,
    post_seq: i64,
    theme_seq: i64,
    user_seq: i64,
}

impl Tables {
    fn check_post_references(&self, theme_id: i64, user_id: Option<i64>) -> Result<(), RepoError> {
        if !self.themes.contains_key(&theme_id) {
            return Err(RepoError::ForeignKey(format!(
                "theme {theme_id} referenced by post does not exist"
            )));
        }
        if let Some(user_id) = user_id {
            if !self.users.contains_key(&user_id) {
                return Err(RepoError::ForeignKey(format!(
                    "user {user_id} referenced by post does not exist"
                )));
            }
        }
        Ok(())
    }

    fn check_login_free(&self, login: &str, owner: Option<i64>) -> Result<(), RepoError> {
        let taken = self
            .users
            .values()
            .any(|u| u.login == login && Some(u.id) != owner);

        if taken {
            return Err(RepoError::Constraint(format!("login {login} already exists")));
        }
        Ok(())
    }

    fn delete_theme_cascade(&mut self, id: i64) -> Result<u64, RepoError> {
        if self.themes.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let before = self.posts.len();
        self.posts.retain(|_, post| post.theme_id != id);
        Ok((before - self.posts.len()) as u64)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Shared in-memory tables. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository { db: self.clone() }
    }

    pub fn themes(&self) -> InMemoryThemeRepository {
        InMemoryThemeRepository { db: self.clone() }
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository { db: self.clone() }
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    db: InMemoryDatabase,
}

/// In-memory theme repository.
pub struct InMemoryThemeRepository {
    db: InMemoryDatabase,
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    db: InMemoryDatabase,
}

#[async_trait]
impl BaseRepository<Post, NewPost> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.db.tables.write().await;
        tables.check_post_references(new.theme_id, new.user_id)?;

        tables.post_seq += 1;
        let post = Post {
            id: tables.post_seq,
            title: new.title,
            body: new.body,
            updated_at: new.updated_at,
            theme_id: new.theme_id,
            user_id: new.user_id,
        };
        tables.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.db.tables.write().await;
        if !tables.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_post_references(post.theme_id, post.user_id)?;

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        tables.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all_by_title_containing(&self, text: &str) -> Result<Vec<Post>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| contains_ignore_case(&p.title, text))
            .cloned()
            .collect())
    }

    async fn find_all_by_theme(&self, theme_id: i64) -> Result<Vec<Post>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.theme_id == theme_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Theme, NewTheme> for InMemoryThemeRepository {
    async fn find_all(&self) -> Result<Vec<Theme>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.themes.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Theme>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.themes.get(&id).cloned())
    }

    async fn insert(&self, new: NewTheme) -> Result<Theme, RepoError> {
        let mut tables = self.db.tables.write().await;

        tables.theme_seq += 1;
        let theme = Theme {
            id: tables.theme_seq,
            description: new.description,
        };
        tables.themes.insert(theme.id, theme.clone());

        Ok(theme)
    }

    async fn update(&self, theme: Theme) -> Result<Theme, RepoError> {
        let mut tables = self.db.tables.write().await;
        match tables.themes.get_mut(&theme.id) {
            Some(stored) => {
                *stored = theme.clone();
                Ok(theme)
            }
            None => Err(RepoError::NotFound),
        }
    }

    /// Same as [`ThemeRepository::delete_with_posts`]; the schema cascades.
    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        tables.delete_theme_cascade(id).map(|_| ())
    }
}

#[async_trait]
impl ThemeRepository for InMemoryThemeRepository {
    async fn find_all_by_description_containing(
        &self,
        text: &str,
    ) -> Result<Vec<Theme>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .themes
            .values()
            .filter(|t| contains_ignore_case(&t.description, text))
            .cloned()
            .collect())
    }

    async fn delete_with_posts(&self, id: i64) -> Result<u64, RepoError> {
        let mut tables = self.db.tables.write().await;
        let removed = tables.delete_theme_cascade(id)?;

        tracing::info!(theme_id = id, posts_removed = removed, "Theme deleted with its posts");
        Ok(removed)
    }
}

#[async_trait]
impl BaseRepository<User, NewUser> for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn insert(&self, new: NewUser) -> Result<User, RepoError> {
        let mut tables = self.db.tables.write().await;
        tables.check_login_free(&new.login, None)?;

        tables.user_seq += 1;
        let user = User {
            id: tables.user_seq,
            name: new.name,
            login: new.login,
            password_hash: new.password_hash,
            photo: new.photo,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.db.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_login_free(&user.login, Some(user.id))?;

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        for post in tables.posts.values_mut() {
            if post.user_id == Some(id) {
                post.user_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.users.values().find(|u| u.login == login).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn new_theme(description: &str) -> NewTheme {
        NewTheme {
            description: description.to_string(),
        }
    }

    fn new_post(title: &str, theme_id: i64, user_id: Option<i64>) -> NewPost {
        NewPost {
            title: title.to_string(),
            body: "Corpo da postagem".to_string(),
            updated_at: Utc::now(),
            theme_id,
            user_id,
        }
    }

    fn new_user(login: &str) -> NewUser {
        NewUser {
            name: "Root".to_string(),
            login: login.to_string(),
            password_hash: "hash".to_string(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_table() {
        let db = InMemoryDatabase::new();
        let theme = db.themes().insert(new_theme("Programação")).await.unwrap();
        let first = db.posts().insert(new_post("Um", theme.id, None)).await.unwrap();
        let second = db.posts().insert(new_post("Dois", theme.id, None)).await.unwrap();

        assert_eq!(theme.id, 1);
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_post_requires_existing_theme() {
        let db = InMemoryDatabase::new();

        let result = db.posts().insert(new_post("Órfã", 99, None)).await;

        assert!(matches!(result, Err(RepoError::ForeignKey(_))));
        assert!(db.posts().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_theme_delete_cascades_to_posts() {
        let db = InMemoryDatabase::new();
        let kept = db.themes().insert(new_theme("Mantido")).await.unwrap();
        let gone = db.themes().insert(new_theme("Removido")).await.unwrap();
        db.posts().insert(new_post("A", gone.id, None)).await.unwrap();
        db.posts().insert(new_post("B", gone.id, None)).await.unwrap();
        let survivor = db.posts().insert(new_post("C", kept.id, None)).await.unwrap();

        let removed = db.themes().delete_with_posts(gone.id).await.unwrap();

        assert_eq!(removed, 2);
        let posts = db.posts().find_all().await.unwrap();
        assert_eq!(posts, vec![survivor]);
    }

    #[tokio::test]
    async fn test_delete_missing_theme_is_not_found() {
        let db = InMemoryDatabase::new();
        let result = db.themes().delete_with_posts(7).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_user_delete_detaches_posts() {
        let db = InMemoryDatabase::new();
        let theme = db.themes().insert(new_theme("Tema")).await.unwrap();
        let user = db.users().insert(new_user("root@root.com")).await.unwrap();
        let post = db
            .posts()
            .insert(new_post("Autorada", theme.id, Some(user.id)))
            .await
            .unwrap();

        db.users().delete(user.id).await.unwrap();

        let stored = db.posts().find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, None);
    }

    #[tokio::test]
    async fn test_login_is_unique() {
        let db = InMemoryDatabase::new();
        db.users().insert(new_user("root@root.com")).await.unwrap();

        let result = db.users().insert(new_user("root@root.com")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_title_search_ignores_case() {
        let db = InMemoryDatabase::new();
        let theme = db.themes().insert(new_theme("Tema")).await.unwrap();
        for title in ["Abcdef", "xxABCxx", "xyz"] {
            db.posts().insert(new_post(title, theme.id, None)).await.unwrap();
        }

        let found = db.posts().find_all_by_title_containing("abc").await.unwrap();
        let titles: Vec<_> = found.iter().map(|p| p.title.as_str()).collect();

        assert_eq!(titles, vec!["Abcdef", "xxABCxx"]);
    }

    #[tokio::test]
    async fn test_posts_by_theme() {
        let db = InMemoryDatabase::new();
        let rust = db.themes().insert(new_theme("Rust")).await.unwrap();
        let sql = db.themes().insert(new_theme("SQL")).await.unwrap();
        let first = db.posts().insert(new_post("Um", rust.id, None)).await.unwrap();
        db.posts().insert(new_post("Dois", sql.id, None)).await.unwrap();
        let third = db.posts().insert(new_post("Três", rust.id, None)).await.unwrap();

        let posts = db.posts().find_all_by_theme(rust.id).await.unwrap();

        assert_eq!(posts, vec![first, third]);
        assert!(db.posts().find_all_by_theme(99).await.unwrap().is_empty());
    }
}
