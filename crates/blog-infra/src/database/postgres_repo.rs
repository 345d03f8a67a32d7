//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};

use blog_core::domain::{Post, Theme, User};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, ThemeRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::theme::{self, Entity as ThemeEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL theme repository.
pub type PostgresThemeRepository = PostgresBaseRepository<ThemeEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// `lower(column) LIKE '%text%'` with LIKE metacharacters in `text` escaped.
fn contains_ignore_case<C>(column: C, text: &str) -> SimpleExpr
where
    C: ColumnTrait + 'static,
{
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Keep the first character of the local part, e.g. `r***@root.com`.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all_by_title_containing(&self, text: &str) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(text, "Searching posts by title");

        let result = PostEntity::find()
            .filter(contains_ignore_case(post::Column::Title, text))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_all_by_theme(&self, theme_id: i64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::ThemeId.eq(theme_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ThemeRepository for PostgresThemeRepository {
    async fn find_all_by_description_containing(
        &self,
        text: &str,
    ) -> Result<Vec<Theme>, RepoError> {
        tracing::debug!(text, "Searching themes by description");

        let result = ThemeEntity::find()
            .filter(contains_ignore_case(theme::Column::Description, text))
            .order_by_asc(theme::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_with_posts(&self, id: i64) -> Result<u64, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let posts = PostEntity::delete_many()
            .filter(post::Column::ThemeId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let themes = ThemeEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if themes.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(
            theme_id = id,
            posts_removed = posts.rows_affected,
            "Theme deleted with its posts"
        );

        Ok(posts.rows_affected)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        tracing::debug!(user_email = %mask_email(login), "Finding user by login");

        let result = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("root@root.com"), "r***@root.com");
        assert_eq!(mask_email("a@b.com"), "***@b.com");
        assert_eq!(mask_email("nope"), "***");
    }
}
