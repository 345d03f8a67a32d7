//! Domain entities - the core business objects.

mod post;
mod theme;
mod user;

pub use post::{NewPost, Post, PostInput};
pub use theme::{NewTheme, Theme, ThemeInput, ThemeWithPosts};
pub use user::{NewUser, User, UserInput};
