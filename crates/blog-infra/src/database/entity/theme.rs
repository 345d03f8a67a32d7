//! Theme entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use blog_core::domain::{NewTheme, Theme};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tb_temas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Theme {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
        }
    }
}

impl From<Theme> for ActiveModel {
    fn from(theme: Theme) -> Self {
        Self {
            id: Set(theme.id),
            description: Set(theme.description),
        }
    }
}

impl From<NewTheme> for ActiveModel {
    fn from(theme: NewTheme) -> Self {
        Self {
            id: NotSet,
            description: Set(theme.description),
        }
    }
}
