//! Themes, users and posts. Posts cascade with their theme and are detached
//! from a deleted author.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum TbTemas {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum TbUsuarios {
    Table,
    Id,
    Name,
    Login,
    PasswordHash,
    Photo,
}

#[derive(DeriveIden)]
enum TbPostagens {
    Table,
    Id,
    Title,
    Body,
    UpdatedAt,
    ThemeId,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TbTemas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TbTemas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TbTemas::Description).string_len(1000).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TbUsuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TbUsuarios::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TbUsuarios::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(TbUsuarios::Login)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TbUsuarios::PasswordHash).string().not_null())
                    .col(ColumnDef::new(TbUsuarios::Photo).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TbPostagens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TbPostagens::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TbPostagens::Title).string_len(100).not_null())
                    .col(ColumnDef::new(TbPostagens::Body).text().not_null())
                    .col(
                        ColumnDef::new(TbPostagens::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TbPostagens::ThemeId).big_integer().not_null())
                    .col(ColumnDef::new(TbPostagens::UserId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_postagens_tema")
                            .from(TbPostagens::Table, TbPostagens::ThemeId)
                            .to(TbTemas::Table, TbTemas::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_postagens_usuario")
                            .from(TbPostagens::Table, TbPostagens::UserId)
                            .to(TbUsuarios::Table, TbUsuarios::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_postagens_theme_id")
                    .table(TbPostagens::Table)
                    .col(TbPostagens::ThemeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TbPostagens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TbUsuarios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TbTemas::Table).to_owned())
            .await
    }
}
