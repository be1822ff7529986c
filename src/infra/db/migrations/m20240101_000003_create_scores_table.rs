//! Migration: Create scores table keyed by (user_id, movie_id).

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_movies_table::Movies;
use super::m20240101_000002_create_users_and_roles::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Scores::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::MovieId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::Value).double().not_null())
                    .primary_key(Index::create().col(Scores::UserId).col(Scores::MovieId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_user")
                            .from(Scores::Table, Scores::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Scored movies cannot be deleted
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_movie")
                            .from(Scores::Table, Scores::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_movie_id")
                    .table(Scores::Table)
                    .col(Scores::MovieId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Scores {
    Table,
    UserId,
    MovieId,
    Value,
}
