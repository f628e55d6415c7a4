//! Create games table
//!
//! Each game references exactly one publisher. Release dates are indexed
//! for the stock clearing query.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_publishers::Publishers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Games::Price).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Games::PriceDiscount)
                            .string_len(32)
                            .not_null()
                            .default("0"),
                    )
                    .col(ColumnDef::new(Games::PublisherId).string_len(36).not_null())
                    .col(ColumnDef::new(Games::Tags).text().not_null())
                    .col(ColumnDef::new(Games::ReleaseDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_publisher")
                            .from(Games::Table, Games::PublisherId)
                            .to(Publishers::Table, Publishers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_release_date")
                    .table(Games::Table)
                    .col(Games::ReleaseDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_publisher")
                    .table(Games::Table)
                    .col(Games::PublisherId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Games {
    Table,
    Id,
    Title,
    Price,
    PriceDiscount,
    PublisherId,
    Tags,
    ReleaseDate,
}
