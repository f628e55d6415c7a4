//! Create publishers table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Publishers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Publishers::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Publishers::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Publishers::Siret).big_integer().not_null())
                    .col(ColumnDef::new(Publishers::Phone).string_len(64).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Publishers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Publishers {
    Table,
    Id,
    Name,
    Siret,
    Phone,
}
