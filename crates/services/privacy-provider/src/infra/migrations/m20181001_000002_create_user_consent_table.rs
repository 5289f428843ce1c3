//! Migration: Create the EULA acceptance table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlagiarismTurnitinsimUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimUsers::Userid)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimUsers::Turnitinid)
                            .string_len(36)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimUsers::Lasteulaaccepted)
                            .string_len(20)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimUsers::Lasteulaacceptedtime)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimUsers::Lasteulaacceptedlang)
                            .string_len(30)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plagiarism_turnitinsim_users_userid")
                    .table(PlagiarismTurnitinsimUsers::Table)
                    .col(PlagiarismTurnitinsimUsers::Userid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(PlagiarismTurnitinsimUsers::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum PlagiarismTurnitinsimUsers {
    Table,
    Id,
    Userid,
    Turnitinid,
    Lasteulaaccepted,
    Lasteulaacceptedtime,
    Lasteulaacceptedlang,
}
