//! Migration: Create the plagiarism submission table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlagiarismTurnitinsimSub::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Cm)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Userid)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Turnitinid)
                            .string_len(36)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Identifier)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Itemid)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Submittedtime)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismTurnitinsimSub::Overallscore)
                            .integer()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups by user (export, user deletion) and by course module (context deletion)
        manager
            .create_index(
                Index::create()
                    .name("idx_plagiarism_turnitinsim_sub_userid")
                    .table(PlagiarismTurnitinsimSub::Table)
                    .col(PlagiarismTurnitinsimSub::Userid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plagiarism_turnitinsim_sub_cm")
                    .table(PlagiarismTurnitinsimSub::Table)
                    .col(PlagiarismTurnitinsimSub::Cm)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(PlagiarismTurnitinsimSub::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum PlagiarismTurnitinsimSub {
    Table,
    Id,
    Cm,
    Userid,
    Turnitinid,
    Identifier,
    Itemid,
    Submittedtime,
    Overallscore,
}
