//! Create lookup tables: `town`, `gender` and `working_day`.
//!
//! `gender` and `working_day` are fixed vocabularies and are seeded here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const GENDERS: [&str; 3] = ["Male", "Female", "Other"];
const DAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Town::Table)
                    .if_not_exists()
                    .col(pk_auto(Town::Id))
                    .col(string_len(Town::Name, 100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Gender::Table)
                    .if_not_exists()
                    .col(pk_auto(Gender::Id))
                    .col(string_len(Gender::Name, 32).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkingDay::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkingDay::Id))
                    .col(string_len(WorkingDay::Day, 9).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        let mut genders = Query::insert();
        genders.into_table(Gender::Table).columns([Gender::Name]);
        for g in GENDERS {
            genders.values_panic([g.into()]);
        }
        manager.exec_stmt(genders).await?;

        let mut days = Query::insert();
        days.into_table(WorkingDay::Table).columns([WorkingDay::Day]);
        for d in DAYS {
            days.values_panic([d.into()]);
        }
        manager.exec_stmt(days).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WorkingDay::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Gender::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Town::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Town { Table, Id, Name }

#[derive(DeriveIden)]
enum Gender { Table, Id, Name }

#[derive(DeriveIden)]
enum WorkingDay { Table, Id, Day }
