//! Create `service_provider`, `provider_working_day` and `provider_service`.
//!
//! A user owns at most one provider profile. `provider_service` lists the
//! products a provider offers; requests are raised against those rows.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceProvider::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceProvider::Id))
                    .col(integer(ServiceProvider::UserId).unique_key().not_null())
                    .col(integer(ServiceProvider::ProductId).not_null())
                    .col(integer_null(ServiceProvider::LocationId))
                    .col(integer_null(ServiceProvider::GenderId))
                    .col(string_len_null(ServiceProvider::AgeBracket, 9))
                    .col(timestamp_with_time_zone(ServiceProvider::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_provider_user")
                            .from(ServiceProvider::Table, ServiceProvider::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_provider_product")
                            .from(ServiceProvider::Table, ServiceProvider::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_provider_town")
                            .from(ServiceProvider::Table, ServiceProvider::LocationId)
                            .to(Town::Table, Town::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_provider_gender")
                            .from(ServiceProvider::Table, ServiceProvider::GenderId)
                            .to(Gender::Table, Gender::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProviderWorkingDay::Table)
                    .if_not_exists()
                    .col(pk_auto(ProviderWorkingDay::Id))
                    .col(integer(ProviderWorkingDay::ProviderId).not_null())
                    .col(integer(ProviderWorkingDay::WorkingDayId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_working_day_provider")
                            .from(ProviderWorkingDay::Table, ProviderWorkingDay::ProviderId)
                            .to(ServiceProvider::Table, ServiceProvider::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_working_day_day")
                            .from(ProviderWorkingDay::Table, ProviderWorkingDay::WorkingDayId)
                            .to(WorkingDay::Table, WorkingDay::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProviderService::Table)
                    .if_not_exists()
                    .col(pk_auto(ProviderService::Id))
                    .col(integer(ProviderService::ProviderId).not_null())
                    .col(integer(ProviderService::ProductId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_service_provider")
                            .from(ProviderService::Table, ProviderService::ProviderId)
                            .to(ServiceProvider::Table, ServiceProvider::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_service_product")
                            .from(ProviderService::Table, ProviderService::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProviderService::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ProviderWorkingDay::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ServiceProvider::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceProvider { Table, Id, UserId, ProductId, LocationId, GenderId, AgeBracket, CreatedAt }

#[derive(DeriveIden)]
enum ProviderWorkingDay { Table, Id, ProviderId, WorkingDayId }

#[derive(DeriveIden)]
enum ProviderService { Table, Id, ProviderId, ProductId }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Product { Table, Id }

#[derive(DeriveIden)]
enum Town { Table, Id }

#[derive(DeriveIden)]
enum Gender { Table, Id }

#[derive(DeriveIden)]
enum WorkingDay { Table, Id }
