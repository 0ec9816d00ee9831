//! Create `service_request`.
//!
//! A client's ask against a provider's offering, optionally geolocated.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceRequest::Id))
                    .col(integer(ServiceRequest::ProviderServiceId).not_null())
                    .col(integer(ServiceRequest::UserId).not_null())
                    .col(integer_null(ServiceRequest::LocationId))
                    .col(double(ServiceRequest::Latitude).not_null())
                    .col(double(ServiceRequest::Longitude).not_null())
                    .col(text(ServiceRequest::RequestText).not_null())
                    .col(timestamp_with_time_zone(ServiceRequest::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_request_provider_service")
                            .from(ServiceRequest::Table, ServiceRequest::ProviderServiceId)
                            .to(ProviderService::Table, ProviderService::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_request_user")
                            .from(ServiceRequest::Table, ServiceRequest::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_request_town")
                            .from(ServiceRequest::Table, ServiceRequest::LocationId)
                            .to(Town::Table, Town::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceRequest::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceRequest { Table, Id, ProviderServiceId, UserId, LocationId, Latitude, Longitude, RequestText, CreatedAt }

#[derive(DeriveIden)]
enum ProviderService { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Town { Table, Id }
