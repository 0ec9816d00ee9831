//! Create `service_response`.
//!
//! No uniqueness on `service_request_id`: several replies to one request are kept.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceResponse::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceResponse::Id))
                    .col(integer(ServiceResponse::ServiceRequestId).not_null())
                    .col(text(ServiceResponse::ResponseText).not_null())
                    .col(timestamp_with_time_zone(ServiceResponse::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_response_request")
                            .from(ServiceResponse::Table, ServiceResponse::ServiceRequestId)
                            .to(ServiceRequest::Table, ServiceRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceResponse::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceResponse { Table, Id, ServiceRequestId, ResponseText, CreatedAt }

#[derive(DeriveIden)]
enum ServiceRequest { Table, Id }
