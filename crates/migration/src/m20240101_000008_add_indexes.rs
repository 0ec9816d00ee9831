use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Product: filtered by category on every catalog listing
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ProviderService: one row per (provider, product)
        manager
            .create_index(
                Index::create()
                    .name("uniq_provider_service_provider_product")
                    .table(ProviderService::Table)
                    .col(ProviderService::ProviderId)
                    .col(ProviderService::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ServiceRequest: client and provider listings
        manager
            .create_index(
                Index::create()
                    .name("idx_service_request_user")
                    .table(ServiceRequest::Table)
                    .col(ServiceRequest::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_request_provider_service")
                    .table(ServiceRequest::Table)
                    .col(ServiceRequest::ProviderServiceId)
                    .to_owned(),
            )
            .await?;

        // ServiceResponse: unanswered lookups join on the request id
        manager
            .create_index(
                Index::create()
                    .name("idx_service_response_request")
                    .table(ServiceResponse::Table)
                    .col(ServiceResponse::ServiceRequestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_category").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_provider_service_provider_product").table(ProviderService::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_request_user").table(ServiceRequest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_request_provider_service").table(ServiceRequest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_response_request").table(ServiceResponse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, CategoryId }

#[derive(DeriveIden)]
enum ProviderService { Table, ProviderId, ProductId }

#[derive(DeriveIden)]
enum ServiceRequest { Table, UserId, ProviderServiceId }

#[derive(DeriveIden)]
enum ServiceResponse { Table, ServiceRequestId }
