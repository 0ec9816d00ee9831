//! Create `advertisement` and its many-to-many link to `product`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisement::Table)
                    .if_not_exists()
                    .col(pk_auto(Advertisement::Id))
                    .col(integer(Advertisement::UserId).not_null())
                    .col(integer(Advertisement::LocationId).not_null())
                    .col(string_len(Advertisement::Title, 200).not_null())
                    .col(text(Advertisement::Description).not_null())
                    .col(date_null(Advertisement::StartDate))
                    .col(date(Advertisement::ExpiryDate).not_null())
                    .col(integer(Advertisement::MessageCount).not_null().default(0))
                    .col(timestamp_with_time_zone(Advertisement::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advertisement_user")
                            .from(Advertisement::Table, Advertisement::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advertisement_town")
                            .from(Advertisement::Table, Advertisement::LocationId)
                            .to(Town::Table, Town::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdvertisementService::Table)
                    .if_not_exists()
                    .col(pk_auto(AdvertisementService::Id))
                    .col(integer(AdvertisementService::AdvertisementId).not_null())
                    .col(integer(AdvertisementService::ProductId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advertisement_service_ad")
                            .from(AdvertisementService::Table, AdvertisementService::AdvertisementId)
                            .to(Advertisement::Table, Advertisement::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advertisement_service_product")
                            .from(AdvertisementService::Table, AdvertisementService::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AdvertisementService::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Advertisement::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Advertisement { Table, Id, UserId, LocationId, Title, Description, StartDate, ExpiryDate, MessageCount, CreatedAt }

#[derive(DeriveIden)]
enum AdvertisementService { Table, Id, AdvertisementId, ProductId }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Town { Table, Id }

#[derive(DeriveIden)]
enum Product { Table, Id }
