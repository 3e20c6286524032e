use sea_orm::{EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entity::{Bookings, Listings, Messages, Payments, Properties, Reviews, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Tables are derived from the entity definitions, so column types, unique
/// keys and `ON DELETE CASCADE` foreign keys follow the model on every backend.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Parents before children.
        create_table_for(manager, &schema, Users).await?;
        create_table_for(manager, &schema, Properties).await?;
        create_table_for(manager, &schema, Listings).await?;
        create_table_for(manager, &schema, Bookings).await?;
        create_table_for(manager, &schema, Reviews).await?;
        create_table_for(manager, &schema, Payments).await?;
        create_table_for(manager, &schema, Messages).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookings_property_id")
                    .table(Bookings)
                    .col(crate::entity::bookings::Column::PropertyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_booking_id")
                    .table(Payments)
                    .col(crate::entity::payments::Column::BookingId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table_for(manager, Messages).await?;
        drop_table_for(manager, Payments).await?;
        drop_table_for(manager, Reviews).await?;
        drop_table_for(manager, Bookings).await?;
        drop_table_for(manager, Listings).await?;
        drop_table_for(manager, Properties).await?;
        drop_table_for(manager, Users).await?;
        Ok(())
    }
}

async fn create_table_for<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

async fn drop_table_for<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}
