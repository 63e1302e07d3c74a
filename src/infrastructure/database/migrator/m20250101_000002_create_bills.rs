//! Migration to create bills table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bills::BillId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bills::OwnerId).string().not_null())
                    .col(
                        ColumnDef::new(Bills::ConsumerName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bills::MeterNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bills::ConnectionType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bills::UnitsConsumed).integer().not_null())
                    .col(
                        ColumnDef::new(Bills::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bills::Status)
                            .string_len(20)
                            .not_null()
                            .default("Not Paid"),
                    )
                    .col(
                        ColumnDef::new(Bills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bills::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Every list/read is scoped by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_bills_owner_id")
                    .table(Bills::Table)
                    .col(Bills::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Meter search within an owner's bills
        manager
            .create_index(
                Index::create()
                    .name("idx_bills_owner_meter")
                    .table(Bills::Table)
                    .col(Bills::OwnerId)
                    .col(Bills::MeterNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bills {
    Table,
    BillId,
    OwnerId,
    ConsumerName,
    MeterNumber,
    ConnectionType,
    UnitsConsumed,
    Amount,
    Status,
    CreatedAt,
    UpdatedAt,
}
