use sea_orm_migration::prelude::*;

/// Payout receipts uploaded by admins (one row per bank transfer)
#[derive(DeriveIden)]
enum PaymentChecks {
    Table,
    Id,
    ChatId,
    Name,
    ImageUrl,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentChecks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentChecks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentChecks::ChatId).string().not_null())
                    .col(ColumnDef::new(PaymentChecks::Name).string().not_null())
                    .col(
                        ColumnDef::new(PaymentChecks::ImageUrl)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PaymentChecks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_checks_chat_id")
                    .table(PaymentChecks::Table)
                    .col(PaymentChecks::ChatId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentChecks::Table).to_owned())
            .await?;
        Ok(())
    }
}
