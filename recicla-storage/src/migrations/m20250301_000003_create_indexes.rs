use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Unit and class filters on the listing and statistics endpoints
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deliveries_unit_id")
                    .table(Deliveries::Table)
                    .col(Deliveries::UnitId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deliveries_class_id")
                    .table(Deliveries::Table)
                    .col(Deliveries::ClassId)
                    .to_owned(),
            )
            .await?;

        // Chronological ordering and period windows
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deliveries_created_at")
                    .table(Deliveries::Table)
                    .col(Deliveries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deliveries_user_id")
                    .table(Deliveries::Table)
                    .col(Deliveries::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_deliveries_user_id",
            "idx_deliveries_created_at",
            "idx_deliveries_class_id",
            "idx_deliveries_unit_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Deliveries::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Deliveries {
    Table,
    UnitId,
    ClassId,
    CreatedAt,
    UserId,
}
