use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deliveries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Deliveries::Id).string_len(36).not_null().primary_key())
                    .col(ColumnDef::new(Deliveries::Quantity).double().not_null())
                    .col(ColumnDef::new(Deliveries::WasteType).string_len(20).not_null())
                    .col(ColumnDef::new(Deliveries::ClassId).string().not_null())
                    .col(ColumnDef::new(Deliveries::Course).string().not_null())
                    .col(ColumnDef::new(Deliveries::Semester).string().not_null())
                    .col(ColumnDef::new(Deliveries::Shift).string_len(20).not_null())
                    .col(ColumnDef::new(Deliveries::UnitId).string().not_null())
                    .col(ColumnDef::new(Deliveries::UserId).string_len(36).null())
                    .col(
                        ColumnDef::new(Deliveries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deliveries_user_id")
                            .from(Deliveries::Table, Deliveries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deliveries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Deliveries {
    Table,
    Id,
    Quantity,
    WasteType,
    ClassId,
    Course,
    Semester,
    Shift,
    UnitId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
