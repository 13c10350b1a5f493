use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create booking_state enum
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingState::Enum)
                    .values([
                        BookingState::Pending,
                        BookingState::Confirmed,
                        BookingState::Rejected,
                        BookingState::NoShow,
                        BookingState::InProgress,
                        BookingState::InInspection,
                        BookingState::Completed,
                        BookingState::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create bookings table
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(pk_uuid(Bookings::Id))
                    .col(date(Bookings::StartDate))
                    .col(date(Bookings::EndDate))
                    .col(
                        timestamp_with_time_zone(Bookings::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::State)
                            .enumeration(
                                BookingState::Enum,
                                [
                                    BookingState::Pending,
                                    BookingState::Confirmed,
                                    BookingState::Rejected,
                                    BookingState::NoShow,
                                    BookingState::InProgress,
                                    BookingState::InInspection,
                                    BookingState::Completed,
                                    BookingState::Cancelled,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(uuid(Bookings::UserId))
                    .col(uuid(Bookings::ProductId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user_id")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_product_id")
                            .from(Bookings::Table, Bookings::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user_product_state")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .col(Bookings::ProductId)
                    .col(Bookings::State)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user_product")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .col(Bookings::ProductId)
                    .to_owned(),
            )
            .await?;

        // The availability check scans by product and date range
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_product_dates")
                    .table(Bookings::Table)
                    .col(Bookings::ProductId)
                    .col(Bookings::StartDate)
                    .col(Bookings::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_state")
                    .table(Bookings::Table)
                    .col(Bookings::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingState::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    StartDate,
    EndDate,
    CreatedAt,
    State,
    UserId,
    ProductId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum BookingState {
    #[sea_orm(iden = "booking_state")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "rejected")]
    Rejected,
    #[sea_orm(iden = "no_show")]
    NoShow,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "in_inspection")]
    InInspection,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
