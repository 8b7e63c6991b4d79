//! Analytics events table
//!
//! Append-only log of page views and link clicks, indexed for the
//! time-windowed dashboard queries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnalyticsEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalyticsEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::PageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::EventType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AnalyticsEvents::LinkId).big_integer().null())
                    .col(
                        ColumnDef::new(AnalyticsEvents::LinkTitle)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::Device)
                            .string_len(16)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::Browser)
                            .string_len(64)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::Os)
                            .string_len(64)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::Country)
                            .string_len(64)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::City)
                            .string_len(100)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::Referrer)
                            .text()
                            .not_null()
                            .default("direct"),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Time-range queries per page
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_analytics_events_page_time")
                    .table(AnalyticsEvents::Table)
                    .col(AnalyticsEvents::PageId)
                    .col(AnalyticsEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Typed queries (view vs click) per page
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_analytics_events_page_type_time")
                    .table(AnalyticsEvents::Table)
                    .col(AnalyticsEvents::PageId)
                    .col(AnalyticsEvents::EventType)
                    .col(AnalyticsEvents::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_analytics_events_page_type_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_analytics_events_page_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AnalyticsEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AnalyticsEvents {
    Table,
    Id,
    PageId,
    EventType,
    LinkId,
    LinkTitle,
    Device,
    Browser,
    Os,
    Country,
    City,
    Referrer,
    CreatedAt,
}
