//! Initial tables: users, pages, links, content_blocks

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::DisplayName)
                            .string_len(128)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::Plan)
                            .string_len(16)
                            .not_null()
                            .default("free"),
                    )
                    .col(ColumnDef::new(Users::CustomerId).string().null())
                    .col(ColumnDef::new(Users::SubscriptionId).string().null())
                    .col(
                        ColumnDef::new(Users::SubscriptionStatus)
                            .string_len(16)
                            .not_null()
                            .default("none"),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Pages::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Pages::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Pages::Title)
                            .string_len(255)
                            .not_null()
                            .default("My Links"),
                    )
                    .col(ColumnDef::new(Pages::Bio).text().not_null().default(""))
                    .col(ColumnDef::new(Pages::Avatar).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Pages::CoverImage)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Pages::Theme)
                            .string_len(32)
                            .not_null()
                            .default("default"),
                    )
                    .col(
                        ColumnDef::new(Pages::ButtonStyle)
                            .string_len(32)
                            .not_null()
                            .default("rounded"),
                    )
                    .col(
                        ColumnDef::new(Pages::Font)
                            .string_len(32)
                            .not_null()
                            .default("system"),
                    )
                    .col(ColumnDef::new(Pages::CustomBackground).string_len(64).null())
                    .col(ColumnDef::new(Pages::CustomText).string_len(64).null())
                    .col(ColumnDef::new(Pages::CustomButton).string_len(64).null())
                    .col(ColumnDef::new(Pages::CustomButtonText).string_len(64).null())
                    .col(ColumnDef::new(Pages::GradientStart).string_len(64).null())
                    .col(ColumnDef::new(Pages::GradientEnd).string_len(64).null())
                    .col(ColumnDef::new(Pages::BackgroundImage).text().null())
                    .col(
                        ColumnDef::new(Pages::BackgroundFit)
                            .string_len(16)
                            .not_null()
                            .default("cover"),
                    )
                    .col(
                        ColumnDef::new(Pages::ButtonAnimation)
                            .string_len(16)
                            .not_null()
                            .default("none"),
                    )
                    .col(ColumnDef::new(Pages::SeoTitle).string_len(255).null())
                    .col(ColumnDef::new(Pages::SeoDescription).string_len(512).null())
                    .col(ColumnDef::new(Pages::SeoImage).string().null())
                    .col(
                        ColumnDef::new(Pages::IsPublished)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Pages::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Pages::SocialTwitter).string().null())
                    .col(ColumnDef::new(Pages::SocialInstagram).string().null())
                    .col(ColumnDef::new(Pages::SocialFacebook).string().null())
                    .col(ColumnDef::new(Pages::SocialYoutube).string().null())
                    .col(ColumnDef::new(Pages::SocialTiktok).string().null())
                    .col(ColumnDef::new(Pages::SocialLinkedin).string().null())
                    .col(
                        ColumnDef::new(Pages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Links::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Links::PageId).big_integer().not_null())
                    .col(ColumnDef::new(Links::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Links::Url).text().not_null())
                    .col(
                        ColumnDef::new(Links::Icon)
                            .string_len(32)
                            .not_null()
                            .default("link"),
                    )
                    .col(
                        ColumnDef::new(Links::IconOnly)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Links::IconSize)
                            .integer()
                            .not_null()
                            .default(50),
                    )
                    .col(
                        ColumnDef::new(Links::Position)
                            .string_len(16)
                            .not_null()
                            .default("main"),
                    )
                    .col(
                        ColumnDef::new(Links::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Links::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Links::Clicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Links::ScheduleEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Links::ScheduleStart)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Links::ScheduleEnd)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_page_id")
                    .table(Links::Table)
                    .col(Links::PageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContentBlocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentBlocks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentBlocks::PageId).big_integer().not_null())
                    .col(ColumnDef::new(ContentBlocks::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(ContentBlocks::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ContentBlocks::Image)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ContentBlocks::LinkUrl).text().null())
                    .col(
                        ColumnDef::new(ContentBlocks::BackgroundColor)
                            .string_len(64)
                            .not_null()
                            .default("#ffffff"),
                    )
                    .col(
                        ColumnDef::new(ContentBlocks::TextColor)
                            .string_len(64)
                            .not_null()
                            .default("#000000"),
                    )
                    .col(
                        ColumnDef::new(ContentBlocks::Layout)
                            .string_len(16)
                            .not_null()
                            .default("full"),
                    )
                    .col(
                        ColumnDef::new(ContentBlocks::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ContentBlocks::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_content_blocks_page_id")
                    .table(ContentBlocks::Table)
                    .col(ContentBlocks::PageId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentBlocks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    PasswordHash,
    DisplayName,
    Plan,
    CustomerId,
    SubscriptionId,
    SubscriptionStatus,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Pages {
    Table,
    Id,
    UserId,
    Username,
    Title,
    Bio,
    Avatar,
    CoverImage,
    Theme,
    ButtonStyle,
    Font,
    CustomBackground,
    CustomText,
    CustomButton,
    CustomButtonText,
    GradientStart,
    GradientEnd,
    BackgroundImage,
    BackgroundFit,
    ButtonAnimation,
    SeoTitle,
    SeoDescription,
    SeoImage,
    IsPublished,
    Views,
    SocialTwitter,
    SocialInstagram,
    SocialFacebook,
    SocialYoutube,
    SocialTiktok,
    SocialLinkedin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Links {
    Table,
    Id,
    PageId,
    Title,
    Url,
    Icon,
    IconOnly,
    IconSize,
    Position,
    IsActive,
    SortOrder,
    Clicks,
    ScheduleEnabled,
    ScheduleStart,
    ScheduleEnd,
}

#[derive(DeriveIden)]
enum ContentBlocks {
    Table,
    Id,
    PageId,
    Title,
    Description,
    Image,
    LinkUrl,
    BackgroundColor,
    TextColor,
    Layout,
    IsActive,
    SortOrder,
}
