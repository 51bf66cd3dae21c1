use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPost::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPost::Title).string().not_null())
                    .col(ColumnDef::new(BlogPost::Content).text().not_null())
                    .col(ColumnDef::new(BlogPost::Category).string().not_null())
                    .col(ColumnDef::new(BlogPost::Tags).text().null())
                    .col(
                        ColumnDef::new(BlogPost::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPost::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPost {
    Table,
    Id,
    Title,
    Content,
    Category,
    Tags,
    CreatedAt,
    UpdatedAt,
}
