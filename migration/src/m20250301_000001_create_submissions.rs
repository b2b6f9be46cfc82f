use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 步数提交表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::Name).text().not_null())
                    .col(ColumnDef::new(Submissions::SubmissionType).text().not_null())
                    .col(ColumnDef::new(Submissions::Dates).text().not_null())
                    .col(ColumnDef::new(Submissions::Steps).big_integer().not_null())
                    .col(ColumnDef::new(Submissions::Comment).text().null())
                    .col(ColumnDef::new(Submissions::ScreenshotPath).text().null())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    Name,
    SubmissionType,
    Dates,
    Steps,
    Comment,
    ScreenshotPath,
    CreatedAt,
}
