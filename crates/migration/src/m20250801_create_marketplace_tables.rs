use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Role).text().not_null())
                    .col(
                        ColumnDef::new(Users::Wallet)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::Difficulty).text().not_null())
                    .col(ColumnDef::new(Courses::Topic).string().not_null())
                    .col(ColumnDef::new(Courses::Content).text().not_null())
                    .col(ColumnDef::new(Courses::CreatorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Courses::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // Derived from the star ratings, unset until the first one
                    .col(ColumnDef::new(Courses::Price).integer())
                    .col(ColumnDef::new(Courses::Rating).double())
                    .col(ColumnDef::new(Courses::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-creator_id")
                            .from(Courses::Table, Courses::CreatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create purchases table
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Purchases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Purchases::UserId).uuid().not_null())
                    .col(ColumnDef::new(Purchases::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Purchases::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchases-user_id")
                            .from(Purchases::Table, Purchases::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // A course with buyers must never disappear underneath them
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchases-course_id")
                            .from(Purchases::Table, Purchases::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_comments table
        manager
            .create_table(
                Table::create()
                    .table(CourseComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseComments::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseComments::UserId).uuid().not_null())
                    .col(ColumnDef::new(CourseComments::Value).text().not_null())
                    .col(
                        ColumnDef::new(CourseComments::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_comments-course_id")
                            .from(CourseComments::Table, CourseComments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_comments-user_id")
                            .from(CourseComments::Table, CourseComments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_stars table
        manager
            .create_table(
                Table::create()
                    .table(CourseStars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseStars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseStars::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseStars::UserId).uuid().not_null())
                    .col(ColumnDef::new(CourseStars::Value).integer().not_null())
                    .col(ColumnDef::new(CourseStars::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_stars-course_id")
                            .from(CourseStars::Table, CourseStars::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_stars-user_id")
                            .from(CourseStars::Table, CourseStars::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(CourseStars::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseComments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    Role,
    Wallet,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    Difficulty,
    Topic,
    Content,
    CreatorId,
    Approved,
    Price,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Purchases {
    Table,
    Id,
    UserId,
    CourseId,
    CreatedAt,
}

#[derive(Iden)]
enum CourseComments {
    Table,
    Id,
    CourseId,
    UserId,
    Value,
    CreatedAt,
}

#[derive(Iden)]
enum CourseStars {
    Table,
    Id,
    CourseId,
    UserId,
    Value,
    CreatedAt,
}
