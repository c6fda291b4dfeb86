use sea_orm_migration::{prelude::*, sea_orm::DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Login lookups and registration conflicts
        manager
            .create_index(
                Index::create()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Titles, descriptions and contents are each unique across courses
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_title")
                    .table(Courses::Table)
                    .col(Courses::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Long text exceeds the Postgres btree row limit, so index its hash there
        if manager.get_database_backend() == DbBackend::Postgres {
            let db = manager.get_connection();
            db.execute_unprepared(
                "CREATE UNIQUE INDEX idx_courses_description ON courses (md5(description))",
            )
            .await?;
            db.execute_unprepared(
                "CREATE UNIQUE INDEX idx_courses_content ON courses (md5(content))",
            )
            .await?;
        } else {
            for (name, column) in [
                ("idx_courses_description", Courses::Description),
                ("idx_courses_content", Courses::Content),
            ] {
                manager
                    .create_index(
                        Index::create()
                            .name(name)
                            .table(Courses::Table)
                            .col(column)
                            .unique()
                            .to_owned(),
                    )
                    .await?;
            }
        }

        // Index on courses.creator_id for the creator's course list
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_creator_id")
                    .table(Courses::Table)
                    .col(Courses::CreatorId)
                    .to_owned(),
            )
            .await?;

        // Public listing filters by approval and sorts by rating
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_approved_rating")
                    .table(Courses::Table)
                    .col(Courses::Approved)
                    .col(Courses::Rating)
                    .to_owned(),
            )
            .await?;

        // One purchase per user and course
        manager
            .create_index(
                Index::create()
                    .name("idx_purchases_user_course")
                    .table(Purchases::Table)
                    .col(Purchases::UserId)
                    .col(Purchases::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchases_course_id")
                    .table(Purchases::Table)
                    .col(Purchases::CourseId)
                    .to_owned(),
            )
            .await?;

        // One comment and one star rating per user and course, even under
        // concurrent submissions
        manager
            .create_index(
                Index::create()
                    .name("idx_course_comments_course_user")
                    .table(CourseComments::Table)
                    .col(CourseComments::CourseId)
                    .col(CourseComments::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_stars_course_user")
                    .table(CourseStars::Table)
                    .col(CourseStars::CourseId)
                    .col(CourseStars::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_course_stars_course_user",
            "idx_course_comments_course_user",
            "idx_purchases_course_id",
            "idx_purchases_user_course",
            "idx_courses_approved_rating",
            "idx_courses_creator_id",
            "idx_courses_content",
            "idx_courses_description",
            "idx_courses_title",
            "idx_users_email",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Email,
}

#[derive(Iden)]
enum Courses {
    Table,
    Title,
    Description,
    Content,
    CreatorId,
    Approved,
    Rating,
}

#[derive(Iden)]
enum Purchases {
    Table,
    UserId,
    CourseId,
}

#[derive(Iden)]
enum CourseComments {
    Table,
    CourseId,
    UserId,
}

#[derive(Iden)]
enum CourseStars {
    Table,
    CourseId,
    UserId,
}
