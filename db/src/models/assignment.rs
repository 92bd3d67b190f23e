use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

/// An assignment inside a course.
///
/// `start_date` is the release instant: before it, the assignment is only visible
/// to course staff.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(has_many = "super::non_container_question::Entity")]
    NonContainerQuestions,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::non_container_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NonContainerQuestions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        name: &str,
        description: Option<&str>,
        start_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            course_id: Set(course_id),
            name: Set(name.to_owned()),
            description: Set(description.map(str::to_owned)),
            start_date: Set(start_date),
            due_date: Set(due_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Finds an assignment only if it belongs to `course_id`.
    pub async fn find_in_course(
        db: &DbConn,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(assignment_id)
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    /// Fetches the owning course and release instant of an assignment, without scoping.
    pub async fn release_state(
        db: &DbConn,
        assignment_id: i64,
    ) -> Result<Option<(i64, DateTime<Utc>)>, DbErr> {
        Entity::find_by_id(assignment_id)
            .select_only()
            .column(Column::CourseId)
            .column(Column::StartDate)
            .into_tuple::<(i64, DateTime<Utc>)>()
            .one(db)
            .await
    }

    pub async fn list_for_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Assignments whose `start_date` is at or before `now`.
    pub async fn list_released(
        db: &DbConn,
        course_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StartDate.lte(now))
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn edit(
        db: &DbConn,
        course_id: i64,
        assignment_id: i64,
        name: &str,
        description: Option<&str>,
        start_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Result<Option<Model>, DbErr> {
        let Some(existing) = Self::find_in_course(db, course_id, assignment_id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.name = Set(name.to_owned());
        active.description = Set(description.map(str::to_owned));
        active.start_date = Set(start_date);
        active.due_date = Set(due_date);
        active.updated_at = Set(Utc::now());

        active.update(db).await.map(Some)
    }

    /// Deletes the assignment if it belongs to `course_id`. Returns whether a row was removed.
    pub async fn delete_in_course(db: &DbConn, course_id: i64, assignment_id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
