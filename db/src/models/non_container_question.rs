use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

/// A question graded without a container: the answer is compared against
/// `correct_string`, literally or as a regex.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "non_container_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub question: String,
    pub score: f64,
    pub correct_string: String,
    pub is_regex: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        assignment_id: i64,
        question: &str,
        score: f64,
        correct_string: &str,
        is_regex: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            assignment_id: Set(assignment_id),
            question: Set(question.to_owned()),
            score: Set(score),
            correct_string: Set(correct_string.to_owned()),
            is_regex: Set(is_regex),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn list_for_assignment(db: &DbConn, assignment_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_in_assignment(
        db: &DbConn,
        assignment_id: i64,
        question_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(question_id)
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(db)
            .await
    }

    pub async fn edit(
        db: &DbConn,
        assignment_id: i64,
        question_id: i64,
        question: &str,
        score: f64,
        correct_string: &str,
        is_regex: bool,
    ) -> Result<Option<Model>, DbErr> {
        let Some(existing) = Self::find_in_assignment(db, assignment_id, question_id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.question = Set(question.to_owned());
        active.score = Set(score);
        active.correct_string = Set(correct_string.to_owned());
        active.is_regex = Set(is_regex);
        active.updated_at = Set(Utc::now());

        active.update(db).await.map(Some)
    }

    pub async fn delete_in_assignment(
        db: &DbConn,
        assignment_id: i64,
        question_id: i64,
    ) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::Id.eq(question_id))
            .filter(Column::AssignmentId.eq(assignment_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
