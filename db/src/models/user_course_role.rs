use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QuerySelect, sea_query::OnConflict};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Binds a user to a role inside a single course.
///
/// A user may hold several roles in the same course, so the role is part of the key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_course_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub role: Role,
}

/// A principal's standing within a course.
///
/// Parsing is case-insensitive so permission files may write `"Instructor"` or `"instructor"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_role_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,

    #[sea_orm(string_value = "ta")]
    Ta,

    #[sea_orm(string_value = "instructor")]
    Instructor,

    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Ta, Role::Instructor, Role::Admin];
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Grants `role` to the user in the course. Granting an existing binding is a no-op.
    pub async fn assign(db: &DbConn, user_id: i64, course_id: i64, role: Role) -> Result<(), DbErr> {
        let binding = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            role: Set(role),
        };

        let res = Entity::insert(binding)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::CourseId, Column::Role])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match res {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn revoke(db: &DbConn, user_id: i64, course_id: i64, role: Role) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Role.eq(role))
            .exec(db)
            .await?;
        Ok(())
    }

    /// All roles the user holds in the course. Empty when the user is not enrolled.
    pub async fn roles_for(db: &DbConn, user_id: i64, course_id: i64) -> Result<Vec<Role>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::Role)
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .into_tuple::<Role>()
            .all(db)
            .await
    }
}
