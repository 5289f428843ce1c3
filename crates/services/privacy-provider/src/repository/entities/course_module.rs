//! Host course-module entity (read-only).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course: i64,
    /// Module type id
    pub module: i64,
    /// Activity instance id within the module type's table
    pub instance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::module::Entity",
        from = "Column::Module",
        to = "super::module::Column::Id"
    )]
    Module,
    #[sea_orm(
        belongs_to = "super::assign::Entity",
        from = "Column::Instance",
        to = "super::assign::Column::Id"
    )]
    Assign,
    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::assign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assign.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
