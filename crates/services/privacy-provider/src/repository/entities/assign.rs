//! Host assignment instance entity (read-only).

use sea_orm::entity::prelude::*;

use domain::Activity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assign")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub intro: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_module::Entity")]
    CourseModule,
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseModule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Activity {
    fn from(model: Model) -> Self {
        Activity {
            id: model.id,
            name: model.name,
            intro: model.intro,
        }
    }
}
