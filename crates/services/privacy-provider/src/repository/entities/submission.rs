//! Plagiarism submission entity.

use sea_orm::entity::prelude::*;

use domain::Submission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plagiarism_turnitinsim_sub")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Course-module id
    pub cm: i64,
    pub userid: i64,
    pub turnitinid: Option<String>,
    pub identifier: Option<String>,
    pub itemid: Option<i64>,
    pub submittedtime: Option<i64>,
    pub overallscore: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_module::Entity",
        from = "Column::Cm",
        to = "super::course_module::Column::Id"
    )]
    CourseModule,
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseModule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Submission {
    fn from(model: Model) -> Self {
        Submission {
            id: model.id,
            cm: model.cm,
            userid: model.userid,
            turnitinid: model.turnitinid,
            identifier: model.identifier,
            itemid: model.itemid,
            submittedtime: model.submittedtime,
            overallscore: model.overallscore,
        }
    }
}
