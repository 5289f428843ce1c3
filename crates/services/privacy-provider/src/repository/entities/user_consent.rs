//! EULA acceptance entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plagiarism_turnitinsim_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub userid: i64,
    pub turnitinid: Option<String>,
    pub lasteulaaccepted: Option<String>,
    pub lasteulaacceptedtime: Option<i64>,
    pub lasteulaacceptedlang: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
