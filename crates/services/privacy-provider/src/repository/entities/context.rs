//! Host context entity (read-only).

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::{Context, ContextLevel};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "context")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub contextlevel: i32,
    /// Course-module id for module-level contexts
    pub instanceid: i64,
    pub path: Option<String>,
    pub depth: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Context {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let level = ContextLevel::try_from(model.contextlevel)?;
        Ok(Context::new(model.id, level, model.instanceid))
    }
}
