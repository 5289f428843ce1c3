//! Host user entity (read-only).

use sea_orm::entity::prelude::*;

use domain::PrivacyUser;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain record
impl From<Model> for PrivacyUser {
    fn from(model: Model) -> Self {
        PrivacyUser {
            id: model.id,
            username: model.username,
            firstname: model.firstname,
            lastname: model.lastname,
        }
    }
}
