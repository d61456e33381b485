//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::UserRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub dob: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain record
impl From<Model> for UserRecord {
    fn from(model: Model) -> Self {
        UserRecord::new(model.id, model.name, model.dob)
    }
}
