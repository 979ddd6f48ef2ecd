//! `SeaORM` Entity for investment_options table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "investment_options")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub min_investment: Decimal,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_investments::Entity")]
    UserInvestments,
}

impl Related<super::user_investments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserInvestments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
