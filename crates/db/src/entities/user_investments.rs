//! `SeaORM` Entity for user_investments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvestmentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_investments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub investment_option_id: Uuid,
    pub amount: Decimal,
    pub status: InvestmentStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::investment_options::Entity",
        from = "Column::InvestmentOptionId",
        to = "super::investment_options::Column::Id"
    )]
    InvestmentOptions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::investment_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvestmentOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
