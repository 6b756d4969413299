use sea_orm::entity::prelude::*;

/// One row per distinct client source address observed for an account
/// during an accounting pass.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alive_client_ip")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub node_id: i64,
    pub account_id: i64,
    pub ip: String,
    /// Unix timestamp.
    pub logged_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
