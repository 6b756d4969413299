use sea_orm::entity::prelude::*;

/// Distinct-client observation for the node, one row per accounting
/// pass that persisted traffic.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "node_online_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub node_id: i64,
    pub online_accounts: i64,
    /// Unix timestamp.
    pub logged_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
