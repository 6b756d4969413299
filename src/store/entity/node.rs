use sea_orm::entity::prelude::*;

/// The node's own liveness record in the panel.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "node")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Unix timestamp of the last heartbeat.
    pub heartbeat_at: i64,
    /// Lifetime bytes relayed through this node.
    pub bandwidth_total: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
