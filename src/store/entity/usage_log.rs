use sea_orm::entity::prelude::*;

/// One usage history row per account per non-idle accounting pass.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "usage_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub uploaded: i64,
    pub downloaded: i64,
    pub node_id: i64,
    pub rate: f32,
    /// Human-readable total, e.g. "1.50GB".
    pub formatted_size: String,
    /// Unix timestamp.
    pub logged_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
