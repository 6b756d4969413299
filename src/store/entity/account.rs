use sea_orm::entity::prelude::*;

/// Identity record for one proxy user. Rows are created and edited by
/// the panel's account management; the agent only reads them, plus the
/// cumulative traffic counters it increments.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    /// UUID credential (vmess/vless protocols).
    pub credential_id: Option<String>,
    /// Password credential (shadowsocks).
    pub credential_secret: Option<String>,
    pub cipher: Option<String>,
    pub port: Option<i32>,
    pub enabled: bool,
    pub class: i32,
    pub class_expire: DateTime,
    /// Transfer quota in bytes.
    pub transfer_enable: i64,
    pub uploaded: i64,
    pub downloaded: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
