//! Panel database access.
//!
//! Only this module talks to the store: one eligible-account read per
//! cycle, one scoped transaction per non-idle account, and one
//! heartbeat write per cycle. Production runs against MySQL; tests run
//! the same statements against in-memory sqlite.

pub mod entity;

use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::error::Result;
use crate::logger::log;
use crate::model::{Account, TrafficSnapshot};
use crate::utils;
use entity::{account, alive_client_ip, node, node_online_log, usage_log};

/// Rate recorded on every usage_log row. The agent accounts raw bytes;
/// rate weighting is the panel's concern.
const USAGE_RATE: f32 = 1.0;

/// Handle to the panel database, long-lived and shared across cycles.
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    /// Connect to the panel database and verify the connection.
    pub async fn connect(url: &str) -> Result<Self> {
        let db = Database::connect(url).await?;
        db.ping().await?;
        log::info!("Connected to panel database");
        Ok(Self { db })
    }

    /// Wrap an existing connection (tests).
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch the authoritative account set for this node: enabled,
    /// credentialed, unexpired, class at or above the node's threshold,
    /// with transfer quota left.
    pub async fn fetch_eligible_accounts(&self, class_threshold: i32) -> Result<Vec<Account>> {
        let now = Utc::now().naive_utc();
        let rows = account::Entity::find()
            .filter(account::Column::Enabled.eq(true))
            .filter(account::Column::CredentialId.is_not_null())
            .filter(account::Column::ClassExpire.gte(now))
            .filter(account::Column::Class.gte(class_threshold))
            .filter(
                Expr::col(account::Column::Uploaded)
                    .add(Expr::col(account::Column::Downloaded))
                    .lt(Expr::col(account::Column::TransferEnable)),
            )
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().filter_map(into_account).collect())
    }

    /// Persist one account's snapshot as a single transaction: bump the
    /// account's cumulative totals, append the usage-log row, record
    /// the distinct-client observation and each observed address. Any
    /// failure rolls the whole write back.
    pub async fn record_account_traffic(
        &self,
        node_id: i64,
        account_ref: &Account,
        snapshot: &TrafficSnapshot,
    ) -> Result<()> {
        let account_id = account_ref.id;
        let uploads = snapshot.uploads;
        let downloads = snapshot.downloads;
        let clients = snapshot.clients;
        let ips = snapshot.ips.clone();
        let now = Utc::now().timestamp();

        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    account::Entity::update_many()
                        .col_expr(
                            account::Column::Uploaded,
                            Expr::col(account::Column::Uploaded).add(uploads),
                        )
                        .col_expr(
                            account::Column::Downloaded,
                            Expr::col(account::Column::Downloaded).add(downloads),
                        )
                        .filter(account::Column::Id.eq(account_id))
                        .exec(txn)
                        .await?;

                    usage_log::ActiveModel {
                        id: NotSet,
                        account_id: Set(account_id),
                        uploaded: Set(uploads),
                        downloaded: Set(downloads),
                        node_id: Set(node_id),
                        rate: Set(USAGE_RATE),
                        formatted_size: Set(utils::format_size(uploads + downloads)),
                        logged_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    node_online_log::ActiveModel {
                        id: NotSet,
                        node_id: Set(node_id),
                        online_accounts: Set(clients),
                        logged_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    for ip in ips {
                        alive_client_ip::ActiveModel {
                            id: NotSet,
                            node_id: Set(node_id),
                            account_id: Set(account_id),
                            ip: Set(ip),
                            logged_at: Set(now),
                        }
                        .insert(txn)
                        .await?;
                    }

                    Ok(())
                })
            })
            .await?;

        Ok(())
    }

    /// Refresh the node's liveness timestamp and bump its lifetime
    /// bandwidth counter.
    pub async fn heartbeat(&self, node_id: i64, bandwidth: i64) -> Result<()> {
        let now = Utc::now().timestamp();
        node::Entity::update_many()
            .col_expr(node::Column::HeartbeatAt, Expr::value(now))
            .col_expr(
                node::Column::BandwidthTotal,
                Expr::col(node::Column::BandwidthTotal).add(bandwidth),
            )
            .filter(node::Column::Id.eq(node_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

fn into_account(row: account::Model) -> Option<Account> {
    let uuid = row.credential_id?;
    Some(Account {
        id: row.id,
        email: row.email,
        uuid,
        secret: row.credential_secret,
        cipher: row.cipher,
        port: row.port.map(|p| p as u16),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::{account_template, connect_sqlite, seed_account, seed_node};
    use super::*;
    use chrono::Duration;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, Statement};

    fn snapshot(email: &str, up: i64, down: i64, ips: &[&str]) -> TrafficSnapshot {
        TrafficSnapshot {
            email: email.to_string(),
            uploads: up,
            downloads: down,
            clients: ips.len() as i64,
            ips: ips.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn domain_account(id: i64, email: &str) -> Account {
        Account {
            id,
            email: email.to_string(),
            uuid: format!("uuid-{}", id),
            secret: None,
            cipher: None,
            port: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_eligible_accounts_filters() {
        let db = connect_sqlite().await;
        seed_account(&db, 1, "ok@x", "uuid-1").await;

        let mut disabled = account_template(2, "disabled@x");
        disabled.enabled = Set(false);
        disabled.insert(&db).await.unwrap();

        let mut expired = account_template(3, "expired@x");
        expired.class_expire = Set(chrono::Utc::now().naive_utc() - Duration::days(1));
        expired.insert(&db).await.unwrap();

        let mut low_class = account_template(4, "freeloader@x");
        low_class.class = Set(0);
        low_class.insert(&db).await.unwrap();

        let mut exhausted = account_template(5, "drained@x");
        exhausted.transfer_enable = Set(100);
        exhausted.uploaded = Set(60);
        exhausted.downloaded = Set(40);
        exhausted.insert(&db).await.unwrap();

        let mut no_credential = account_template(6, "empty@x");
        no_credential.credential_id = Set(None);
        no_credential.insert(&db).await.unwrap();

        let store = Store::from_connection(db);
        let accounts = store.fetch_eligible_accounts(1).await.unwrap();
        let emails: Vec<&str> = accounts.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, vec!["ok@x"]);
        assert_eq!(accounts[0].uuid, "uuid-1");
    }

    #[tokio::test]
    async fn test_fetch_eligible_accounts_class_threshold_zero_admits_all_classes() {
        let db = connect_sqlite().await;
        let mut free_tier = account_template(1, "free@x");
        free_tier.class = Set(0);
        free_tier.insert(&db).await.unwrap();

        let store = Store::from_connection(db);
        assert_eq!(store.fetch_eligible_accounts(0).await.unwrap().len(), 1);
        assert!(store.fetch_eligible_accounts(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_account_traffic_writes_all_rows() {
        let db = connect_sqlite().await;
        seed_account(&db, 1, "a@x", "uuid-1").await;
        let store = Store::from_connection(db);

        let snap = snapshot("a@x", 100, 50, &["1.2.3.4", "5.6.7.8"]);
        store
            .record_account_traffic(9, &domain_account(1, "a@x"), &snap)
            .await
            .unwrap();

        let row = account::Entity::find_by_id(1)
            .one(&store.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.uploaded, 100);
        assert_eq!(row.downloaded, 50);

        let logs = usage_log::Entity::find().all(&store.db).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].account_id, 1);
        assert_eq!(logs[0].node_id, 9);
        assert_eq!(logs[0].formatted_size, "150B");

        let online = node_online_log::Entity::find().all(&store.db).await.unwrap();
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].online_accounts, 2);

        let ips = alive_client_ip::Entity::find().all(&store.db).await.unwrap();
        assert_eq!(ips.len(), 2);
        assert!(ips.iter().all(|r| r.account_id == 1 && r.node_id == 9));
    }

    #[tokio::test]
    async fn test_record_account_traffic_accumulates_totals() {
        let db = connect_sqlite().await;
        seed_account(&db, 1, "a@x", "uuid-1").await;
        let store = Store::from_connection(db);
        let account_ref = domain_account(1, "a@x");

        store
            .record_account_traffic(9, &account_ref, &snapshot("a@x", 10, 5, &[]))
            .await
            .unwrap();
        store
            .record_account_traffic(9, &account_ref, &snapshot("a@x", 1, 2, &[]))
            .await
            .unwrap();

        let row = account::Entity::find_by_id(1)
            .one(&store.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.uploaded, 11);
        assert_eq!(row.downloaded, 7);
    }

    #[tokio::test]
    async fn test_record_account_traffic_rolls_back_on_failed_insert() {
        let db = connect_sqlite().await;
        seed_account(&db, 1, "a@x", "uuid-1").await;

        // Make the usage-log insert fail after the totals update has
        // already executed inside the transaction.
        let backend = db.get_database_backend();
        db.execute(Statement::from_string(
            backend,
            "DROP TABLE usage_log".to_string(),
        ))
        .await
        .unwrap();

        let store = Store::from_connection(db);
        let result = store
            .record_account_traffic(9, &domain_account(1, "a@x"), &snapshot("a@x", 100, 50, &[]))
            .await;
        assert!(result.is_err());

        let row = account::Entity::find_by_id(1)
            .one(&store.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.uploaded, 0, "totals update must roll back");
        assert_eq!(row.downloaded, 0);
    }

    #[tokio::test]
    async fn test_heartbeat_refreshes_and_accumulates() {
        let db = connect_sqlite().await;
        seed_node(&db, 9).await;
        let store = Store::from_connection(db);

        store.heartbeat(9, 150).await.unwrap();
        store.heartbeat(9, 50).await.unwrap();

        let row = node::Entity::find_by_id(9)
            .one(&store.db)
            .await
            .unwrap()
            .unwrap();
        assert!(row.heartbeat_at > 0);
        assert_eq!(row.bandwidth_total, 200);
    }
}
