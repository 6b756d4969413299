//! Domain types shared between the store, the remote client wrappers and
//! the reconciliation engine.

/// One proxy user as read from the panel database.
///
/// The email is the natural key used for diffing; it must be unique
/// within a node's active set. The numeric id is the store primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub email: String,
    /// UUID credential (vmess/vless).
    pub uuid: String,
    /// Password credential (shadowsocks).
    pub secret: Option<String>,
    /// Cipher name for the password credential.
    pub cipher: Option<String>,
    /// Assigned port for protocols provisioned as standalone listeners.
    pub port: Option<u16>,
}

impl Account {
    /// The credential material compared during diffing.
    ///
    /// The port is deliberately excluded: a port-only change does not
    /// re-provision the user (see the diff tests).
    pub fn credential(&self) -> (&str, Option<&str>, Option<&str>) {
        (
            self.uuid.as_str(),
            self.secret.as_deref(),
            self.cipher.as_deref(),
        )
    }
}

/// One account's traffic counters for one reconciliation cycle.
///
/// Produced by a query-and-reset against the proxy's live counters and
/// discarded after persistence; the remote side owns the running
/// counters between reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficSnapshot {
    pub email: String,
    pub uploads: i64,
    pub downloads: i64,
    /// Count of distinct client source addresses observed.
    pub clients: i64,
    pub ips: Vec<String>,
}

impl TrafficSnapshot {
    pub fn total(&self) -> i64 {
        self.uploads + self.downloads
    }

    /// True when the account moved no bytes this cycle; idle snapshots
    /// are never written to the store.
    pub fn is_idle(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str, uuid: &str) -> Account {
        Account {
            id: 1,
            email: email.to_string(),
            uuid: uuid.to_string(),
            secret: None,
            cipher: None,
            port: None,
        }
    }

    #[test]
    fn test_credential_ignores_port() {
        let mut a = account("a@x", "uuid-1");
        let cred = (a.credential().0.to_string(), a.credential().1.map(str::to_string));
        a.port = Some(8443);
        assert_eq!(a.credential().0, cred.0);
        assert_eq!(a.credential().1.as_deref(), cred.1.as_deref());
    }

    #[test]
    fn test_snapshot_idle() {
        let mut snap = TrafficSnapshot {
            email: "a@x".to_string(),
            ..Default::default()
        };
        assert!(snap.is_idle());
        snap.uploads = 1;
        assert!(!snap.is_idle());
        assert_eq!(snap.total(), 1);
    }
}
