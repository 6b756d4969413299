//! Account-set diffing.
//!
//! Pure comparison of the engine's known set against the store's
//! eligible set, keyed by email. Credential changes reclassify an
//! account as modified; a port-only change does not.

use std::collections::HashMap;

use crate::model::Account;

/// Outcome of one diff pass. Applying `removed` before re-adding
/// `modified` entries is the engine's job; the diff only classifies.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AccountDiff {
    pub added: Vec<Account>,
    pub modified: Vec<Account>,
    pub removed: Vec<String>,
}

impl AccountDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

/// Classify every eligible account against the known set.
///
/// An email present in both sets with identical credential material is
/// unchanged and appears in no bucket. Output order follows the
/// eligible slice for added/modified and the known slice for removed,
/// so the apply log stays stable across cycles.
pub fn diff_accounts(known: &[Account], eligible: &[Account]) -> AccountDiff {
    let known_by_email: HashMap<&str, &Account> =
        known.iter().map(|a| (a.email.as_str(), a)).collect();
    let eligible_emails: HashMap<&str, ()> =
        eligible.iter().map(|a| (a.email.as_str(), ())).collect();

    let mut diff = AccountDiff::default();

    for account in eligible {
        match known_by_email.get(account.email.as_str()) {
            None => diff.added.push(account.clone()),
            Some(existing) if existing.credential() != account.credential() => {
                diff.modified.push(account.clone());
            }
            Some(_) => {}
        }
    }

    for account in known {
        if !eligible_emails.contains_key(account.email.as_str()) {
            diff.removed.push(account.email.clone());
        }
    }

    diff
}
