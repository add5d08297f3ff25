use std::sync::Arc;

use crate::store::Store;
use crate::{Error, Result};

pub const UPGRADED_FLAG: &str = "upgraded";

/// The purchase flow lives outside this crate; all it does here is flip
/// the `upgraded` flag that gates hints.
#[derive(Clone)]
pub struct Entitlements {
    store: Arc<Store>,
}

impl Entitlements {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn upgraded(&self) -> Result<bool> {
        self.store.flag(UPGRADED_FLAG)
    }

    pub fn set_upgraded(&self, value: bool) -> Result<()> {
        tracing::info!(upgraded = value, "entitlement changed");
        self.store.set_flag(UPGRADED_FLAG, value)
    }

    pub fn require_upgrade(&self) -> Result<()> {
        if self.upgraded()? {
            Ok(())
        } else {
            Err(Error::UpgradeRequired)
        }
    }
}
