use std::sync::Arc;

use {agora_apps::AppId, dashmap::DashMap, tokio::sync::Mutex};

/// Lock table guaranteeing at most one in-flight provisioning per app id.
///
/// Two concurrent provisions of the same app would otherwise race the
/// "does the bot exist?" check and create duplicate bots. Entries are tiny
/// and provisioning is rare, so the table is never pruned.
#[derive(Default)]
pub(crate) struct AppLocks {
    locks: DashMap<AppId, Arc<Mutex<()>>>,
}

impl AppLocks {
    pub(crate) fn acquire(&self, app_id: &AppId) -> Arc<Mutex<()>> {
        self.locks
            .entry(app_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_app_id_yields_the_same_lock() {
        let locks = AppLocks::default();
        let a = locks.acquire(&AppId::from("acme"));
        let b = locks.acquire(&AppId::from("acme"));
        assert!(Arc::ptr_eq(&a, &b));

        let other = locks.acquire(&AppId::from("other"));
        assert!(!Arc::ptr_eq(&a, &other));
    }
}
