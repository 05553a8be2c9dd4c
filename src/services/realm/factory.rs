//! Factory: build the shared `RealmConfigStore` from application `Config`.
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::services::realm::{RealmConfigStore, StoreError};

pub fn build_realm_store(config: &Config) -> Result<Arc<RealmConfigStore>, StoreError> {
    let mut store = RealmConfigStore::load(&config.realm_config_path)?;
    if let Some(default_realm) = &config.default_realm {
        store = store.with_default_realm(default_realm.clone());
    }

    // Not fatal: requests that fall back to the default realm fail at runtime.
    if !store.has_default_realm() {
        warn!(
            default_realm = %store.default_realm(),
            "default realm has no configuration"
        );
    }

    info!(
        path = %config.realm_config_path.display(),
        default_realm = %store.default_realm(),
        realms = %store.realm_names().collect::<Vec<_>>().join(","),
        "loaded realm configuration"
    );

    Ok(Arc::new(store))
}
