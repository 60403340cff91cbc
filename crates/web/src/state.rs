use std::{collections::HashMap, sync::Arc, time::Duration, time::Instant};

use rand::{distributions::Alphanumeric, Rng};
use serde_json::Value;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use userdesk_accounts::DbAccountService;
use userdesk_auth::Authenticator;
use userdesk_config::AppConfig;

// Flash data only has to survive the redirect hop it was issued for; the
// TTL is a backstop against clients that never follow the redirect.
const DEFAULT_FLASH_TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    accounts: DbAccountService,
    authenticator: Authenticator,
    flash: FlashStore,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        Self {
            accounts: DbAccountService::new(pool.clone()),
            authenticator: Authenticator::new(pool.clone(), &config.auth),
            flash: FlashStore::default(),
            pool,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn accounts(&self) -> &DbAccountService {
        &self.accounts
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn flash(&self) -> &FlashStore {
        &self.flash
    }
}

/// Single-use handoff for data attached to a redirect.
///
/// Values are stored server-side under a random key; the key travels in a
/// short-lived cookie and consuming it removes the entry, so flash data is
/// visible to exactly one follow-up request.
#[derive(Clone)]
pub struct FlashStore {
    inner: Arc<Mutex<HashMap<String, (Value, Instant)>>>,
    ttl: Duration,
}

impl FlashStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn issue(&self, value: Value) -> String {
        let key = Self::random_key();
        let mut guard = self.inner.lock().await;
        Self::prune(&mut guard, self.ttl);
        guard.insert(key.clone(), (value, Instant::now()));
        key
    }

    pub async fn consume(&self, key: &str) -> Option<Value> {
        let mut guard = self.inner.lock().await;
        Self::prune(&mut guard, self.ttl);
        guard.remove(key).map(|(value, _)| value)
    }

    fn random_key() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect()
    }

    fn prune(map: &mut HashMap<String, (Value, Instant)>, ttl: Duration) {
        let now = Instant::now();
        map.retain(|_, (_, created)| now.duration_since(*created) <= ttl);
    }
}

impl Default for FlashStore {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::time::sleep;

    #[tokio::test]
    async fn flash_values_are_consumable_exactly_once() {
        let store = FlashStore::new(Duration::from_secs(60));
        let key = store.issue(json!({"error": "boom"})).await;

        assert_eq!(key.len(), 32);
        assert_eq!(
            store.consume(&key).await,
            Some(json!({"error": "boom"}))
        );
        assert_eq!(store.consume(&key).await, None);
    }

    #[tokio::test]
    async fn flash_entries_expire_after_ttl() {
        let store = FlashStore::new(Duration::from_millis(10));
        let key = store.issue(json!("late")).await;

        sleep(Duration::from_millis(25)).await;

        assert_eq!(store.consume(&key).await, None);
    }

    #[tokio::test]
    async fn flash_keys_are_independent() {
        let store = FlashStore::new(Duration::from_secs(60));
        let first = store.issue(json!(1)).await;
        let second = store.issue(json!(2)).await;

        assert_ne!(first, second);
        assert_eq!(store.consume(&second).await, Some(json!(2)));
        assert_eq!(store.consume(&first).await, Some(json!(1)));
    }
}
