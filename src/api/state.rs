//! Application state for the Webtranet engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the editable engine configuration. Calculations take a read lock
/// for their snapshot; the settings endpoints take a write lock.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RwLock<ConfigLoader>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Locks the configuration for reading.
    pub async fn config(&self) -> RwLockReadGuard<'_, ConfigLoader> {
        self.config.read().await
    }

    /// Locks the configuration for editing.
    pub async fn config_mut(&self) -> RwLockWriteGuard<'_, ConfigLoader> {
        self.config.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_configuration() {
        let state = AppState::new(ConfigLoader::builtin());
        let other = state.clone();

        other
            .config_mut()
            .await
            .config_mut()
            .exchange_rates_mut()
            .set_rate(Currency::Usd, Decimal::new(1400, 0))
            .unwrap();

        assert_eq!(
            state.config().await.get_exchange_rate(Currency::Usd),
            Decimal::new(1400, 0)
        );
    }
}
