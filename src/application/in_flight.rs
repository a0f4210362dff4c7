use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// (token_x_mint, token_y_mint, user_wallet)
type RequestKey = (String, String, String);

/// Tracks position requests currently being orchestrated
#[derive(Debug, Default, Clone)]
pub struct InFlightRegistry {
    active: Arc<Mutex<HashSet<RequestKey>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the key, or `None` if an identical request already holds it
    pub fn try_acquire(
        &self,
        token_x_mint: &str,
        token_y_mint: &str,
        user_wallet: &str,
    ) -> Option<InFlightGuard> {
        let key = (
            token_x_mint.to_string(),
            token_y_mint.to_string(),
            user_wallet.to_string(),
        );
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            registry: self.active.clone(),
            key,
        })
    }

    pub fn len(&self) -> usize {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases its key on drop
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<Mutex<HashSet<RequestKey>>>,
    key: RequestKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_blocks_identical_request_until_dropped() {
        let registry = InFlightRegistry::new();

        let guard = registry.try_acquire("x", "y", "wallet").expect("first claim");
        assert!(registry.try_acquire("x", "y", "wallet").is_none());
        // other pair or wallet is independent
        let other = registry.try_acquire("x", "z", "wallet");
        assert!(other.is_some());
        assert_eq!(registry.len(), 2);

        drop(guard);
        drop(other);
        assert!(registry.is_empty());
        assert!(registry.try_acquire("x", "y", "wallet").is_some());
    }
}
