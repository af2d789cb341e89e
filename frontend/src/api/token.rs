use std::{cell::RefCell, rc::Rc};

use super::types::ApiError;
use crate::utils::storage as storage_utils;

/// Local storage key shared with the login and logout flows.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Where the bearer token lives. Injected into [`super::ApiClient`].
pub trait TokenStore {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<(), ApiError>;
    fn clear(&self);
}

/// Browser local storage under [`TOKEN_STORAGE_KEY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokens;

impl TokenStore for LocalStorageTokens {
    fn token(&self) -> Option<String> {
        storage_utils::read_item(TOKEN_STORAGE_KEY)
    }

    fn store(&self, token: &str) -> Result<(), ApiError> {
        storage_utils::write_item(TOKEN_STORAGE_KEY, token).map_err(ApiError::storage)
    }

    fn clear(&self) {
        storage_utils::remove_item(TOKEN_STORAGE_KEY);
    }
}

/// Token kept in memory; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokens {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokens {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokens {
    fn token(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn store(&self, token: &str) -> Result<(), ApiError> {
        *self.slot.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

/// Stored token if it is usable as a bearer credential.
pub fn bearer_token(store: &dyn TokenStore) -> Option<String> {
    store
        .token()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_tokens_share_slot_between_clones() {
        let tokens = MemoryTokens::default();
        let other = tokens.clone();
        tokens.store("abc123").unwrap();
        assert_eq!(other.token().as_deref(), Some("abc123"));
        other.clear();
        assert!(tokens.token().is_none());
    }

    #[test]
    fn bearer_token_ignores_blank_values() {
        assert!(bearer_token(&MemoryTokens::default()).is_none());
        assert!(bearer_token(&MemoryTokens::with_token("")).is_none());
        assert!(bearer_token(&MemoryTokens::with_token("  ")).is_none());
        assert_eq!(
            bearer_token(&MemoryTokens::with_token("abc123")).as_deref(),
            Some("abc123")
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_storage_is_empty_outside_the_browser() {
        let tokens = LocalStorageTokens;
        assert!(tokens.token().is_none());
        let err = tokens.store("abc123").unwrap_err();
        assert_eq!(err.code, "STORAGE_ERROR");
        tokens.clear();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        let tokens = LocalStorageTokens;
        tokens.clear();
        assert!(tokens.token().is_none());

        tokens.store("abc123").unwrap();
        assert_eq!(tokens.token().as_deref(), Some("abc123"));
        assert_eq!(
            storage_utils::read_item(TOKEN_STORAGE_KEY).as_deref(),
            Some("abc123")
        );

        tokens.clear();
        assert!(tokens.token().is_none());
    }
}
