//! Persistence of the bearer token.
//!
//! Exactly one token record exists per client: the browser keeps it in local
//! storage, the terminal client in a file under the user's data directory.

use std::sync::Mutex;

use thiserror::Error;

/// Storage key (and file name) of the bearer token.
pub const TOKEN_KEY: &str = "access_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("token store unavailable: {0}")]
    Unavailable(String),
}

/// A single-slot home for the bearer token. Last write wins.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileTokenStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::path::{Path, PathBuf};

    use super::{StoreError, TOKEN_KEY, TokenStore};

    /// Token kept in a plain file (`<data dir>/qwenht/access_token`).
    #[derive(Debug, Clone)]
    pub struct FileTokenStore {
        path: PathBuf,
    }

    impl FileTokenStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Store under the platform data directory.
        pub fn in_data_dir() -> Result<Self, StoreError> {
            let base = dirs::data_dir().ok_or_else(|| {
                StoreError::Unavailable("no data directory for this platform".to_string())
            })?;
            Ok(Self::new(base.join("qwenht").join(TOKEN_KEY)))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl TokenStore for FileTokenStore {
        fn load(&self) -> Option<String> {
            match std::fs::read_to_string(&self.path) {
                Ok(contents) => {
                    let token = contents.trim();
                    (!token.is_empty()).then(|| token.to_string())
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), "failed to read token file: {err}");
                    None
                }
            }
        }

        fn save(&self, token: &str) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, token)?;
            Ok(())
        }

        fn clear(&self) -> Result<(), StoreError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorageTokenStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{StoreError, TOKEN_KEY, TokenStore};

    /// Token kept in `window.localStorage["access_token"]`.
    ///
    /// Holds no JS handles so it stays `Send + Sync`; storage is looked up on
    /// every call.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStorageTokenStore;

    impl LocalStorageTokenStore {
        fn storage() -> Result<web_sys::Storage, StoreError> {
            web_sys::window()
                .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?
                .local_storage()
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
                .ok_or_else(|| StoreError::Unavailable("local storage disabled".to_string()))
        }
    }

    impl TokenStore for LocalStorageTokenStore {
        fn load(&self) -> Option<String> {
            Self::storage().ok()?.get_item(TOKEN_KEY).ok().flatten()
        }

        fn save(&self, token: &str) -> Result<(), StoreError> {
            Self::storage()?
                .set_item(TOKEN_KEY, token)
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
        }

        fn clear(&self) -> Result<(), StoreError> {
            Self::storage()?
                .remove_item(TOKEN_KEY)
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);
        store.save("t1").unwrap();
        store.save("t2").unwrap();
        assert_eq!(store.load().as_deref(), Some("t2"));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_persists_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join(TOKEN_KEY));

        assert_eq!(store.load(), None);
        store.save("abc.def.ghi").unwrap();

        let reopened = FileTokenStore::new(store.path());
        assert_eq!(reopened.load().as_deref(), Some("abc.def.ghi"));

        reopened.clear().unwrap();
        assert_eq!(store.load(), None);
        // Clearing twice is fine.
        store.clear().unwrap();
    }
}
