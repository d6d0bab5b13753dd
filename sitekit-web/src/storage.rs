//! `localStorage` backend for the preference record.

use sitekit_core::{PreferenceStore, StorageError};

/// Browser `localStorage`. Outside the browser every call reports the
/// backend as unavailable, so callers fall back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = crate::dom::local_storage()
            .map_err(|err| StorageError::Unavailable(crate::dom::js_error_message(&err)))?;
        storage.get_item(key).map_err(|err| StorageError::Read {
            key: key.to_string(),
            reason: crate::dom::js_error_message(&err),
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = crate::dom::local_storage()
            .map_err(|err| StorageError::Unavailable(crate::dom::js_error_message(&err)))?;
        storage.set_item(key, value).map_err(|err| StorageError::Write {
            key: key.to_string(),
            reason: crate::dom::js_error_message(&err),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for LocalStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("localStorage requires a browser".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("localStorage requires a browser".into()))
    }
}
