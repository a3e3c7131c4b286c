//! Browser `localStorage` backend (WASM only)
//!
//! Talks to `web/portal_storage.js`, registered as a miniquad plugin.
//! Values cross the boundary as UTF-8 byte buffers.

use super::{KeyValueStore, StorageError};

// ─────────────────────────────────────────────────────────────────────────────
// FFI bindings to web/portal_storage.js
// ─────────────────────────────────────────────────────────────────────────────

extern "C" {
    fn portal_storage_available() -> i32;
    /// Stages the value for `key`; returns its byte length, or -1 if absent
    fn portal_storage_get(key_ptr: *const u8, key_len: usize) -> i32;
    fn portal_storage_copy_value(dest_ptr: *mut u8, max_len: usize) -> usize;
    /// Returns 1 on success, 0 if the browser refused (quota, private mode)
    fn portal_storage_set(key_ptr: *const u8, key_len: usize, val_ptr: *const u8, val_len: usize) -> i32;
}

/// Browser localStorage
#[derive(Debug, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }

    fn available(&self) -> bool {
        unsafe { portal_storage_available() != 0 }
    }
}

impl KeyValueStore for WebStorage {
    fn label(&self) -> &'static str {
        "localStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available() {
            return Err(StorageError::Unavailable("localStorage disabled".into()));
        }

        let len = unsafe { portal_storage_get(key.as_ptr(), key.len()) };
        if len < 0 {
            return Ok(None);
        }

        let mut buf = vec![0u8; len as usize];
        let copied = unsafe { portal_storage_copy_value(buf.as_mut_ptr(), buf.len()) };
        buf.truncate(copied);
        String::from_utf8(buf)
            .map(Some)
            .map_err(|e| StorageError::Serde(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available() {
            return Err(StorageError::Unavailable("localStorage disabled".into()));
        }

        let ok = unsafe { portal_storage_set(key.as_ptr(), key.len(), value.as_ptr(), value.len()) };
        if ok == 0 {
            return Err(StorageError::Unavailable(format!("write rejected for {}", key)));
        }
        Ok(())
    }
}

extern "C" {
    fn portal_open_url(url_ptr: *const u8, url_len: usize);
}

/// Open `url` in a new browser tab
pub fn open_url(url: &str) {
    unsafe { portal_open_url(url.as_ptr(), url.len()) }
}
