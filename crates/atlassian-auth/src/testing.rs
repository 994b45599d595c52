//! In-memory vault fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::store::{CredentialStore, FileTokenStore, SecretVault};

/// Working keyring backed by a map.
#[derive(Default)]
pub struct MemoryVault {
    entries: Mutex<HashMap<(String, String), String>>,
    gets: AtomicUsize,
}

impl MemoryVault {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl SecretVault for MemoryVault {
    fn set_password(&self, service: &str, username: &str, payload: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert((service.into(), username.into()), payload.into());
        Ok(())
    }

    fn get_password(&self, service: &str, username: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&(service.into(), username.into()))
            .cloned())
    }
}

/// Keyring whose backend is never available.
#[derive(Default)]
pub struct FailingVault {
    sets: AtomicUsize,
    gets: AtomicUsize,
}

impl FailingVault {
    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

impl SecretVault for FailingVault {
    fn set_password(&self, _service: &str, _username: &str, _payload: &str) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(Error::Vault("platform secure storage failure".into()))
    }

    fn get_password(&self, _service: &str, _username: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(Error::Vault("platform secure storage failure".into()))
    }
}

/// Store over a fresh in-memory keyring, with the file fallback in `dir`.
pub fn memory_store(dir: &tempfile::TempDir) -> (CredentialStore, Arc<MemoryVault>) {
    let vault = Arc::new(MemoryVault::default());
    let store = CredentialStore::new(vault.clone(), FileTokenStore::new(dir.path().to_path_buf()));
    (store, vault)
}
