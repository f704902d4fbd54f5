use super::CredentialStore;
use crate::Result;
use ohno::app_err;
use std::collections::BTreeMap;

/// An in-process credential store.
///
/// Holds values for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `put` calls so far
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, name: &str, _decrypt: bool) -> Result<String> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| app_err!("parameter '{name}' not found"))
    }

    async fn put(&mut self, name: &str, value: &str, overwrite: bool) -> Result<()> {
        if !overwrite && self.values.contains_key(name) {
            return Err(app_err!("parameter '{name}' already exists"));
        }

        let _ = self.values.insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
