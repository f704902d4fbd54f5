use super::CredentialStore;
use crate::Result;
use crate::file_doc;
use crate::file_lock::acquire_file_lock;
use ohno::{EnrichableExt, app_err};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     store";

/// How a parameter's value is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ParameterKind {
    /// A plain value, readable without decryption
    String,

    /// A secret value, only returned when decryption is requested
    SecureString,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Parameter {
    #[serde(rename = "type")]
    kind: ParameterKind,
    value: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ParameterDoc {
    #[serde(default)]
    parameters: BTreeMap<String, Parameter>,
}

/// A credential store backed by a JSON document on disk.
///
/// The document is re-read on every access and rewritten on every `put`, under an
/// exclusive file lock. Values written through `put` are always stored as
/// [`ParameterKind::SecureString`]. The file is not encrypted; it is created readable
/// by its owner only.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ParameterDoc> {
        file_doc::load_or_default(&self.path)
    }
}

impl CredentialStore for FileCredentialStore {
    async fn get(&self, name: &str, decrypt: bool) -> Result<String> {
        let _lock = acquire_file_lock(&self.path).await?;
        let doc = self
            .load()
            .map_err(|e| e.enrich_with(|| format!("reading parameter '{name}'")))?;

        let Some(param) = doc.parameters.get(name) else {
            return Err(app_err!("parameter '{name}' not found in '{}'", self.path.display()));
        };

        if param.kind == ParameterKind::SecureString && !decrypt {
            return Err(app_err!("parameter '{name}' is a secure string and must be read with decryption"));
        }

        Ok(param.value.clone())
    }

    async fn put(&mut self, name: &str, value: &str, overwrite: bool) -> Result<()> {
        let _lock = acquire_file_lock(&self.path).await?;
        let mut doc = self
            .load()
            .map_err(|e| e.enrich_with(|| format!("writing parameter '{name}'")))?;

        if !overwrite && doc.parameters.contains_key(name) {
            return Err(app_err!("parameter '{name}' already exists and overwrite was not requested"));
        }

        let _ = doc.parameters.insert(
            name.to_string(),
            Parameter {
                kind: ParameterKind::SecureString,
                value: value.to_string(),
            },
        );

        file_doc::save(&doc, &self.path)?;
        log::debug!(target: LOG_TARGET, "Stored parameter '{name}' in '{}'", self.path.display());
        Ok(())
    }
}
