use super::{AttributeValue, DATA_TYPE_ATTRIBUTE, Item, TIMESTAMP_ATTRIBUTE, Table};
use crate::Result;
use crate::file_doc;
use crate::file_lock::acquire_file_lock;
use ohno::{EnrichableExt, app_err};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     table";

#[derive(Debug, Default, Serialize, Deserialize)]
struct TableDoc {
    #[serde(default)]
    items: BTreeMap<String, Item>,
}

/// A table stored as a JSON document on the local file system.
///
/// Each write locks the document, loads it, replaces the item with the same key, and
/// saves it again, so concurrent invocations never lose each other's items.
#[derive(Debug, Clone)]
pub struct JsonFileTable {
    path: PathBuf,
}

impl JsonFileTable {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored item, ordered by key.
    pub async fn items(&self) -> Result<Vec<Item>> {
        let _lock = acquire_file_lock(&self.path).await?;
        let doc: TableDoc = file_doc::load_or_default(&self.path).map_err(|e| e.enrich_with(|| format!("reading table '{}'", self.path.display())))?;
        Ok(doc.items.into_values().collect())
    }
}

/// The key an item is stored under
fn item_key(item: &Item) -> Result<String> {
    let data_type = item
        .string(DATA_TYPE_ATTRIBUTE)
        .ok_or_else(|| app_err!("item has no string '{DATA_TYPE_ATTRIBUTE}' attribute"))?;
    let timestamp = item
        .string(TIMESTAMP_ATTRIBUTE)
        .ok_or_else(|| app_err!("item has no string '{TIMESTAMP_ATTRIBUTE}' attribute"))?;

    Ok(format!("{data_type}#{timestamp}"))
}

fn check_numbers(item: &Item) -> Result<()> {
    for (name, value) in item.iter() {
        if let AttributeValue::N(n) = value
            && !n.is_finite()
        {
            return Err(app_err!("attribute '{name}' holds {n}, which cannot be stored"));
        }
    }

    Ok(())
}

impl Table for JsonFileTable {
    async fn put_item(&mut self, item: &Item) -> Result<()> {
        let key = item_key(item)?;
        check_numbers(item)?;

        let _lock = acquire_file_lock(&self.path).await?;
        let mut doc: TableDoc = file_doc::load_or_default(&self.path).map_err(|e| e.enrich_with(|| format!("reading table '{}'", self.path.display())))?;

        if doc.items.insert(key.clone(), item.clone()).is_some() {
            log::debug!(target: LOG_TARGET, "Replacing item '{key}'");
        }

        file_doc::save(&doc, &self.path).map_err(|e| e.enrich_with(|| format!("writing table '{}'", self.path.display())))
    }
}
