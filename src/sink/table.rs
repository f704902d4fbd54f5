use super::Item;
use crate::Result;

/// Attribute holding the metric tag; part of the item key
pub const DATA_TYPE_ATTRIBUTE: &str = "DataType";

/// Attribute holding the invocation date; part of the item key
pub const TIMESTAMP_ATTRIBUTE: &str = "timestamp";

/// A key-value table that stores flat items.
///
/// Items are keyed by their `DataType` and `timestamp` attributes. Writing an item
/// whose key already exists replaces the stored item.
#[expect(async_fn_in_trait, reason = "tables are driven on a current-thread runtime")]
pub trait Table {
    /// Write a single item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item could not be stored.
    async fn put_item(&mut self, item: &Item) -> Result<()>;
}
