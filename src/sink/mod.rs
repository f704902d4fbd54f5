//! Persisting normalized records.
//!
//! Every record becomes one flat [`Item`] with its numbers rounded to two decimals,
//! written through the [`Table`] abstraction. [`JsonFileTable`] is the local adapter.

mod item;
mod json_table;
mod record_sink;
mod table;

pub use item::{AttributeValue, Item};
pub use json_table::JsonFileTable;
pub use record_sink::{DECIMAL_PLACES, PersistReport, persist};
pub use table::{DATA_TYPE_ATTRIBUTE, TIMESTAMP_ATTRIBUTE, Table};
