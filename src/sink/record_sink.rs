use super::Table;
use crate::metrics::NormalizedRecord;

const LOG_TARGET: &str = "      sink";

/// Decimal places kept for every stored number
pub const DECIMAL_PLACES: i32 = 2;

/// Outcome of persisting the records of one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistReport {
    pub persisted: usize,
    pub failed: usize,
}

/// Round and write each record as its own item.
///
/// A failed write is logged together with the offending item and does not stop the
/// remaining records from being written.
pub async fn persist(records: &[NormalizedRecord], table: &mut impl Table) -> PersistReport {
    let mut report = PersistReport::default();

    for record in records {
        let item = record.to_item().rounded(DECIMAL_PLACES);

        match table.put_item(&item).await {
            Ok(()) => {
                log::debug!(target: LOG_TARGET, "Stored {} record for {}", record.data_type(), record.timestamp);
                report.persisted += 1;
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not store item {item}: {e:#}");
                report.failed += 1;
            }
        }
    }

    log::info!(target: LOG_TARGET, "Stored {} of {} record(s)", report.persisted, records.len());
    report
}
