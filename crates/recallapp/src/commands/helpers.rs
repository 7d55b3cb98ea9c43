use crate::client::{RowClient, Transport};
use crate::commands::{DisplayRecord, RecordSelector};
use crate::error::{RecallError, Result};
use crate::model::Record;

/// Fetches every row of `R`'s sheet, in sheet order.
pub fn fetch<R: Record, T: Transport>(client: &RowClient<T>) -> Result<Vec<R>> {
    Ok(client.get_rows(R::KIND.sheet_name())?)
}

/// Pairs records with their 1-based display index.
pub fn index_records<R: Record>(records: Vec<R>) -> Vec<DisplayRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| DisplayRecord {
            index: i + 1,
            record: record.into_any(),
        })
        .collect()
}

/// Finds the record a selector names within `records`.
///
/// Returns the 0-based row index with the record.
pub fn find<'a, R: Record>(records: &'a [R], selector: &RecordSelector) -> Result<(usize, &'a R)> {
    let found = match selector {
        RecordSelector::Index(display) => display
            .checked_sub(1)
            .and_then(|row| records.get(row).map(|r| (row, r))),
        RecordSelector::Id(id) => records.iter().enumerate().find(|(_, r)| r.id() == id.as_str()),
    };
    found.ok_or_else(|| RecallError::RecordNotFound {
        kind: R::KIND.label().to_string(),
        selector: selector.to_string(),
    })
}

/// Re-fetches the sheet and resolves the selector against it.
///
/// Called right before every mutation so the row index is as fresh as the
/// service allows.
pub fn resolve<R: Record, T: Transport>(
    client: &RowClient<T>,
    selector: &RecordSelector,
) -> Result<(usize, R)> {
    let records = fetch::<R, T>(client)?;
    let (row, record) = find(&records, selector)?;
    Ok((row, record.clone()))
}
