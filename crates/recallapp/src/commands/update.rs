use crate::client::{RowClient, Transport};
use crate::commands::helpers::resolve;
use crate::commands::{CmdMessage, CmdResult, DisplayRecord, RecordSelector};
use crate::error::{RecallError, Result};
use crate::model::{now_timestamp, Project, ProjectPatch, Record, Wiki, WikiPatch};
use tracing::info;

pub fn project<T: Transport>(
    client: &RowClient<T>,
    selector: &RecordSelector,
    patch: ProjectPatch,
) -> Result<CmdResult> {
    if patch.is_empty() {
        return Err(nothing_to_update());
    }
    rewrite::<Project, T>(client, selector, |p| patch.apply(p))
}

pub fn wiki<T: Transport>(
    client: &RowClient<T>,
    selector: &RecordSelector,
    patch: WikiPatch,
) -> Result<CmdResult> {
    if patch.is_empty() {
        return Err(nothing_to_update());
    }
    rewrite::<Wiki, T>(client, selector, |w| patch.apply(w))
}

/// Resolves the row, applies `change`, refreshes `lastUpdated` and writes the
/// whole record back to the same row.
fn rewrite<R: Record, T: Transport>(
    client: &RowClient<T>,
    selector: &RecordSelector,
    change: impl FnOnce(&mut R),
) -> Result<CmdResult> {
    let (row, mut record) = resolve::<R, T>(client, selector)?;
    change(&mut record);
    record.touch(now_timestamp());

    client.update_row(R::KIND.sheet_name(), row, &record)?;
    info!(kind = %R::KIND, id = record.id(), row, "record updated");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} updated ({}): {}",
        R::KIND,
        row + 1,
        record.name()
    )));
    result.affected_records.push(DisplayRecord {
        index: row + 1,
        record: record.into_any(),
    });
    Ok(result)
}

fn nothing_to_update() -> RecallError {
    RecallError::Api("Nothing to update: no fields were given".to_string())
}
