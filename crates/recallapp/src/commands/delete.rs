use crate::client::{RowClient, Transport};
use crate::commands::helpers::resolve;
use crate::commands::{CmdMessage, CmdResult, DisplayRecord, RecordSelector};
use crate::error::Result;
use crate::model::{Project, Record, RecordKind, Wiki};
use tracing::info;

pub fn run<T: Transport>(
    client: &RowClient<T>,
    kind: RecordKind,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    match kind {
        RecordKind::Project => remove::<Project, T>(client, selector),
        RecordKind::Wiki => remove::<Wiki, T>(client, selector),
    }
}

fn remove<R: Record, T: Transport>(
    client: &RowClient<T>,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    let (row, record) = resolve::<R, T>(client, selector)?;
    client.delete_row(R::KIND.sheet_name(), row)?;
    info!(kind = %R::KIND, id = record.id(), row, "record deleted");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} deleted ({}): {}",
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
