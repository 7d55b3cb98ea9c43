use crate::client::{RowClient, Transport};
use crate::commands::{CmdMessage, CmdResult, DisplayRecord};
use crate::error::Result;
use crate::model::{Project, ProjectDraft, Record, Wiki, WikiDraft};
use tracing::info;

pub fn project<T: Transport>(client: &RowClient<T>, draft: ProjectDraft) -> Result<CmdResult> {
    append(client, Project::new(draft))
}

pub fn wiki<T: Transport>(client: &RowClient<T>, draft: WikiDraft) -> Result<CmdResult> {
    append(client, Wiki::new(draft))
}

/// Appends a fully built record to its sheet.
pub fn append<R: Record, T: Transport>(client: &RowClient<T>, record: R) -> Result<CmdResult> {
    let created = client.create_row(R::KIND.sheet_name(), &record)?;
    info!(kind = %R::KIND, id = record.id(), row = created.row_index, "record created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} created ({}): {}",
        R::KIND,
        created.row_index + 1,
        record.name()
    )));
    result.affected_records.push(DisplayRecord {
        index: created.row_index + 1,
        record: record.into_any(),
    });
    Ok(result)
}
