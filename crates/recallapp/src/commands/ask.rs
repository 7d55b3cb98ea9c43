//! Hand-off to the AI chat page.
//!
//! Builds a chat URL pre-filled with the record's README id, tags and
//! description. Opening the URL is left to the caller.

use crate::client::{RowClient, Transport};
use crate::commands::helpers::resolve;
use crate::commands::{CmdResult, DisplayRecord, RecordSelector};
use crate::error::Result;
use crate::links::chat_url;
use crate::model::{Project, Record, RecordKind, Wiki};

pub fn run<T: Transport>(
    client: &RowClient<T>,
    chat_base: &str,
    kind: RecordKind,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    match kind {
        RecordKind::Project => prompt_for::<Project, T>(client, chat_base, selector),
        RecordKind::Wiki => prompt_for::<Wiki, T>(client, chat_base, selector),
    }
}

fn prompt_for<R: Record, T: Transport>(
    client: &RowClient<T>,
    chat_base: &str,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    let (row, record) = resolve::<R, T>(client, selector)?;
    let mut result = CmdResult::default();
    result.urls.push(chat_url(chat_base, &record));
    result.affected_records.push(DisplayRecord {
        index: row + 1,
        record: record.into_any(),
    });
    Ok(result)
}
