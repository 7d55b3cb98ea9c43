//! Linking recall to a spreadsheet.
//!
//! A spreadsheet is accepted only if the service answers the health check and
//! the spreadsheet holds both a `projects` and a `wikis` sheet. Settings are
//! written only after validation succeeds, so a failed connect leaves any
//! previous connection in place.

use crate::client::{RowClient, Transport};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{RecallError, Result};
use crate::model::{now_timestamp, RecordKind};
use crate::settings::{Settings, SettingsStore};
use tracing::info;

pub fn run<T: Transport>(client: &RowClient<T>, store: &SettingsStore) -> Result<CmdResult> {
    client.health()?;

    let titles: Vec<String> = client
        .list_sheets()?
        .into_iter()
        .map(|sheet| sheet.title)
        .collect();
    let complete = RecordKind::all()
        .iter()
        .all(|kind| titles.iter().any(|t| t == kind.sheet_name()));
    if !complete {
        return Err(RecallError::MissingSheets { found: titles });
    }

    let settings = Settings {
        spreadsheet_id: client.spreadsheet_id().to_string(),
        last_validated: now_timestamp(),
    };
    store.save(&settings)?;
    info!(spreadsheet_id = %settings.spreadsheet_id, "spreadsheet connected");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Connected to spreadsheet {}",
        settings.spreadsheet_id
    )));
    result.settings = Some(settings);
    Ok(result)
}

pub fn disconnect(store: &SettingsStore) -> Result<CmdResult> {
    let previous = store.load()?;
    store.clear()?;

    let mut result = CmdResult::default();
    match previous {
        Some(settings) => {
            info!(spreadsheet_id = %settings.spreadsheet_id, "spreadsheet disconnected");
            result.add_message(CmdMessage::success(format!(
                "Disconnected from spreadsheet {}",
                settings.spreadsheet_id
            )));
        }
        None => result.add_message(CmdMessage::info("No spreadsheet connected")),
    }
    Ok(result)
}

/// Reports the saved connection, if any. Never touches the network.
pub fn status(store: &SettingsStore) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.settings = store.load()?;
    if result.settings.is_none() {
        result.add_message(CmdMessage::warning(RecallError::NotConnected.to_string()));
    }
    Ok(result)
}
