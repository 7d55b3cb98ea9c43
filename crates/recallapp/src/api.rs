//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all recall operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g. turning `"3"` or `"9f1c…"` into a [`RecordSelector`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O operations**: no stdout, stderr, or formatting
//! - **Presentation concerns**: returns data structures, not strings
//!
//! ## Selectors
//!
//! - **Display index**: a positive number, as printed by `recall list` (`1`, `12`)
//! - **Record id**: anything else, matched exactly against the `id` column
//!
//! ## Generic Over Transport
//!
//! `RecallApi<T: Transport>` is generic over the wire:
//! - Production: `RecallApi<HttpTransport>`
//! - Testing: `RecallApi<MemTransport>`
//!
//! An API value is bound to one spreadsheet. Operations that only concern the
//! saved connection ([`status`], [`disconnect`]) need no spreadsheet and are
//! free functions.

use crate::client::{HttpTransport, RowClient, Transport};
use crate::commands::{self, get::KindScope, CmdResult, RecordSelector};
use crate::config::RecallConfig;
use crate::error::{RecallError, Result};
use crate::filter::FilterState;
use crate::model::{ProjectDraft, ProjectPatch, RecordKind, WikiDraft, WikiPatch};
use crate::settings::SettingsStore;

/// The main API facade for recall operations.
pub struct RecallApi<T: Transport> {
    client: RowClient<T>,
    settings: SettingsStore,
    chat_url: String,
}

impl RecallApi<HttpTransport> {
    /// API over HTTP, using the configured service URL and timeout.
    pub fn from_config(
        config: &RecallConfig,
        spreadsheet_id: impl Into<String>,
        settings: SettingsStore,
    ) -> Result<Self> {
        let client = RowClient::http(&config.api_url, spreadsheet_id, config.timeout())?;
        Ok(Self::new(client, settings, config.chat_url.clone()))
    }
}

impl<T: Transport> RecallApi<T> {
    pub fn new(client: RowClient<T>, settings: SettingsStore, chat_url: impl Into<String>) -> Self {
        Self {
            client,
            settings,
            chat_url: chat_url.into(),
        }
    }

    pub fn client(&self) -> &RowClient<T> {
        &self.client
    }

    /// Validates the bound spreadsheet and saves it as the connection.
    pub fn connect(&self) -> Result<CmdResult> {
        commands::connect::run(&self.client, &self.settings)
    }

    pub fn view(&self, filter: &FilterState, scope: KindScope) -> Result<CmdResult> {
        commands::get::view(&self.client, filter, scope)
    }

    pub fn list(&self, kind: RecordKind) -> Result<CmdResult> {
        commands::get::list(&self.client, kind)
    }

    pub fn facets(&self) -> Result<CmdResult> {
        commands::get::facets(&self.client)
    }

    pub fn create_project(&self, draft: ProjectDraft) -> Result<CmdResult> {
        commands::create::project(&self.client, draft)
    }

    pub fn create_wiki(&self, draft: WikiDraft) -> Result<CmdResult> {
        commands::create::wiki(&self.client, draft)
    }

    pub fn update_project(&self, selector: &str, patch: ProjectPatch) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::update::project(&self.client, &selector, patch)
    }

    pub fn update_wiki(&self, selector: &str, patch: WikiPatch) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::update::wiki(&self.client, &selector, patch)
    }

    pub fn delete(&self, kind: RecordKind, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::delete::run(&self.client, kind, &selector)
    }

    pub fn ask(&self, kind: RecordKind, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::ask::run(&self.client, &self.chat_url, kind, &selector)
    }
}

pub fn status(settings: &SettingsStore) -> Result<CmdResult> {
    commands::connect::status(settings)
}

pub fn disconnect(settings: &SettingsStore) -> Result<CmdResult> {
    commands::connect::disconnect(settings)
}

/// A number is a display index, anything else an id.
pub fn parse_selector(input: &str) -> Result<RecordSelector> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RecallError::Api("Empty selector".to_string()));
    }
    if input.bytes().all(|b| b.is_ascii_digit()) {
        return match input.parse::<usize>() {
            Ok(0) | Err(_) => Err(RecallError::Api(format!(
                "Invalid index '{}': indexes start at 1",
                input
            ))),
            Ok(n) => Ok(RecordSelector::Index(n)),
        };
    }
    Ok(RecordSelector::Id(input.to_string()))
}
