//! # Command Layer
//!
//! This module contains the **core business logic** of recall. Each command lives in its
//! own submodule and implements plain Rust functions over a
//! [`crate::client::RowClient`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Assign ids and timestamps, merge patches, resolve selectors to row indexes
//! - Validate a spreadsheet before it is saved as the connection
//! - Apply the [`crate::filter::FilterState`] and derive facets
//! - Return structured [`CmdResult`] values with affected/listed records and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: that's the CLI layer's job
//! - **Retries**: a failed request is returned as is
//!
//! ## Row Addressing
//!
//! The remote service addresses rows by position, not by id. Commands that
//! mutate a row re-fetch the sheet and resolve the [`RecordSelector`] against
//! that fresh list immediately before sending the mutation (see
//! [`helpers::resolve`]). A concurrent edit on the sheet between those two
//! requests can still shift positions; the service offers no version token
//! to detect it.
//!
//! ## Testing Strategy
//!
//! Command tests run against [`crate::client::MemTransport`], an in-memory
//! emulation of the sheets service, and assert on the [`CmdResult`] and on
//! the rows left in the fake sheets.
//!
//! ## Command Modules
//!
//! - [`connect`]: validate and save, disconnect, status
//! - [`get`]: view (filtered, with facets) and list (edit mode)
//! - [`create`]: append a new project or wiki
//! - [`update`]: merge a patch into an existing record
//! - [`delete`]: remove a record
//! - [`ask`]: build the AI-chat hand-off URL
//! - [`helpers`]: fetching and selector resolution

use crate::model::AnyRecord;
use crate::settings::Settings;
use serde::Serialize;
use std::fmt;

pub mod ask;
pub mod connect;
pub mod create;
pub mod delete;
pub mod get;
pub mod helpers;
pub mod update;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Names one record of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordSelector {
    /// 1-based position as shown by `recall list`.
    Index(usize),
    /// The record's `id` column.
    Id(String),
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Index(i) => write!(f, "{}", i),
            RecordSelector::Id(id) => f.write_str(id),
        }
    }
}

/// A record paired with its 1-based display index.
///
/// The display index is the record's position in the sheet plus one, so
/// `row_index()` is what the row client needs for update/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub index: usize,
    #[serde(flatten)]
    pub record: AnyRecord,
}

impl DisplayRecord {
    pub fn row_index(&self) -> usize {
        self.index - 1
    }
}

/// Facet lists for the filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub tags: Vec<String>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<DisplayRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub facets: Option<Facets>,
    pub settings: Option<Settings>,
    pub urls: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = Some(facets);
        self
    }
}
