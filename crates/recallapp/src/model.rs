//! # Domain Model: Projects and Wikis
//!
//! Recall tracks two record kinds, each stored as one row in its own sheet:
//!
//! | Kind | Sheet | Extra columns |
//! |------|-------|---------------|
//! | [`Project`] | `projects` | `projectName`, `type`, `status` |
//! | [`Wiki`] | `wikis` | `topic` |
//!
//! Both share `id`, `folderId`, `primaryTags`, `readmeDocId`,
//! `briefDescription`, `dateCreated` and `lastUpdated`. Field names on the wire
//! are the camelCase column headers.
//!
//! ## Lifecycle
//!
//! - **Create**: a [`ProjectDraft`] / [`WikiDraft`] is turned into a record with a
//!   fresh UUID `id` and `dateCreated == lastUpdated == now`.
//! - **Update**: a patch is merged, then [`Record::touch`] rewrites `lastUpdated`.
//!   `id` and `dateCreated` never change.
//! - **Delete**: rows are removed outright; there is no soft delete.
//!
//! Timestamps are kept as the strings the sheet holds (RFC 3339 with
//! millisecond precision when written by us). [`parse_timestamp`] is used for
//! display only.
//!
//! ## Tags
//!
//! `primaryTags` is parsed into [`Tags`] during deserialization, see
//! [`crate::tags`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::tags::Tags;

pub const PROJECTS_SHEET_NAME: &str = "projects";
pub const WIKIS_SHEET_NAME: &str = "wikis";

pub const EXPECTED_PROJECT_COLUMNS: &[&str] = &[
    "id",
    "projectName",
    "type",
    "status",
    "folderId",
    "primaryTags",
    "readmeDocId",
    "briefDescription",
    "dateCreated",
    "lastUpdated",
];

pub const EXPECTED_WIKI_COLUMNS: &[&str] = &[
    "id",
    "topic",
    "folderId",
    "primaryTags",
    "readmeDocId",
    "briefDescription",
    "dateCreated",
    "lastUpdated",
];

/// Current time in the format written to `dateCreated` / `lastUpdated`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads one sheet cell as text.
///
/// Blank cells can arrive as `null` and numeric or boolean cells as JSON
/// scalars; all of them become strings.
pub(crate) fn deserialize_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Int(i64),
        UInt(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Option::<Cell>::deserialize(deserializer)? {
        None => String::new(),
        Some(Cell::Text(text)) => text,
        Some(Cell::Int(n)) => n.to_string(),
        Some(Cell::UInt(n)) => n.to_string(),
        Some(Cell::Float(n)) => n.to_string(),
        Some(Cell::Bool(b)) => b.to_string(),
    })
}

/// Parses a stored timestamp. Returns `None` for blank or foreign formats.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Project,
    Wiki,
}

impl RecordKind {
    pub fn sheet_name(self) -> &'static str {
        match self {
            RecordKind::Project => PROJECTS_SHEET_NAME,
            RecordKind::Wiki => WIKIS_SHEET_NAME,
        }
    }

    pub fn expected_columns(self) -> &'static [&'static str] {
        match self {
            RecordKind::Project => EXPECTED_PROJECT_COLUMNS,
            RecordKind::Wiki => EXPECTED_WIKI_COLUMNS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Project => "Project",
            RecordKind::Wiki => "Wiki",
        }
    }

    pub fn all() -> [RecordKind; 2] {
        [RecordKind::Project, RecordKind::Wiki]
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" | "projects" | "p" => Ok(RecordKind::Project),
            "wiki" | "wikis" | "w" => Ok(RecordKind::Wiki),
            other => Err(format!(
                "Unknown record kind '{}': expected 'project' or 'wiki'",
                other
            )),
        }
    }
}

/// Behaviour shared by both record kinds.
pub trait Record: Serialize + DeserializeOwned + Clone + fmt::Debug {
    const KIND: RecordKind;

    fn id(&self) -> &str;
    /// `projectName` for projects, `topic` for wikis.
    fn name(&self) -> &str;
    fn tags(&self) -> &Tags;
    fn brief_description(&self) -> &str;
    fn readme_doc_id(&self) -> &str;
    fn folder_id(&self) -> &str;
    fn date_created(&self) -> &str;
    fn last_updated(&self) -> &str;

    /// Kind-specific columns worth showing, as `(label, value)` pairs.
    fn details(&self) -> Vec<(&'static str, &str)>;

    /// Rewrites `lastUpdated`.
    fn touch(&mut self, now: String);

    fn into_any(self) -> AnyRecord;
}

/// Either record kind, for results that mix both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum AnyRecord {
    Project(Project),
    Wiki(Wiki),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AnyRecord::Project(_) => RecordKind::Project,
            AnyRecord::Wiki(_) => RecordKind::Wiki,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnyRecord::Project(p) => p.id(),
            AnyRecord::Wiki(w) => w.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyRecord::Project(p) => p.name(),
            AnyRecord::Wiki(w) => w.name(),
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            AnyRecord::Project(p) => p.tags(),
            AnyRecord::Wiki(w) => w.tags(),
        }
    }

    pub fn brief_description(&self) -> &str {
        match self {
            AnyRecord::Project(p) => p.brief_description(),
            AnyRecord::Wiki(w) => w.brief_description(),
        }
    }

    pub fn readme_doc_id(&self) -> &str {
        match self {
            AnyRecord::Project(p) => p.readme_doc_id(),
            AnyRecord::Wiki(w) => w.readme_doc_id(),
        }
    }

    pub fn folder_id(&self) -> &str {
        match self {
            AnyRecord::Project(p) => p.folder_id(),
            AnyRecord::Wiki(w) => w.folder_id(),
        }
    }

    pub fn last_updated(&self) -> &str {
        match self {
            AnyRecord::Project(p) => p.last_updated(),
            AnyRecord::Wiki(w) => w.last_updated(),
        }
    }

    pub fn details(&self) -> Vec<(&'static str, &str)> {
        match self {
            AnyRecord::Project(p) => p.details(),
            AnyRecord::Wiki(w) => w.details(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_cell")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub project_name: String,
    #[serde(rename = "type", deserialize_with = "deserialize_cell")]
    pub project_type: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub status: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub folder_id: String,
    pub primary_tags: Tags,
    #[serde(deserialize_with = "deserialize_cell")]
    pub readme_doc_id: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub brief_description: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub date_created: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub last_updated: String,
}

impl Project {
    /// Builds a new project with a fresh id and creation timestamps.
    pub fn new(draft: ProjectDraft) -> Self {
        Self::from_draft(draft, Uuid::new_v4().to_string(), now_timestamp())
    }

    pub fn from_draft(draft: ProjectDraft, id: String, now: String) -> Self {
        Self {
            id,
            project_name: draft.project_name,
            project_type: draft.project_type,
            status: draft.status,
            folder_id: draft.folder_id,
            primary_tags: draft.primary_tags,
            readme_doc_id: draft.readme_doc_id,
            brief_description: draft.brief_description,
            date_created: now.clone(),
            last_updated: now,
        }
    }
}

impl Record for Project {
    const KIND: RecordKind = RecordKind::Project;

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.project_name
    }
    fn tags(&self) -> &Tags {
        &self.primary_tags
    }
    fn brief_description(&self) -> &str {
        &self.brief_description
    }
    fn readme_doc_id(&self) -> &str {
        &self.readme_doc_id
    }
    fn folder_id(&self) -> &str {
        &self.folder_id
    }
    fn date_created(&self) -> &str {
        &self.date_created
    }
    fn last_updated(&self) -> &str {
        &self.last_updated
    }
    fn details(&self) -> Vec<(&'static str, &str)> {
        vec![("Type", self.project_type.as_str()), ("Status", self.status.as_str())]
    }
    fn touch(&mut self, now: String) {
        self.last_updated = now;
    }
    fn into_any(self) -> AnyRecord {
        AnyRecord::Project(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Wiki {
    #[serde(deserialize_with = "deserialize_cell")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub topic: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub folder_id: String,
    pub primary_tags: Tags,
    #[serde(deserialize_with = "deserialize_cell")]
    pub readme_doc_id: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub brief_description: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub date_created: String,
    #[serde(deserialize_with = "deserialize_cell")]
    pub last_updated: String,
}

impl Wiki {
    pub fn new(draft: WikiDraft) -> Self {
        Self::from_draft(draft, Uuid::new_v4().to_string(), now_timestamp())
    }

    pub fn from_draft(draft: WikiDraft, id: String, now: String) -> Self {
        Self {
            id,
            topic: draft.topic,
            folder_id: draft.folder_id,
            primary_tags: draft.primary_tags,
            readme_doc_id: draft.readme_doc_id,
            brief_description: draft.brief_description,
            date_created: now.clone(),
            last_updated: now,
        }
    }
}

impl Record for Wiki {
    const KIND: RecordKind = RecordKind::Wiki;

    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.topic
    }
    fn tags(&self) -> &Tags {
        &self.primary_tags
    }
    fn brief_description(&self) -> &str {
        &self.brief_description
    }
    fn readme_doc_id(&self) -> &str {
        &self.readme_doc_id
    }
    fn folder_id(&self) -> &str {
        &self.folder_id
    }
    fn date_created(&self) -> &str {
        &self.date_created
    }
    fn last_updated(&self) -> &str {
        &self.last_updated
    }
    fn details(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }
    fn touch(&mut self, now: String) {
        self.last_updated = now;
    }
    fn into_any(self) -> AnyRecord {
        AnyRecord::Wiki(self)
    }
}

/// Everything a project needs except the fields assigned at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub project_name: String,
    pub project_type: String,
    pub status: String,
    pub folder_id: String,
    pub primary_tags: Tags,
    pub readme_doc_id: String,
    pub brief_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WikiDraft {
    pub topic: String,
    pub folder_id: String,
    pub primary_tags: Tags,
    pub readme_doc_id: String,
    pub brief_description: String,
}

/// Partial update for a project. `None` leaves the column as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub project_name: Option<String>,
    pub project_type: Option<String>,
    pub status: Option<String>,
    pub folder_id: Option<String>,
    pub primary_tags: Option<Tags>,
    pub readme_doc_id: Option<String>,
    pub brief_description: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, project: &mut Project) {
        if let Some(v) = self.project_name {
            project.project_name = v;
        }
        if let Some(v) = self.project_type {
            project.project_type = v;
        }
        if let Some(v) = self.status {
            project.status = v;
        }
        if let Some(v) = self.folder_id {
            project.folder_id = v;
        }
        if let Some(v) = self.primary_tags {
            project.primary_tags = v;
        }
        if let Some(v) = self.readme_doc_id {
            project.readme_doc_id = v;
        }
        if let Some(v) = self.brief_description {
            project.brief_description = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WikiPatch {
    pub topic: Option<String>,
    pub folder_id: Option<String>,
    pub primary_tags: Option<Tags>,
    pub readme_doc_id: Option<String>,
    pub brief_description: Option<String>,
}

impl WikiPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, wiki: &mut Wiki) {
        if let Some(v) = self.topic {
            wiki.topic = v;
        }
        if let Some(v) = self.folder_id {
            wiki.folder_id = v;
        }
        if let Some(v) = self.primary_tags {
            wiki.primary_tags = v;
        }
        if let Some(v) = self.readme_doc_id {
            wiki.readme_doc_id = v;
        }
        if let Some(v) = self.brief_description {
            wiki.brief_description = v;
        }
    }
}
