use crate::client::{RowClient, Transport};
use crate::commands::helpers::{fetch, index_records};
use crate::commands::{CmdResult, DisplayRecord, Facets};
use crate::error::Result;
use crate::filter::{all_statuses, all_tags, all_types, FilterState};
use crate::model::{Project, Record, RecordKind, Wiki};

/// Which record kinds a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindScope {
    #[default]
    Both,
    Only(RecordKind),
}

impl KindScope {
    pub fn includes(self, kind: RecordKind) -> bool {
        match self {
            KindScope::Both => true,
            KindScope::Only(only) => only == kind,
        }
    }
}

/// View mode: both sheets, narrowed by `filter`, with facets.
///
/// Facets are always derived from the unfiltered collections so the filter
/// controls keep offering every value. Listed records keep the display index
/// of their sheet position, not their position in the filtered output.
pub fn view<T: Transport>(
    client: &RowClient<T>,
    filter: &FilterState,
    scope: KindScope,
) -> Result<CmdResult> {
    let projects: Vec<Project> = fetch(client)?;
    let wikis: Vec<Wiki> = fetch(client)?;

    let facets = facets_of(&projects, &wikis);

    let mut listed = Vec::new();
    if scope.includes(RecordKind::Project) {
        listed.extend(keep_matching(&projects, |p| filter.matches_project(p)));
    }
    if scope.includes(RecordKind::Wiki) {
        listed.extend(keep_matching(&wikis, |w| filter.matches_wiki(w)));
    }

    Ok(CmdResult::default()
        .with_listed_records(listed)
        .with_facets(facets))
}

/// Edit mode: every row of one sheet, unfiltered, in sheet order.
pub fn list<T: Transport>(client: &RowClient<T>, kind: RecordKind) -> Result<CmdResult> {
    let listed = match kind {
        RecordKind::Project => index_records(fetch::<Project, T>(client)?),
        RecordKind::Wiki => index_records(fetch::<Wiki, T>(client)?),
    };
    Ok(CmdResult::default().with_listed_records(listed))
}

/// Tags, types and statuses present in the spreadsheet.
pub fn facets<T: Transport>(client: &RowClient<T>) -> Result<CmdResult> {
    let projects: Vec<Project> = fetch(client)?;
    let wikis: Vec<Wiki> = fetch(client)?;
    Ok(CmdResult::default().with_facets(facets_of(&projects, &wikis)))
}

fn facets_of(projects: &[Project], wikis: &[Wiki]) -> Facets {
    Facets {
        tags: all_tags(projects, wikis),
        types: all_types(projects),
        statuses: all_statuses(projects),
    }
}

fn keep_matching<R: Record>(records: &[R], keep: impl Fn(&R) -> bool) -> Vec<DisplayRecord> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| keep(*r))
        .map(|(i, r)| DisplayRecord {
            index: i + 1,
            record: r.clone().into_any(),
        })
        .collect()
}
