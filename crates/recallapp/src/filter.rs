//! # Filter Engine
//!
//! Pure narrowing of in-memory project and wiki collections, plus the facet
//! lists (tags, types, statuses) that drive the filter controls.
//!
//! ## Predicates
//!
//! A project is kept iff **all** of these hold:
//!
//! | Predicate | Passes when |
//! |-----------|-------------|
//! | search | empty, or case-insensitive substring of `projectName` or `briefDescription` |
//! | type | empty, or exact match |
//! | status | empty, or exact match |
//! | tags | none selected, or **any** selected tag is among the record's tags |
//!
//! Wikis use the same search (against `topic`) and tag predicates; they have
//! no type or status.
//!
//! Nothing here does I/O or mutates its inputs, so filtering can be re-run on
//! every change of the [`FilterState`].

use crate::model::{Project, Record, Wiki};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub tags: BTreeSet<String>,
    /// Empty means "any type".
    pub project_type: String,
    /// Empty means "any status".
    pub status: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
    }

    /// Selects the tag if it was not selected, deselects it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    pub fn set_type(&mut self, project_type: impl Into<String>) {
        self.project_type = project_type.into();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || !self.tags.is_empty()
            || !self.project_type.is_empty()
            || !self.status.is_empty()
    }

    pub fn matches_project(&self, project: &Project) -> bool {
        self.matches_search(project)
            && (self.project_type.is_empty() || project.project_type == self.project_type)
            && (self.status.is_empty() || project.status == self.status)
            && self.matches_tags(project)
    }

    pub fn matches_wiki(&self, wiki: &Wiki) -> bool {
        self.matches_search(wiki) && self.matches_tags(wiki)
    }

    pub fn filter_projects(&self, projects: &[Project]) -> Vec<Project> {
        projects
            .iter()
            .filter(|p| self.matches_project(p))
            .cloned()
            .collect()
    }

    pub fn filter_wikis(&self, wikis: &[Wiki]) -> Vec<Wiki> {
        wikis
            .iter()
            .filter(|w| self.matches_wiki(w))
            .cloned()
            .collect()
    }

    fn matches_search<R: Record>(&self, record: &R) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.name().to_lowercase().contains(&needle)
            || record.brief_description().to_lowercase().contains(&needle)
    }

    fn matches_tags<R: Record>(&self, record: &R) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| record.tags().contains(t))
    }
}

/// Union of tags over both collections, deduplicated and sorted.
pub fn all_tags(projects: &[Project], wikis: &[Wiki]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| p.tags().iter())
        .chain(wikis.iter().flat_map(|w| w.tags().iter()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct non-empty project types, sorted.
pub fn all_types(projects: &[Project]) -> Vec<String> {
    distinct_sorted(projects.iter().map(|p| p.project_type.as_str()))
}

/// Distinct non-empty project statuses, sorted.
pub fn all_statuses(projects: &[Project]) -> Vec<String> {
    distinct_sorted(projects.iter().map(|p| p.status.as_str()))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::Tags;

    fn project(name: &str, kind: &str, status: &str, tags: &str) -> Project {
        Project {
            id: name.to_lowercase(),
            project_name: name.into(),
            project_type: kind.into(),
            status: status.into(),
            primary_tags: Tags::parse(tags),
            brief_description: format!("About {}", name),
            ..Default::default()
        }
    }

    fn wiki(topic: &str, tags: &str, description: &str) -> Wiki {
        Wiki {
            id: topic.to_lowercase(),
            topic: topic.into(),
            primary_tags: Tags::parse(tags),
            brief_description: description.into(),
            ..Default::default()
        }
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.project_name.as_str()).collect()
    }

    fn sample() -> Vec<Project> {
        vec![
            project("Alpha", "app", "active", "a"),
            project("Beta", "lib", "paused", "b"),
            project("Gamma", "app", "paused", "a, c"),
        ]
    }

    #[test]
    fn empty_state_returns_input_unchanged() {
        let projects = sample();
        let state = FilterState::new();
        assert!(!state.has_active_filters());
        assert_eq!(state.filter_projects(&projects), projects);

        let wikis = vec![wiki("Z", "", ""), wiki("A", "x", "")];
        assert_eq!(state.filter_wikis(&wikis), wikis);
    }

    #[test]
    fn filtering_is_pure() {
        let projects = sample();
        let mut state = FilterState::new();
        state.set_type("app");
        let first = state.filter_projects(&projects);
        let second = state.filter_projects(&projects);
        assert_eq!(first, second);
        assert_eq!(projects, sample());
    }

    #[test]
    fn search_is_case_insensitive_on_name_and_description() {
        let projects = sample();
        let mut state = FilterState::new();

        state.set_search("ALP");
        assert_eq!(names(&state.filter_projects(&projects)), ["Alpha"]);

        state.set_search("about gam");
        assert_eq!(names(&state.filter_projects(&projects)), ["Gamma"]);

        state.set_search("nothing");
        assert!(state.filter_projects(&projects).is_empty());
    }

    #[test]
    fn type_and_status_are_exact() {
        let projects = sample();
        let mut state = FilterState::new();
        state.set_type("app");
        assert_eq!(names(&state.filter_projects(&projects)), ["Alpha", "Gamma"]);

        state.set_status("paused");
        assert_eq!(names(&state.filter_projects(&projects)), ["Gamma"]);

        state.set_type("App");
        assert!(state.filter_projects(&projects).is_empty());
    }

    #[test]
    fn tags_are_or_within_and_across_predicates() {
        let projects = vec![project("One", "", "", "a"), project("Two", "", "", "b")];
        let mut state = FilterState::new();

        state.set_tags(["a", "b"]);
        assert_eq!(names(&state.filter_projects(&projects)), ["One", "Two"]);

        state.set_tags(["a"]);
        assert_eq!(names(&state.filter_projects(&projects)), ["One"]);

        state.set_tags(["a", "b"]);
        state.set_search("two");
        assert_eq!(names(&state.filter_projects(&projects)), ["Two"]);
    }

    #[test]
    fn tag_match_uses_parsed_tokens() {
        let projects = vec![project("Spaced", "", "", "  ml ,infra  ,, ")];
        let mut state = FilterState::new();
        state.set_tags(["infra"]);
        assert_eq!(state.filter_projects(&projects).len(), 1);

        state.set_tags(["inf"]);
        assert!(state.filter_projects(&projects).is_empty());
    }

    #[test]
    fn wikis_ignore_type_and_status() {
        let wikis = vec![
            wiki("Kubernetes", "ops", "Cluster notes"),
            wiki("Rust", "lang", "Ownership cheatsheet"),
        ];
        let mut state = FilterState::new();
        state.set_type("app");
        state.set_status("active");
        assert_eq!(state.filter_wikis(&wikis).len(), 2);

        state.set_search("OWNERSHIP");
        let found = state.filter_wikis(&wikis);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].topic, "Rust");

        state.clear();
        state.set_tags(["ops"]);
        assert_eq!(state.filter_wikis(&wikis)[0].topic, "Kubernetes");
    }

    #[test]
    fn toggle_and_clear() {
        let mut state = FilterState::new();
        state.toggle_tag("x");
        assert!(state.tags.contains("x"));
        assert!(state.has_active_filters());
        state.toggle_tag("x");
        assert!(state.tags.is_empty());

        state.set_search("q");
        state.set_status("s");
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn all_tags_is_sorted_union() {
        let projects = vec![project("P", "", "", "web, rust"), project("Q", "", "", "rust")];
        let wikis = vec![wiki("W", "ops, web", "")];
        assert_eq!(all_tags(&projects, &wikis), ["ops", "rust", "web"]);
        assert!(all_tags(&[], &[]).is_empty());
    }

    #[test]
    fn types_and_statuses_are_distinct_and_sorted() {
        let projects = vec![
            project("1", "beta", "done", ""),
            project("2", "alpha", "active", ""),
            project("3", "beta", "", ""),
        ];
        assert_eq!(all_types(&projects), ["alpha", "beta"]);
        assert_eq!(all_statuses(&projects), ["active", "done"]);
    }
}
