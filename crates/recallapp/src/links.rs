//! Outbound links: Drive folders, README docs, and the AI-chat hand-off.
//!
//! `recall ask` builds a prompt from a record's metadata and opens the chat
//! page with that prompt in the `q` query parameter. The prompt is built from
//! the parsed [`crate::tags::Tags`], so it lists exactly the tags shown on the
//! record's card.

use crate::model::Record;

pub fn folder_url(folder_id: &str) -> String {
    format!("https://drive.google.com/drive/folders/{}", folder_id)
}

pub fn doc_url(doc_id: &str) -> String {
    format!("https://docs.google.com/document/d/{}", doc_id)
}

/// The prompt handed to the chat page.
pub fn chat_prompt<R: Record>(record: &R) -> String {
    let tags: Vec<&str> = record.tags().iter().map(String::as_str).collect();
    let details: String = record
        .details()
        .iter()
        .map(|(label, value)| format!("- {}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Please read the README document with ID: {readme}\n\
         \n\
         Then recall any notes associated with these tags: {tags}\n\
         \n\
         Context:\n\
         - {kind}: {name}\n\
         - Description: {description}\n\
         {details}\n\
         \n\
         Please provide a summary of what you found.",
        readme = record.readme_doc_id(),
        tags = tags.join(", "),
        kind = R::KIND.label(),
        name = record.name(),
        description = record.brief_description(),
        details = details,
    )
}

/// Chat page URL with the prompt percent-encoded into `q`.
pub fn chat_url<R: Record>(chat_base: &str, record: &R) -> String {
    format!(
        "{}?q={}",
        chat_base.trim_end_matches('?'),
        urlencoding::encode(&chat_prompt(record))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, Wiki};
    use crate::tags::Tags;

    fn project() -> Project {
        Project {
            project_name: "Recall".into(),
            project_type: "app".into(),
            status: "active".into(),
            primary_tags: Tags::parse(" rust,, cli "),
            readme_doc_id: "doc-1".into(),
            brief_description: "Index".into(),
            ..Default::default()
        }
    }

    #[test]
    fn drive_links() {
        assert_eq!(folder_url("F1"), "https://drive.google.com/drive/folders/F1");
        assert_eq!(doc_url("D1"), "https://docs.google.com/document/d/D1");
    }

    #[test]
    fn project_prompt_includes_type_and_status() {
        let prompt = chat_prompt(&project());
        assert_eq!(
            prompt,
            "Please read the README document with ID: doc-1\n\
             \n\
             Then recall any notes associated with these tags: rust, cli\n\
             \n\
             Context:\n\
             - Project: Recall\n\
             - Description: Index\n\
             - Type: app\n\
             - Status: active\n\
             \n\
             Please provide a summary of what you found."
        );
    }

    #[test]
    fn wiki_prompt_has_no_type_or_status() {
        let wiki = Wiki {
            topic: "Kubernetes".into(),
            primary_tags: Tags::parse("ops"),
            readme_doc_id: "doc-2".into(),
            brief_description: "Cluster notes".into(),
            ..Default::default()
        };
        let prompt = chat_prompt(&wiki);
        assert!(prompt.contains("- Wiki: Kubernetes\n"));
        assert!(prompt.contains("tags: ops\n"));
        assert!(!prompt.contains("Type:"));
        assert!(prompt.ends_with("Please provide a summary of what you found."));
    }

    #[test]
    fn chat_url_encodes_prompt() {
        let url = chat_url("https://claude.ai/new", &project());
        assert!(url.starts_with("https://claude.ai/new?q=Please%20read%20the%20README"));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
        assert!(url.contains("%0A"));
    }
}
