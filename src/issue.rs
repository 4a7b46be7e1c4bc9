use crate::models::Tag;
use crate::remote::RepoRef;
use serde::{Deserialize, Serialize};

/// Title and body of an issue to be filed for a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePayload {
    pub title: String,
    pub body: String,
}

impl IssuePayload {
    pub fn from_tag(tag: &Tag, repository: Option<&RepoRef>) -> Self {
        let mut body = String::new();

        if !tag.description.is_empty() {
            body.push_str(&tag.description);
            body.push_str("\n\n");
        }

        body.push_str(&format!(
            "Found `{}` in `{}` on line {}",
            tag.annotation,
            tag.file_path.display(),
            tag.line_number
        ));

        if let Some(repo) = repository {
            body.push_str(&format!(" of {}", repo));
        }

        Self {
            title: tag.title.clone(),
            body,
        }
    }
}

/// Build one payload per tag, preserving order
pub fn build_payloads(tags: &[Tag], repository: Option<&RepoRef>) -> Vec<IssuePayload> {
    tags.iter()
        .map(|tag| IssuePayload::from_tag(tag, repository))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tag(description: &str) -> Tag {
        let mut tag = Tag::new(
            "@TODO",
            "refactor".to_string(),
            PathBuf::from("src/lib.rs"),
            12,
        );
        tag.description = description.to_string();
        tag
    }

    #[test]
    fn test_payload_with_description() {
        let payload = IssuePayload::from_tag(&tag("this function later"), None);
        assert_eq!(payload.title, "refactor");
        assert_eq!(
            payload.body,
            "this function later\n\nFound `@TODO` in `src/lib.rs` on line 12"
        );
    }

    #[test]
    fn test_payload_names_repository() {
        let repo = RepoRef {
            owner: "octo".to_string(),
            name: "summoner".to_string(),
        };
        let payload = IssuePayload::from_tag(&tag(""), Some(&repo));
        assert_eq!(
            payload.body,
            "Found `@TODO` in `src/lib.rs` on line 12 of octo/summoner"
        );
    }

    #[test]
    fn test_build_payloads_serializes() {
        let payloads = build_payloads(&[tag("a"), tag("b")], None);
        assert_eq!(payloads.len(), 2);

        let json = serde_json::to_value(&payloads).unwrap();
        assert_eq!(json[1]["title"], "refactor");
        assert!(json[1]["body"].as_str().unwrap().starts_with("b\n\n"));
    }
}
