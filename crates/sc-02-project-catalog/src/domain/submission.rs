//! # Submission Preparation
//!
//! Turns what a user typed into the exact `submitProject` arguments and the
//! optional file hash to attach afterwards.

use sc_01_project_registry::domain::NewProject;
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Domain, Hash, TokenId};

/// Name used when the title is blank.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Trim tags, then drop empty ones and repeats (first occurrence wins).
#[must_use]
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// What the user entered on the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    /// Title; blank falls back to [`UNTITLED_PROJECT`].
    pub title: String,
    /// Repository link, passed through as-is.
    pub github_link: String,
    /// Raw tags as typed.
    pub tags: Vec<String>,
    /// Selected domain; its marker is appended to the tags.
    pub domain: Domain,
    /// Attached document bytes.
    pub document: Option<Vec<u8>>,
}

impl SubmissionDraft {
    /// Produce registry arguments and the document hash.
    #[must_use]
    pub fn prepare(&self) -> PreparedSubmission {
        let title = self.title.trim();
        let name = if title.is_empty() {
            UNTITLED_PROJECT.to_string()
        } else {
            self.title.clone()
        };

        let mut tags = normalize_tags(&self.tags);
        tags.push(self.domain.as_tag().to_string());

        PreparedSubmission {
            project: NewProject {
                name,
                github_link: self.github_link.clone(),
                tags,
            },
            file_hash: self.document.as_deref().map(keccak256),
        }
    }
}

/// Arguments ready for the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedSubmission {
    /// `submitProject` arguments.
    pub project: NewProject,
    /// Hash to store once the id is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<Hash>,
}

/// What a completed submission produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    /// New project id.
    pub token_id: TokenId,
    /// Stored hash, when a document was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<Hash>,
}
