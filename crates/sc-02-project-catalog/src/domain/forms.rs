//! # Domain Forms
//!
//! Per-domain submission form definitions and required-field validation.

use crate::errors::CatalogError;
use serde::Serialize;
use shared_types::Domain;
use std::collections::BTreeMap;

/// Input widget of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// One of a fixed list.
    Select,
    /// Uploaded document.
    File,
    /// Tag list.
    Tags,
}

/// One field of a domain's submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Key in the submitted field map.
    pub name: &'static str,
    /// Label shown to the user and reported when missing.
    pub label: &'static str,
    /// Widget.
    pub kind: FieldKind,
    /// Must be filled in.
    pub required: bool,
}

const fn field(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
) -> FormField {
    FormField {
        name,
        label,
        kind,
        required,
    }
}

const UNIVERSITY: &[FormField] = &[
    field("title", "Certificate Title", FieldKind::Text, true),
    field("institution", "Institution Name", FieldKind::Text, true),
    field("recipient", "Recipient Name", FieldKind::Text, true),
    field("grade", "Grade/GPA", FieldKind::Text, false),
    field("description", "Description", FieldKind::TextArea, false),
    field("document", "Certificate Document", FieldKind::File, true),
    field("tags", "Tags", FieldKind::Tags, false),
];

const LEGAL: &[FormField] = &[
    field("title", "Document Title", FieldKind::Text, true),
    field("documentType", "Document Type", FieldKind::Select, true),
    field("parties", "Parties Involved", FieldKind::Text, false),
    field("jurisdiction", "Jurisdiction", FieldKind::Text, false),
    field("description", "Description", FieldKind::TextArea, false),
    field("document", "Legal Document", FieldKind::File, true),
    field("tags", "Tags", FieldKind::Tags, false),
];

const ARTIST: &[FormField] = &[
    field("title", "Artwork Title", FieldKind::Text, true),
    field("artworkType", "Artwork Type", FieldKind::Select, true),
    field("artist", "Artist Name", FieldKind::Text, true),
    field("medium", "Medium/Format", FieldKind::Text, false),
    field("description", "Description", FieldKind::TextArea, false),
    field("document", "Artwork File", FieldKind::File, true),
    field("tags", "Tags", FieldKind::Tags, false),
];

const RESEARCH: &[FormField] = &[
    field("title", "Research Title", FieldKind::Text, true),
    field("researchField", "Research Field", FieldKind::Select, true),
    field("authors", "Authors", FieldKind::Text, true),
    field("institution", "Institution", FieldKind::Text, false),
    field("abstract", "Abstract", FieldKind::TextArea, false),
    field("document", "Research Document", FieldKind::File, true),
    field("tags", "Tags", FieldKind::Tags, false),
];

const GAMING: &[FormField] = &[
    field("title", "Asset/Achievement Title", FieldKind::Text, true),
    field("gameAssetType", "Asset Type", FieldKind::Select, true),
    field("game", "Game Title", FieldKind::Text, true),
    field("rarity", "Rarity Level", FieldKind::Select, false),
    field("description", "Description", FieldKind::TextArea, false),
    field("document", "Asset Image/File", FieldKind::File, true),
    field("tags", "Tags", FieldKind::Tags, false),
];

const DEVELOPER: &[FormField] = &[
    field("title", "Project Title", FieldKind::Text, true),
    field("githubLink", "GitHub Repository", FieldKind::Text, false),
    field("techStack", "Technology Stack", FieldKind::Text, false),
    field("description", "Project Description", FieldKind::TextArea, false),
    field("document", "Project Documentation", FieldKind::File, false),
    field("tags", "Tags", FieldKind::Tags, false),
];

/// The submission form of a domain.
#[must_use]
pub fn form_fields(domain: Domain) -> &'static [FormField] {
    match domain {
        Domain::University => UNIVERSITY,
        Domain::Legal => LEGAL,
        Domain::Artist => ARTIST,
        Domain::Research => RESEARCH,
        Domain::Gaming => GAMING,
        Domain::Developer => DEVELOPER,
    }
}

/// Check that every required field is filled in.
///
/// A required file field is satisfied by an attached document; any other
/// required field needs a non-blank value in `fields`.
pub fn validate_form(
    domain: Domain,
    fields: &BTreeMap<String, String>,
    has_document: bool,
) -> Result<(), CatalogError> {
    let missing: Vec<String> = form_fields(domain)
        .iter()
        .filter(|f| f.required)
        .filter(|f| {
            let filled = fields.get(f.name).is_some_and(|v| !v.trim().is_empty());
            !filled && !(f.kind == FieldKind::File && has_document)
        })
        .map(|f| f.label.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::MissingFields(missing))
    }
}
