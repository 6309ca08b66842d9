use super::{BaseFields, Derived, ExcerptRule, Schema, ValidationFailed, fields::Fields};
use crate::content::FrontMatter;
use crate::data::{Document, FieldValue, base_field};
use crate::utils::date::Timestamp;
use serde::Serialize;

/// Venue kind of a publication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    #[default]
    Journal,
    Conference,
    Workshop,
    Thesis,
}

impl PublicationType {
    pub const ALL: [&'static str; 4] = ["journal", "conference", "workshop", "thesis"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Conference => "conference",
            Self::Workshop => "workshop",
            Self::Thesis => "thesis",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "journal" => Some(Self::Journal),
            "conference" => Some(Self::Conference),
            "workshop" => Some(Self::Workshop),
            "thesis" => Some(Self::Thesis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(flatten)]
    pub base: BaseFields,
    pub authors: Vec<String>,
    /// Journal or conference name
    pub journal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Relative paths are allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: PublicationType,
}

impl Schema for Publication {
    const COLLECTION: &'static str = "publications";

    fn validate(record: &FrontMatter, derived: &Derived) -> Result<Self, ValidationFailed> {
        let mut fields = Fields::new(record.as_mapping());
        let base = BaseFields::validate(&mut fields, derived, ExcerptRule::Derived);

        let authors = fields.string_list("authors");
        if authors.is_empty() {
            fields.reject("authors", "At least one author is required");
        }
        let journal = fields.required_str("journal", "Journal/Conference is required");
        let doi = fields.optional_str("doi");
        let abstract_text = fields.required_str("abstract", "Abstract is required");
        let pdf_url = fields.optional_str("pdfUrl");
        let kind = fields.one_of("type", &PublicationType::ALL, "journal");

        fields.finish(Self {
            base,
            authors,
            journal,
            doi,
            abstract_text,
            pdf_url,
            kind: PublicationType::parse(kind).unwrap_or_default(),
        })
    }
}

impl Document for Publication {
    fn slug(&self) -> &str {
        &self.base.slug
    }
    fn title(&self) -> &str {
        &self.base.title
    }
    fn date(&self) -> Option<Timestamp> {
        Some(self.base.date)
    }
    fn tags(&self) -> &[String] {
        &self.base.tags
    }
    fn featured(&self) -> bool {
        self.base.featured
    }
    fn excerpt(&self) -> &str {
        &self.base.excerpt
    }
    fn content(&self) -> &str {
        &self.base.content
    }
    fn authors(&self) -> Vec<&str> {
        self.authors.iter().map(String::as_str).collect()
    }
    fn kind(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "authors" => Some(FieldValue::List(&self.authors)),
            "journal" => Some(FieldValue::Text(&self.journal)),
            "doi" => self.doi.as_deref().map(FieldValue::Text),
            "abstract" => Some(FieldValue::Text(&self.abstract_text)),
            "pdfUrl" => self.pdf_url.as_deref().map(FieldValue::Text),
            "type" => Some(FieldValue::Text(self.kind.as_str())),
            _ => base_field(self, name),
        }
    }
}
