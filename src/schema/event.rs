//! Events: workshops, seminars, conferences.

use super::{BaseFields, Derived, ExcerptRule, Schema, ValidationFailed, fields::Fields};
use crate::content::FrontMatter;
use crate::data::{Document, FieldValue, base_field};
use crate::utils::date::Timestamp;
use serde::Serialize;

/// One slot of an event programme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramItem {
    /// Free-form label, e.g. `09:30`
    pub time: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Speaker {
    pub name: String,
    pub affiliation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(flatten)]
    pub base: BaseFields,
    pub location: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub program: Vec<ProgramItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub speakers: Vec<Speaker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
}

impl Schema for Event {
    const COLLECTION: &'static str = "events";

    fn validate(record: &FrontMatter, derived: &Derived) -> Result<Self, ValidationFailed> {
        let mut fields = Fields::new(record.as_mapping());
        let base = BaseFields::validate(&mut fields, derived, ExcerptRule::Derived);
        let location = fields.required_str("location", "Location is required");
        let description = fields.required_str("description", "Description is required");
        let end_date = fields.optional_date("endDate");

        let program = fields.list_of("program", |item| ProgramItem {
            time: item.required_str("time", "Required"),
            title: item.required_str("title", "Required"),
            speaker: item.optional_str("speaker"),
            description: item.optional_str("description"),
        });
        let speakers = fields.list_of("speakers", |item| Speaker {
            name: item.required_str("name", "Required"),
            affiliation: item.required_str("affiliation", "Required"),
            bio: item.optional_str("bio"),
        });
        let registration_url = fields.url("registrationUrl");

        fields.finish(Self {
            base,
            location,
            description,
            end_date,
            program,
            speakers,
            registration_url,
        })
    }
}

impl Document for Event {
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

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "location" => Some(FieldValue::Text(&self.location)),
            "description" => Some(FieldValue::Text(&self.description)),
            "endDate" => self.end_date.map(FieldValue::Date),
            "registrationUrl" => self.registration_url.as_deref().map(FieldValue::Text),
            _ => base_field(self, name),
        }
    }
}
