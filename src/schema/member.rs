//! Network members. Unlike the other types, members have no required date and
//! declare their own `id`/`slug`, which must agree with the file name.

use super::{Derived, Schema, ValidationFailed, fields::Fields};
use crate::content::FrontMatter;
use crate::data::{Document, FieldValue, base_field};
use crate::utils::date::Timestamp;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Position, e.g. "Associate Professor"
    pub title: String,
    pub affiliation: String,
    pub bio: String,
    pub photo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLink>,
    pub order: f64,
    pub featured: bool,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
    pub excerpt: String,
    pub content: String,
}

impl Member {
    /// A declared `id`/`slug` must match the file-derived slug.
    fn identity(fields: &mut Fields<'_>, key: &str, slug: &str) -> String {
        if let Some(declared) = fields.optional_str(key)
            && declared != slug
        {
            fields.reject(
                key,
                format!("`{declared}` does not match the file name `{slug}`"),
            );
        }
        slug.to_owned()
    }
}

impl Schema for Member {
    const COLLECTION: &'static str = "members";

    fn validate(record: &FrontMatter, derived: &Derived) -> Result<Self, ValidationFailed> {
        let mut fields = Fields::new(record.as_mapping());
        let id = Self::identity(&mut fields, "id", &derived.slug);
        let slug = Self::identity(&mut fields, "slug", &derived.slug);

        let name = fields.required_str("name", "Name is required");
        let title = fields.required_str("title", "Title is required");
        let affiliation = fields.required_str("affiliation", "Affiliation is required");
        let bio = fields.required_str("bio", "Bio is required");
        let photo = fields.required_str("photo", "Photo is required");
        let email = fields.email("email");
        let social_links = fields.list_of("socialLinks", |link| SocialLink {
            platform: link.required_str("platform", "Required"),
            url: link.required_url("url"),
        });
        let order = fields.number_or("order", 0.0);
        let featured = fields.bool_or("featured", false);
        let tags = fields.tags();
        let date = fields.optional_date("date");
        let excerpt = fields
            .optional_str("excerpt")
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| derived.excerpt.clone());

        fields.finish(Self {
            id,
            slug,
            name,
            title,
            affiliation,
            bio,
            photo,
            email,
            social_links,
            order,
            featured,
            tags,
            date,
            excerpt,
            content: derived.content.clone(),
        })
    }
}

impl Document for Member {
    fn slug(&self) -> &str {
        &self.slug
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn date(&self) -> Option<Timestamp> {
        self.date
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn featured(&self) -> bool {
        self.featured
    }
    fn excerpt(&self) -> &str {
        &self.excerpt
    }
    fn content(&self) -> &str {
        &self.content
    }
    fn order(&self) -> Option<f64> {
        Some(self.order)
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "name" => Some(FieldValue::Text(&self.name)),
            "affiliation" => Some(FieldValue::Text(&self.affiliation)),
            "bio" => Some(FieldValue::Text(&self.bio)),
            "photo" => Some(FieldValue::Text(&self.photo)),
            "email" => self.email.as_deref().map(FieldValue::Text),
            "order" => Some(FieldValue::Number(self.order)),
            _ => base_field(self, name),
        }
    }
}
