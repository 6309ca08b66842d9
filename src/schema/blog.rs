use super::{BaseFields, Derived, ExcerptRule, Schema, ValidationFailed, fields::Fields};
use crate::content::FrontMatter;
use crate::data::{Document, FieldValue, base_field};
use crate::utils::date::Timestamp;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(flatten)]
    pub base: BaseFields,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl Schema for BlogPost {
    const COLLECTION: &'static str = "blog";

    /// Blog posts must carry their own excerpt; the derived one is not used.
    fn validate(record: &FrontMatter, derived: &Derived) -> Result<Self, ValidationFailed> {
        let mut fields = Fields::new(record.as_mapping());
        let base = BaseFields::validate(&mut fields, derived, ExcerptRule::Required);
        let author = fields.required_str("author", "Author is required");
        let cover_image = fields.optional_str("coverImage");

        fields.finish(Self {
            base,
            author,
            cover_image,
        })
    }
}

impl Document for BlogPost {
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
        vec![self.author.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "author" => Some(FieldValue::Text(&self.author)),
            "coverImage" => self.cover_image.as_deref().map(FieldValue::Text),
            _ => base_field(self, name),
        }
    }
}
