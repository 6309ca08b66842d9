//! Homepage digests: short previews of the newest events and posts, and the
//! member spotlight.

use crate::registry::ContentStore;
use crate::schema::{BlogPost, Event, Member};
use crate::utils::date::Timestamp;
use serde::Serialize;
use std::sync::Arc;

pub const LATEST_EVENTS_LIMIT: usize = 4;
pub const LATEST_POSTS_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPreview {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub date: Timestamp,
    pub location: String,
    pub excerpt: String,
}

impl From<&Event> for EventPreview {
    fn from(event: &Event) -> Self {
        Self {
            id: event.base.slug.clone(),
            slug: event.base.slug.clone(),
            title: event.base.title.clone(),
            date: event.base.date,
            location: event.location.clone(),
            excerpt: event.base.excerpt.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPreview {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub date: Timestamp,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl From<&BlogPost> for BlogPreview {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.base.slug.clone(),
            slug: post.base.slug.clone(),
            title: post.base.title.clone(),
            author: post.author.clone(),
            date: post.base.date,
            excerpt: post.base.excerpt.clone(),
            tags: post.base.tags.clone(),
        }
    }
}

impl ContentStore {
    /// The `limit` newest events.
    pub fn latest_events(&self, limit: usize) -> Vec<EventPreview> {
        self.events
            .recent(limit)
            .iter()
            .map(|event| EventPreview::from(event.as_ref()))
            .collect()
    }

    /// The `limit` newest blog posts.
    pub fn latest_blog_posts(&self, limit: usize) -> Vec<BlogPreview> {
        self.blog
            .recent(limit)
            .iter()
            .map(|post| BlogPreview::from(post.as_ref()))
            .collect()
    }

    /// Featured members, or every member by manual order when none is
    /// featured and the members collection falls back to manual order.
    pub fn featured_members(&self) -> Vec<Arc<Member>> {
        self.members.featured(None)
    }
}
