//! Work (artwork) API Types
//!
//! # API Endpoints
//!
//! - `GET /works/` → `Page<Work>` (the member's own works)
//! - `GET /works/public/`, `/works/my-collection/`, `/works/family-gallery/` → `Page<Work>`
//! - `GET /works/member/:id/` → `Page<Work>`
//! - `GET /works/:id/` → `Work`
//! - `POST /works/` (multipart) → `Work`
//! - `POST /works/:id/update/` (multipart, partial) → `WorkUpdateResponse`
//! - `DELETE /works/:id/delete/` → `MessageResponse` (or empty body)
//! - `POST /works/:id/like/`, `/works/:id/unlike/` → `MessageResponse`
//! - `GET /works/tags/`, `/works/categories/` → `Vec<Tag>`, `Vec<Category>`

use crate::{first_page_or, IdOrNamed, NamedRecord, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type Tag = NamedRecord;
pub type Category = NamedRecord;

// =============================================================================
// RECORDS
// =============================================================================

/// An artwork as returned by list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub member: Option<MemberSummary>,
    #[serde(default)]
    pub is_public: bool,
    /// Decimal string on the wire (`"1200.00"`)
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub tags: Vec<IdOrNamed>,
    #[serde(default)]
    pub category: Option<IdOrNamed>,
    #[serde(default)]
    pub images_data: Vec<WorkImage>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub is_liked_by_user: bool,
}

impl Work {
    pub fn tag_ids(&self) -> Vec<RecordId> {
        self.tags.iter().map(IdOrNamed::id).collect()
    }

    pub fn category_id(&self) -> Option<RecordId> {
        self.category.as_ref().map(IdOrNamed::id)
    }
}

/// Owner summary nested in a work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: RecordId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Stored image attached to a work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkImage {
    pub id: RecordId,
    pub image_url: String,
}

impl WorkImage {
    /// Image URL upgraded to https so it can be embedded next to the app
    /// without mixed-content failures.
    pub fn secure_url(&self) -> String {
        match self.image_url.strip_prefix("http://") {
            Some(rest) => format!("https://{}", rest),
            None => self.image_url.clone(),
        }
    }

    pub fn file_name(&self) -> &str {
        self.image_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("image.jpg")
    }
}

/// Response from `POST /works/:id/update/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub work: Option<Work>,
}

// =============================================================================
// QUERIES
// =============================================================================

fn default_page() -> u32 {
    1
}

/// Query string shared by every paginated work listing:
/// `?page&search&category&tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
    /// Refetch triggered by a like/unlike toggle. Never sent to the server.
    #[serde(skip)]
    pub is_like: bool,
}

impl Default for WorkQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            category: String::new(),
            tags: String::new(),
            is_like: false,
        }
    }
}

impl WorkQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: first_page_or(page),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn liked_refresh(mut self) -> Self {
        self.is_like = true;
        self
    }

    /// Same query with the page clamped to `>= 1`.
    pub fn normalized(mut self) -> Self {
        self.page = first_page_or(self.page);
        self
    }

    /// Filters are equal (page and refresh flag ignored).
    pub fn same_filters(&self, other: &Self) -> bool {
        self.search == other.search && self.category == other.category && self.tags == other.tags
    }
}

// =============================================================================
// UPLOADS
// =============================================================================

/// An image file attached to a work submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// Multipart payload for creating a work.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWork {
    pub images: Vec<ImageUpload>,
    pub title: String,
    pub description: String,
    pub category: Option<RecordId>,
    pub tags: Vec<RecordId>,
    pub is_public: bool,
}

/// Multipart payload for a partial work update. `None`/empty fields are
/// not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkUpdate {
    pub title: String,
    pub description: String,
    pub category: Option<RecordId>,
    pub tags: Vec<RecordId>,
    pub is_public: bool,
    /// Newly attached files only; images already stored are kept server-side
    pub new_images: Vec<ImageUpload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_decodes_backend_shape() {
        let json = r#"{
            "id": 12,
            "title": "Sunset",
            "description": null,
            "member": {"id": 3, "username": "aki"},
            "is_public": true,
            "price": "1200.00",
            "tags": [1, 2],
            "category": {"id": 4, "name": "Painting"},
            "images_data": [{"id": 9, "image_url": "http://cdn.example/works/a.png"}],
            "likes_count": 5,
            "is_liked_by_user": false
        }"#;
        let work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.tag_ids(), vec![1, 2]);
        assert_eq!(work.category_id(), Some(4));
        assert_eq!(work.price, Some(Decimal::new(120000, 2)));
        assert_eq!(work.images_data[0].secure_url(), "https://cdn.example/works/a.png");
        assert_eq!(work.images_data[0].file_name(), "a.png");
    }

    #[test]
    fn work_query_serializes_without_like_flag() {
        let query = WorkQuery::page(2).with_search("sunset").liked_refresh();
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["page"], 2);
        assert_eq!(value["search"], "sunset");
        assert!(value.get("is_like").is_none());
    }

    #[test]
    fn page_zero_is_clamped() {
        assert_eq!(WorkQuery::page(0).page, 1);
        let raw = WorkQuery {
            page: 0,
            ..WorkQuery::default()
        };
        assert_eq!(raw.normalized().page, 1);
    }

    #[test]
    fn same_filters_ignores_page() {
        let a = WorkQuery::page(1).with_category("3");
        let b = WorkQuery::page(4).with_category("3");
        assert!(a.same_filters(&b));
        assert!(!a.same_filters(&b.with_tags("1")));
    }
}
