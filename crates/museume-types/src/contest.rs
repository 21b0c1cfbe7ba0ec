//! Contest and Artist Class API Types
//!
//! # API Endpoints
//!
//! - `GET /contests?page&search&status` → `Page<Contest>`
//! - `GET /contests/my-contests?page&search&status` → `Page<Contest>`
//! - `GET /contests/:id` → `Contest`
//! - `POST /contests/submit-work/` → `MessageResponse`
//! - `GET /artist-classes?page&search&is_free&class_type&status` → `Page<ArtistClass>`
//! - `GET /artist-classes/my-classes?...` → `Page<ArtistClass>`
//! - `GET /artist-classes/:id` → `ArtistClass`
//! - `POST /artist-classes/signup/` → `ClassSignupResponse`
//! - `POST /artist-classes/:id/video-url/` → `VideoUrlResponse`
//! - `POST /artist-classes/confirm-payment/` → `MessageResponse`

use crate::{first_page_or, IdOrNamed, RecordId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_page() -> u32 {
    1
}

// =============================================================================
// CONTESTS
// =============================================================================

/// A contest works can be submitted to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: RecordId,
    #[serde(default, alias = "title")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `?page&search&status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub search: String,
    /// Contest status filter (empty = all)
    #[serde(default, rename = "status")]
    pub filter: String,
}

impl Default for ContestQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            filter: String::new(),
        }
    }
}

impl ContestQuery {
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

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn normalized(mut self) -> Self {
        self.page = first_page_or(self.page);
        self
    }

    pub fn same_filters(&self, other: &Self) -> bool {
        self.search == other.search && self.filter == other.filter
    }
}

/// Body of `POST /contests/submit-work/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSubmission {
    pub contest_id: RecordId,
    pub work_id: RecordId,
}

// =============================================================================
// ARTIST CLASSES
// =============================================================================

/// Delivery format of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassType {
    RealTime,
    Recorded,
    #[serde(other)]
    Other,
}

/// Scheduling status computed by the backend from start/end dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    Scheduled,
    Ongoing,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// An artist class members can sign up for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistClass {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<IdOrNamed>,
    #[serde(default)]
    pub tags: Vec<RecordId>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub class_type: Option<ClassType>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ClassStatus,
    /// Signup state added by the detail endpoint for the current member
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ArtistClass {
    /// Status to badge in listings. Classes without both dates, or with a
    /// status the backend could not compute, carry no badge.
    pub fn status_badge(&self) -> Option<ClassStatus> {
        if self.start_date.is_none() || self.end_date.is_none() {
            return None;
        }
        match self.status {
            ClassStatus::Unknown => None,
            status => Some(status),
        }
    }
}

/// `?page&search&is_free&class_type&status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistClassQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_type: Option<ClassType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClassStatus>,
}

impl Default for ArtistClassQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            is_free: None,
            class_type: None,
            status: None,
        }
    }
}

impl ArtistClassQuery {
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

    pub fn normalized(mut self) -> Self {
        self.page = first_page_or(self.page);
        self
    }

    pub fn same_filters(&self, other: &Self) -> bool {
        self.search == other.search
            && self.is_free == other.is_free
            && self.class_type == other.class_type
            && self.status == other.status
    }
}

/// Body of `POST /artist-classes/signup/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSignupRequest {
    pub artist_class: RecordId,
}

/// Signup outcome. Free classes confirm immediately; paid classes return a
/// payment intent secret to complete checkout with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassSignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payment_intent_client_secret: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ClassSignupResponse {
    pub fn requires_payment(&self) -> bool {
        self.payment_intent_client_secret.is_some()
    }
}

/// Response of `POST /artist-classes/:id/video-url/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoUrlResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `POST /artist-classes/confirm-payment/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub payment_intent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_query_omits_unset_filters() {
        let query = ArtistClassQuery::page(1).with_search("watercolor");
        let value = serde_json::to_value(&query).unwrap();
        assert!(value.get("is_free").is_none());
        assert!(value.get("class_type").is_none());
        assert_eq!(value["search"], "watercolor");
    }

    #[test]
    fn unknown_status_has_no_badge() {
        let class: ArtistClass = serde_json::from_str(
            r#"{"id": 1, "name": "Ink", "status": "paused",
                "start_date": "2025-01-01T00:00:00Z", "end_date": "2025-02-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(class.status, ClassStatus::Unknown);
        assert_eq!(class.status_badge(), None);
    }

    #[test]
    fn badge_requires_both_dates() {
        let class: ArtistClass = serde_json::from_str(
            r#"{"id": 1, "name": "Ink", "status": "ongoing", "start_date": "2025-01-01T00:00:00+09:00"}"#,
        )
        .unwrap();
        assert_eq!(class.status_badge(), None);
    }

    #[test]
    fn contest_status_is_sent_as_status() {
        let query = ContestQuery::page(3).with_filter("open");
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["status"], "open");
        assert_eq!(value["page"], 3);
    }
}
