//! Shared API Types for Museume
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing the REST boundary.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  Museume API     │  JSON   │  museume client  │
//! │  (REST backend)  │ ◄─────► │  (store + pages) │
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. All API types live here - no inline struct definitions in wrappers
//! 2. Unknown server fields are tolerated (`#[serde(default)]` everywhere it matters)
//! 3. Ids that the backend sends as either numbers or strings are normalized to strings

pub mod billing;
pub mod contest;
pub mod inquiry;
pub mod work;

use serde::{Deserialize, Serialize};

pub use billing::*;
pub use contest::*;
pub use inquiry::*;
pub use work::*;

/// Primary key of a backend record (works, tags, contests, classes).
pub type RecordId = i64;

// ============================================================================
// PAGINATION
// ============================================================================

/// Paginated envelope returned by every list endpoint.
///
/// `next` is an opaque cursor (the backend sends the absolute URL of the
/// following page); it is absent on the final page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

// ============================================================================
// GENERIC RESPONSES
// ============================================================================

/// Acknowledgement body returned by mutations (`{"message": "..."}`).
///
/// Everything else the server sends alongside is preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A relation the backend serializes either as a bare primary key or as a
/// nested `{id, name}` object depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdOrNamed {
    Id(RecordId),
    Named(NamedRecord),
}

impl IdOrNamed {
    pub fn id(&self) -> RecordId {
        match self {
            IdOrNamed::Id(id) => *id,
            IdOrNamed::Named(named) => named.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            IdOrNamed::Id(_) => None,
            IdOrNamed::Named(named) => Some(named.name.as_str()),
        }
    }
}

/// `{id, name}` pair used by tags, categories and nested relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
}

/// Helper to deserialize a numeric or string id into String
pub(crate) fn deserialize_id_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct IdOrStringVisitor;

    impl<'de> de::Visitor<'de> for IdOrStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an integer id or string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdOrStringVisitor)
}

/// Clamp a requested page number to the first page.
pub(crate) fn first_page_or(page: u32) -> u32 {
    page.max(1)
}
