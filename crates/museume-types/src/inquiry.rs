//! Inquiry (contact form) API Types
//!
//! - `POST /inquiry/` (multipart) → `MessageResponse`

use serde::{Deserialize, Serialize};

/// Contact form. Signed-in members may omit name and email; the backend
/// fills them in from the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub subject: String,
    pub inquiry_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl Inquiry {
    /// Multipart text fields in submission order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("subject", self.subject.clone()),
            ("inquiry_message", self.inquiry_message.clone()),
        ];
        if let Some(name) = &self.user_name {
            fields.push(("user_name", name.clone()));
        }
        if let Some(email) = &self.user_email {
            fields.push(("user_email", email.clone()));
        }
        fields
    }
}
