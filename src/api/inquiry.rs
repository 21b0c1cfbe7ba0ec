//! Contact form endpoint.

use super::ApiClient;
use crate::error::Result;
use museume_types::{Inquiry, MessageResponse};
use reqwest::multipart::Form;

impl ApiClient {
    pub async fn send_inquiry(&self, inquiry: &Inquiry) -> Result<MessageResponse> {
        let form = inquiry
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        self.post_form("/inquiry/", form).await
    }
}
