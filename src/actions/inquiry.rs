use super::{Acknowledged, Dispatcher};
use crate::error::Result;
use museume_types::{Inquiry, MessageResponse};

const INQUIRY_SENT: &str = "Your inquiry has been sent";

impl Dispatcher {
    /// Contact form submission. No slice tracks it; the toast is the only
    /// feedback.
    pub async fn send_inquiry(&self, inquiry: &Inquiry) -> Result<MessageResponse> {
        match self.api.send_inquiry(inquiry).await {
            Ok(response) => {
                let message = response.server_message().unwrap_or(INQUIRY_SENT).to_string();
                self.store.update(|s| s.toasts.success(message));
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(error = %err, "inquiry failed");
                let message = err.message();
                self.store.update(|s| s.toasts.error(message));
                Err(err)
            }
        }
    }
}
