//! Billing endpoints.

use super::ApiClient;
use crate::error::Result;
use museume_types::{CheckoutRequest, CheckoutSession, ImageCount, MessageResponse, Plan, SubscriptionStatus};

impl ApiClient {
    pub async fn get_billing_plans(&self) -> Result<Vec<Plan>> {
        self.get("/billing/plans/").await
    }

    pub async fn create_checkout_session(&self, plan_id: &str) -> Result<CheckoutSession> {
        self.post(
            "/billing/create-checkout-session/",
            &CheckoutRequest {
                plan_id: plan_id.to_string(),
            },
        )
        .await
    }

    pub async fn get_subscription_status(&self) -> Result<SubscriptionStatus> {
        self.get("/billing/subscription-status/").await
    }

    pub async fn cancel_subscription(&self) -> Result<MessageResponse> {
        self.post_empty("/billing/cancel-subscription/").await
    }

    pub async fn get_user_image_count(&self) -> Result<ImageCount> {
        self.get("/billing/user-image-count/").await
    }
}
