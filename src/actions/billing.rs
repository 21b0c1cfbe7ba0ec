use super::{billing_slice, Dispatcher, Request};
use crate::error::Result;
use crate::store::billing::{
    BillingSlice, CANCEL_SUBSCRIPTION, CREATE_CHECKOUT_SESSION, GET_BILLING_PLANS,
    GET_SUBSCRIPTION_STATUS, GET_USER_IMAGE_COUNT,
};
use museume_types::{CheckoutSession, ImageCount, MessageResponse, Plan, SubscriptionStatus};

impl Dispatcher {
    pub async fn get_billing_plans(&self) -> Result<Vec<Plan>> {
        self.fetch(
            Request::new(GET_BILLING_PLANS, billing_slice),
            self.api.get_billing_plans(),
            BillingSlice::fulfil_plans,
        )
        .await
    }

    /// Returns the hosted checkout session; the caller redirects to its URL.
    pub async fn create_checkout_session(&self, plan_id: &str) -> Result<CheckoutSession> {
        self.fetch(
            Request::new(CREATE_CHECKOUT_SESSION, billing_slice).mutation(),
            self.api.create_checkout_session(plan_id),
            BillingSlice::fulfil_checkout,
        )
        .await
    }

    pub async fn get_subscription_status(&self) -> Result<SubscriptionStatus> {
        self.fetch(
            Request::new(GET_SUBSCRIPTION_STATUS, billing_slice),
            self.api.get_subscription_status(),
            BillingSlice::fulfil_subscription_status,
        )
        .await
    }

    pub async fn cancel_subscription(&self) -> Result<MessageResponse> {
        self.mutate(
            Request::new(CANCEL_SUBSCRIPTION, billing_slice),
            self.api.cancel_subscription(),
            BillingSlice::fulfil_cancel,
            "Your subscription has been cancelled",
        )
        .await
    }

    pub async fn get_user_image_count(&self) -> Result<ImageCount> {
        self.fetch(
            Request::new(GET_USER_IMAGE_COUNT, billing_slice),
            self.api.get_user_image_count(),
            BillingSlice::fulfil_image_count,
        )
        .await
    }
}
