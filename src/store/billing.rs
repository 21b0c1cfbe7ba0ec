//! Billing slice

use super::lifecycle::{Lifecycle, RequestKey, SliceCore, Ticket};
use museume_types::{CheckoutSession, ImageCount, MessageResponse, Plan, SubscriptionStatus};

pub const GET_BILLING_PLANS: RequestKey = "billing/getBillingPlans";
pub const CREATE_CHECKOUT_SESSION: RequestKey = "billing/createCheckoutSession";
pub const GET_SUBSCRIPTION_STATUS: RequestKey = "billing/getSubscriptionStatus";
pub const CANCEL_SUBSCRIPTION: RequestKey = "billing/cancelSubscription";
pub const GET_USER_IMAGE_COUNT: RequestKey = "billing/getUserImageCount";

#[derive(Debug, Default, Clone)]
pub struct BillingSlice {
    core: SliceCore,
    plans: Vec<Plan>,
    subscription_status: Option<SubscriptionStatus>,
    checkout: Option<CheckoutSession>,
    image_count: Option<ImageCount>,
    cancel_res: Option<MessageResponse>,
}

impl Lifecycle for BillingSlice {
    fn core_mut(&mut self) -> &mut SliceCore {
        &mut self.core
    }
}

impl BillingSlice {
    pub fn fulfil_plans(&mut self, ticket: Ticket, plans: Vec<Plan>) {
        if self.core.fulfil(ticket) {
            self.plans = plans;
        }
    }

    pub fn fulfil_subscription_status(&mut self, ticket: Ticket, status: SubscriptionStatus) {
        if self.core.fulfil(ticket) {
            self.subscription_status = Some(status);
        }
    }

    pub fn fulfil_checkout(&mut self, ticket: Ticket, session: CheckoutSession) {
        if self.core.fulfil(ticket) {
            self.checkout = Some(session);
        }
    }

    pub fn fulfil_image_count(&mut self, ticket: Ticket, count: ImageCount) {
        if self.core.fulfil(ticket) {
            self.image_count = Some(count);
        }
    }

    pub fn fulfil_cancel(&mut self, ticket: Ticket, response: MessageResponse) {
        if self.core.fulfil(ticket) {
            self.cancel_res = Some(response);
        }
    }

    pub fn core(&self) -> &SliceCore {
        &self.core
    }

    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.core.error()
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn subscription_status(&self) -> Option<&SubscriptionStatus> {
        self.subscription_status.as_ref()
    }

    pub fn checkout(&self) -> Option<&CheckoutSession> {
        self.checkout.as_ref()
    }

    pub fn image_count(&self) -> Option<ImageCount> {
        self.image_count
    }

    pub fn cancel_res(&self) -> Option<&MessageResponse> {
        self.cancel_res.as_ref()
    }
}
