//! Billing API Types
//!
//! # API Endpoints
//!
//! - `GET /billing/plans/` → `Vec<Plan>`
//! - `POST /billing/create-checkout-session/` → `CheckoutSession`
//! - `GET /billing/subscription-status/` → `SubscriptionStatus`
//! - `POST /billing/cancel-subscription/` → `MessageResponse`
//! - `GET /billing/user-image-count/` → `ImageCount`

use serde::{Deserialize, Serialize};

/// Billing interval of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterval {
    Day,
    Week,
    Month,
    Year,
    #[serde(other)]
    Other,
}

impl PlanInterval {
    /// Display order on the subscription page
    pub const ORDERED: [PlanInterval; 4] = [
        PlanInterval::Day,
        PlanInterval::Week,
        PlanInterval::Month,
        PlanInterval::Year,
    ];
}

/// A subscription plan. `amount` is in the currency's minor unit as stored
/// by the payment provider (yen for JPY, cents for USD); zero means free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(deserialize_with = "crate::deserialize_id_or_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default = "default_interval")]
    pub interval: PlanInterval,
}

fn default_interval() -> PlanInterval {
    PlanInterval::Month
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.amount == 0
    }
}

/// Current subscription of the signed-in member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub plan: Option<Plan>,
}

impl SubscriptionStatus {
    /// Fallback assumed when the status cannot be fetched
    pub fn free_tier() -> Self {
        Self::default()
    }

    /// Active subscription on a plan with a non-zero price
    pub fn is_paid(&self) -> bool {
        self.active && self.plan.as_ref().map(|p| !p.is_free()).unwrap_or(false)
    }
}

/// Body of `POST /billing/create-checkout-session/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub plan_id: String,
}

/// Hosted checkout page to redirect the member to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Total number of images across all of the member's works
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCount {
    #[serde(default)]
    pub total_images: u32,
}
