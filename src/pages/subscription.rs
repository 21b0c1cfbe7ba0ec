//! Rate plan page: plan comparison, upgrade, cancel.

use super::FormError;
use crate::actions::Dispatcher;
use museume_types::{Plan, PlanInterval, SubscriptionStatus};

/// Display sign for a currency code; unknown codes are shown as-is,
/// upper-cased.
pub fn currency_sign(currency: &str) -> String {
    match currency.to_ascii_lowercase().as_str() {
        "jpy" => "¥".to_string(),
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        _ => currency.to_ascii_uppercase(),
    }
}

/// `"¥ 980"`. Amounts are already in display units for the supported
/// currencies.
pub fn format_price(plan: &Plan) -> String {
    format!("{} {}", currency_sign(&plan.currency), plan.amount)
}

pub struct SubscriptionPage {
    dispatcher: Dispatcher,
}

impl SubscriptionPage {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fetch plans and the member's status concurrently. Failures are
    /// already toasted and recorded on the billing slice.
    pub async fn load(&self) {
        let (_plans, _status) = futures::join!(
            self.dispatcher.get_billing_plans(),
            self.dispatcher.get_subscription_status(),
        );
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.dispatcher.store().read(|s| s.billing.plans().to_vec())
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.dispatcher.store().read(|s| {
            s.billing
                .subscription_status()
                .cloned()
                .unwrap_or_else(SubscriptionStatus::free_tier)
        })
    }

    pub fn error(&self) -> Option<String> {
        self.dispatcher
            .store()
            .read(|s| s.billing.error().map(str::to_string))
    }

    /// Plans per interval in display order; intervals without plans are
    /// skipped.
    pub fn plans_by_interval(&self) -> Vec<(PlanInterval, Vec<Plan>)> {
        group_by_interval(&self.plans())
    }

    /// The member is actively subscribed to `plan`.
    pub fn is_current_plan(&self, plan: &Plan) -> bool {
        let status = self.status();
        status.active && status.plan.as_ref().map(|p| p.id == plan.id).unwrap_or(false)
    }

    /// Start checkout for `plan_id`; returns the hosted page URL to redirect to.
    pub async fn upgrade(&self, plan_id: &str) -> Result<Option<String>, FormError> {
        let session = self.dispatcher.create_checkout_session(plan_id).await?;
        Ok(session.url)
    }

    /// Cancel, then refresh the status so the page reflects it.
    pub async fn cancel(&self) -> Result<(), FormError> {
        self.dispatcher.cancel_subscription().await?;
        self.dispatcher.get_subscription_status().await?;
        Ok(())
    }
}

pub fn group_by_interval(plans: &[Plan]) -> Vec<(PlanInterval, Vec<Plan>)> {
    PlanInterval::ORDERED
        .iter()
        .map(|interval| {
            let group: Vec<Plan> = plans
                .iter()
                .filter(|p| p.interval == *interval)
                .cloned()
                .collect();
            (*interval, group)
        })
        .filter(|(_, group)| !group.is_empty())
        .collect()
}
