//! Upload gate
//!
//! Free-tier accounts may hold at most [`FREE_TIER_IMAGE_LIMIT`] images in
//! total. Every submission, on any plan, carries at most
//! [`MAX_IMAGES_PER_WORK`]. Everything here is derived from explicit inputs
//! and recomputed on demand.

use museume_types::SubscriptionStatus;
use thiserror::Error;

pub const FREE_TIER_IMAGE_LIMIT: u32 = 5;
pub const MAX_IMAGES_PER_WORK: usize = 5;

/// Why an attach was refused. The display text is the warning shown to the
/// member; nothing is attached when any of these fire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachRejection {
    #[error("You can only upload up to {} images", MAX_IMAGES_PER_WORK)]
    BatchTooLarge { batch: usize },

    #[error("Total number of images cannot exceed {}", MAX_IMAGES_PER_WORK)]
    SubmissionFull { attached: usize, batch: usize },

    #[error(
        "Free plan allows up to {} images total. You currently have {account_images} images. Upgrade to premium for unlimited uploads.",
        FREE_TIER_IMAGE_LIMIT
    )]
    FreeTierExhausted { account_images: u32, batch: usize },
}

/// Per-submission cap only, for forms that do not count against the
/// account total (editing an existing work).
pub fn check_submission(attached: usize, batch: usize) -> Result<(), AttachRejection> {
    if batch > MAX_IMAGES_PER_WORK {
        return Err(AttachRejection::BatchTooLarge { batch });
    }
    if attached + batch > MAX_IMAGES_PER_WORK {
        return Err(AttachRejection::SubmissionFull { attached, batch });
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadGate {
    pub subscription: SubscriptionStatus,
    /// Images across all of the member's works
    pub account_images: u32,
}

impl UploadGate {
    pub fn new(subscription: SubscriptionStatus, account_images: u32) -> Self {
        Self {
            subscription,
            account_images,
        }
    }

    /// Inactive, zero-priced, or unknown subscriptions all count as free.
    pub fn is_free_tier(&self) -> bool {
        !self.subscription.is_paid()
    }

    /// Count images the member just uploaded.
    pub fn record_upload(&mut self, images: usize) {
        let added = u32::try_from(images).unwrap_or(u32::MAX);
        self.account_images = self.account_images.saturating_add(added);
    }

    /// Advisory flag for disabling the upload control.
    pub fn limit_reached(&self) -> bool {
        self.is_free_tier() && self.account_images >= FREE_TIER_IMAGE_LIMIT
    }

    /// Check a batch of `batch` files against a submission already holding
    /// `attached` images.
    pub fn check_attach(&self, attached: usize, batch: usize) -> Result<(), AttachRejection> {
        check_submission(attached, batch)?;
        if self.is_free_tier()
            && u64::from(self.account_images) + batch as u64 > u64::from(FREE_TIER_IMAGE_LIMIT)
        {
            return Err(AttachRejection::FreeTierExhausted {
                account_images: self.account_images,
                batch,
            });
        }
        Ok(())
    }

    /// Usage line shown under the upload control.
    pub fn usage_label(&self) -> String {
        if self.is_free_tier() {
            format!(
                "Free plan: {} / {} images used",
                self.account_images, FREE_TIER_IMAGE_LIMIT
            )
        } else {
            "Premium plan: unlimited uploads".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museume_types::{Plan, PlanInterval};
    use proptest::prelude::*;

    fn paid() -> SubscriptionStatus {
        SubscriptionStatus {
            active: true,
            plan: Some(Plan {
                id: "price_basic".into(),
                name: Some("Basic".into()),
                amount: 980,
                currency: "jpy".into(),
                interval: PlanInterval::Month,
            }),
        }
    }

    #[test]
    fn free_tier_limit() {
        let gate = UploadGate::new(SubscriptionStatus::free_tier(), 5);
        assert!(gate.limit_reached());
        assert!(!UploadGate::new(SubscriptionStatus::free_tier(), 4).limit_reached());
        assert!(!UploadGate::new(paid(), 500).limit_reached());
    }

    #[test]
    fn recorded_uploads_count_toward_the_limit() {
        let mut gate = UploadGate::new(SubscriptionStatus::free_tier(), 3);
        gate.record_upload(2);
        assert_eq!(gate.account_images, 5);
        assert!(gate.limit_reached());
        assert!(gate.check_attach(0, 1).is_err());
    }

    #[test]
    fn zero_priced_active_plan_is_free() {
        let mut status = paid();
        if let Some(plan) = status.plan.as_mut() {
            plan.amount = 0;
        }
        assert!(UploadGate::new(status, 5).limit_reached());
    }

    #[test]
    fn rejections_fire_in_order() {
        let gate = UploadGate::new(SubscriptionStatus::free_tier(), 4);
        assert_eq!(
            gate.check_attach(0, 6),
            Err(AttachRejection::BatchTooLarge { batch: 6 })
        );
        assert_eq!(
            gate.check_attach(4, 2),
            Err(AttachRejection::SubmissionFull { attached: 4, batch: 2 })
        );
        assert_eq!(
            gate.check_attach(0, 2),
            Err(AttachRejection::FreeTierExhausted { account_images: 4, batch: 2 })
        );
        assert_eq!(gate.check_attach(0, 1), Ok(()));
    }

    #[test]
    fn paid_plan_only_has_per_work_cap() {
        let gate = UploadGate::new(paid(), 120);
        assert_eq!(gate.check_attach(2, 3), Ok(()));
        assert!(gate.check_attach(3, 3).is_err());
    }

    #[test]
    fn warning_text_mentions_current_count() {
        let err = AttachRejection::FreeTierExhausted { account_images: 3, batch: 3 };
        assert!(err.to_string().contains("You currently have 3 images"));
    }

    proptest! {
        #[test]
        fn free_limit_matches_count(count in 0u32..20) {
            let gate = UploadGate::new(SubscriptionStatus::free_tier(), count);
            prop_assert_eq!(gate.limit_reached(), count >= FREE_TIER_IMAGE_LIMIT);
        }

        #[test]
        fn accepted_batches_respect_both_caps(
            count in 0u32..10,
            attached in 0usize..6,
            batch in 0usize..8,
        ) {
            let gate = UploadGate::new(SubscriptionStatus::free_tier(), count);
            if gate.check_attach(attached, batch).is_ok() {
                prop_assert!(attached + batch <= MAX_IMAGES_PER_WORK);
                prop_assert!(count as usize + batch <= FREE_TIER_IMAGE_LIMIT as usize);
            }
        }
    }
}
