//! Register-a-work form

use super::{select_unique, FormError};
use crate::actions::Dispatcher;
use crate::gate::{UploadGate, MAX_IMAGES_PER_WORK};
use museume_types::{ImageUpload, NewWork, RecordId, SubscriptionStatus, Work};

pub struct AddWorkForm {
    dispatcher: Dispatcher,
    images: Vec<ImageUpload>,
    pub title: String,
    /// Sent as the work's `description`
    pub comments: String,
    pub category: Option<RecordId>,
    tags: Vec<RecordId>,
    pub is_public: bool,
    gate: UploadGate,
}

impl AddWorkForm {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            images: Vec::new(),
            title: String::new(),
            comments: String::new(),
            category: None,
            tags: Vec::new(),
            is_public: false,
            gate: UploadGate::default(),
        }
    }

    /// Fetch lookups and the member's upload allowance. A failed count or
    /// status lookup falls back to zero images on the free tier.
    pub async fn load(&mut self) {
        let api = self.dispatcher.api();
        let (_, _, count, status) = futures::join!(
            self.dispatcher.get_categories(),
            self.dispatcher.get_tags(),
            api.get_user_image_count(),
            api.get_subscription_status(),
        );

        let account_images = count
            .map(|c| c.total_images)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "image count unavailable, assuming 0");
                0
            });
        let subscription = status.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "subscription status unavailable, assuming free tier");
            SubscriptionStatus::free_tier()
        });
        self.gate = UploadGate::new(subscription, account_images);
    }

    pub fn gate(&self) -> &UploadGate {
        &self.gate
    }

    /// Whether the upload control should be disabled.
    pub fn upload_disabled(&self) -> bool {
        self.images.len() >= MAX_IMAGES_PER_WORK || self.gate.limit_reached()
    }

    /// Attach a batch of files. A rejected batch attaches nothing and raises
    /// a warning toast.
    pub fn attach(&mut self, files: Vec<ImageUpload>) -> Result<(), FormError> {
        if let Err(rejection) = self.gate.check_attach(self.images.len(), files.len()) {
            let warning = rejection.to_string();
            self.dispatcher.store().update(|s| s.toasts.warning(warning));
            return Err(rejection.into());
        }
        self.images.extend(files);
        self.images.truncate(MAX_IMAGES_PER_WORK);
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn images(&self) -> &[ImageUpload] {
        &self.images
    }

    pub fn select_tag(&mut self, id: RecordId) -> bool {
        select_unique(&mut self.tags, id)
    }

    pub fn remove_tag(&mut self, id: RecordId) {
        self.tags.retain(|t| *t != id);
    }

    pub fn tags(&self) -> &[RecordId] {
        &self.tags
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.images.is_empty() {
            return Err(FormError::NoImages);
        }
        if self.images.len() > MAX_IMAGES_PER_WORK {
            return Err(FormError::TooManyImages {
                max: MAX_IMAGES_PER_WORK,
            });
        }
        Ok(())
    }

    pub fn payload(&self) -> NewWork {
        NewWork {
            images: self.images.iter().take(MAX_IMAGES_PER_WORK).cloned().collect(),
            title: self.title.clone(),
            description: self.comments.clone(),
            category: self.category,
            tags: self.tags.clone(),
            is_public: self.is_public,
        }
    }

    /// Validate and submit. On success the form is cleared, the stored
    /// images count toward the allowance, and the tag and category lookups
    /// are refreshed.
    pub async fn submit(&mut self) -> Result<Work, FormError> {
        self.validate()?;
        let work = self.dispatcher.add_work(&self.payload()).await?;

        self.gate.record_upload(work.images_data.len());
        self.reset();
        let (_categories, _tags) = futures::join!(
            self.dispatcher.get_categories(),
            self.dispatcher.get_tags()
        );
        tracing::info!(work_id = work.id, "work registered");
        Ok(work)
    }

    fn reset(&mut self) {
        self.images.clear();
        self.title.clear();
        self.comments.clear();
        self.category = None;
        self.tags.clear();
        self.is_public = false;
    }
}
