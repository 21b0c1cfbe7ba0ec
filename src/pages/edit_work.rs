//! Edit-a-work form, including the two-step delete.

use super::{select_unique, FormError};
use crate::actions::Dispatcher;
use crate::gate::{check_submission, MAX_IMAGES_PER_WORK};
use museume_types::{ImageUpload, RecordId, Work, WorkImage, WorkUpdate};

/// What the form finished with; the caller navigates back to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Updated,
    Deleted,
}

pub struct EditWorkForm {
    dispatcher: Dispatcher,
    work_id: Option<RecordId>,
    pub title: String,
    pub comments: String,
    pub category: Option<RecordId>,
    tags: Vec<RecordId>,
    pub is_public: bool,
    existing: Vec<WorkImage>,
    new_images: Vec<ImageUpload>,
    confirming_delete: bool,
}

impl EditWorkForm {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            work_id: None,
            title: String::new(),
            comments: String::new(),
            category: None,
            tags: Vec::new(),
            is_public: false,
            existing: Vec::new(),
            new_images: Vec::new(),
            confirming_delete: false,
        }
    }

    /// Fetch lookups and the work, then fill the form from it.
    pub async fn load(&mut self, id: RecordId) -> Result<(), FormError> {
        let (_, _, detail) = futures::join!(
            self.dispatcher.get_categories(),
            self.dispatcher.get_tags(),
            self.dispatcher.get_work_detail(id),
        );
        self.fill_from(&detail?);
        Ok(())
    }

    pub fn fill_from(&mut self, work: &Work) {
        self.work_id = Some(work.id);
        self.title = work.title.clone().unwrap_or_default();
        self.comments = work.description.clone().unwrap_or_default();
        self.category = work.category_id();
        self.tags = work.tag_ids();
        self.is_public = work.is_public;
        self.existing = work.images_data.clone();
        self.new_images.clear();
        self.confirming_delete = false;
    }

    pub fn work_id(&self) -> Option<RecordId> {
        self.work_id
    }

    pub fn image_count(&self) -> usize {
        self.existing.len() + self.new_images.len()
    }

    pub fn existing_images(&self) -> &[WorkImage] {
        &self.existing
    }

    pub fn new_images(&self) -> &[ImageUpload] {
        &self.new_images
    }

    /// Existing and new images together count against the per-work cap.
    pub fn attach(&mut self, files: Vec<ImageUpload>) -> Result<(), FormError> {
        if let Err(rejection) = check_submission(self.image_count(), files.len()) {
            let warning = rejection.to_string();
            self.dispatcher.store().update(|s| s.toasts.warning(warning));
            return Err(rejection.into());
        }
        self.new_images.extend(files);
        Ok(())
    }

    pub fn remove_existing(&mut self, index: usize) {
        if index < self.existing.len() {
            self.existing.remove(index);
        }
    }

    pub fn remove_new(&mut self, index: usize) {
        if index < self.new_images.len() {
            self.new_images.remove(index);
        }
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
        if self.work_id.is_none() {
            return Err(FormError::NotLoaded);
        }
        if self.image_count() > MAX_IMAGES_PER_WORK {
            return Err(FormError::TooManyImages {
                max: MAX_IMAGES_PER_WORK,
            });
        }
        Ok(())
    }

    /// Partial update: only new files are uploaded.
    pub fn payload(&self) -> WorkUpdate {
        WorkUpdate {
            title: self.title.clone(),
            description: self.comments.clone(),
            category: self.category,
            tags: self.tags.clone(),
            is_public: self.is_public,
            new_images: self.new_images.clone(),
        }
    }

    pub async fn submit(&mut self) -> Result<EditOutcome, FormError> {
        self.validate()?;
        let id = self.work_id.ok_or(FormError::NotLoaded)?;
        self.dispatcher.update_work(id, &self.payload()).await?;
        self.new_images.clear();
        Ok(self.take_outcome().unwrap_or(EditOutcome::Updated))
    }

    /// First step of deleting: the renderer shows a confirmation prompt.
    pub fn request_delete(&mut self) {
        self.confirming_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub async fn confirm_delete(&mut self) -> Result<EditOutcome, FormError> {
        if !self.confirming_delete {
            return Err(FormError::DeleteNotConfirmed);
        }
        let id = self.work_id.ok_or(FormError::NotLoaded)?;
        self.confirming_delete = false;
        self.dispatcher.delete_work(id).await?;
        Ok(self.take_outcome().unwrap_or(EditOutcome::Deleted))
    }

    /// Consume a pending update/delete result flag, resetting the work state.
    pub fn take_outcome(&self) -> Option<EditOutcome> {
        let outcome = self.dispatcher.store().read(|s| {
            if s.work.delete_work_res() {
                Some(EditOutcome::Deleted)
            } else if s.work.edit_res() {
                Some(EditOutcome::Updated)
            } else {
                None
            }
        });
        if outcome.is_some() {
            self.dispatcher.reset_work_state();
        }
        outcome
    }
}
