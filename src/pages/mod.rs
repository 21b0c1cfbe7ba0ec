//! Page controllers
//!
//! Headless counterparts of the app's screens. Each holds the form or list
//! state a renderer shows, dispatches actions on user input, and reads the
//! store for results. Validation failures come back as [`FormError`] for
//! inline display; they are never toasted.

pub mod add_work;
pub mod edit_work;
pub mod list_browser;
pub mod subscription;

use crate::error::ApiError;
use crate::gate::AttachRejection;
use museume_types::RecordId;
use thiserror::Error;

pub use add_work::AddWorkForm;
pub use edit_work::{EditOutcome, EditWorkForm};
pub use list_browser::{
    ArtistClasses, Contests, FamilyGallery, ListBrowser, MyArtistClasses, MyCollection,
    MyContests, MyWorks, PagedList, PublicWorks,
};
pub use subscription::SubscriptionPage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("At least one image is required")]
    NoImages,

    #[error("Maximum {max} images are allowed")]
    TooManyImages { max: usize },

    #[error(transparent)]
    Attach(#[from] AttachRejection),

    #[error("No work is loaded")]
    NotLoaded,

    #[error("Deletion has not been confirmed")]
    DeleteNotConfirmed,

    /// The server refused the submission; carries its message.
    #[error("{0}")]
    Rejected(String),
}

impl From<ApiError> for FormError {
    fn from(err: ApiError) -> Self {
        FormError::Rejected(err.message())
    }
}

/// Append `id` unless already selected.
pub(crate) fn select_unique(selected: &mut Vec<RecordId>, id: RecordId) -> bool {
    if selected.contains(&id) {
        return false;
    }
    selected.push(id);
    true
}
