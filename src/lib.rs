//! Museume client
//!
//! Headless client for the Museume art platform: typed wrappers over the
//! REST API, a request-lifecycle store shared by every screen, and page
//! controllers that hold form state and drive the store.
//!
//! ## Layers
//! Page controller -> Dispatcher action -> ApiClient -> REST backend,
//! with the outcome folded back into [`store::AppStore`] and a toast.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use museume::{Dispatcher, ListBrowser, PublicWorks};
//!
//! # async fn demo() -> museume::Result<()> {
//! let dispatcher = Dispatcher::from_env()?;
//! let mut browser = ListBrowser::<PublicWorks>::new(dispatcher.clone());
//! browser.set_search("sunset").await?;
//! while browser.see_more().await? {}
//! println!("{} works", browser.items().len());
//! # Ok(())
//! # }
//! ```

// Error handling and configuration
pub mod config;
pub mod error;
pub mod telemetry;

// Remote call layer
pub mod api;

// Request-lifecycle store and user notifications
pub mod notify;
pub mod store;

// Actions and page controllers
pub mod actions;
pub mod gate;
pub mod pages;

// In-memory backend for tests and local demos
#[cfg(feature = "mock-server")]
pub mod mock_api;

pub use actions::{Acknowledged, Dispatcher};
pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use gate::{AttachRejection, UploadGate};
pub use notify::{Toast, ToastQueue, ToastSeverity};
pub use pages::{
    AddWorkForm, EditOutcome, EditWorkForm, FormError, ListBrowser, PagedList, SubscriptionPage,
};
pub use pages::{
    ArtistClasses, Contests, FamilyGallery, MyArtistClasses, MyCollection, MyContests, MyWorks,
    PublicWorks,
};
pub use store::{AppStore, Store};

pub use museume_types;
