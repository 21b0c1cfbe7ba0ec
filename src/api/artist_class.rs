//! Artist class endpoints.

use super::ApiClient;
use crate::error::Result;
use museume_types::{
    ArtistClass, ArtistClassQuery, ClassSignupRequest, ClassSignupResponse,
    ConfirmPaymentRequest, MessageResponse, Page, RecordId, VideoUrlResponse,
};

impl ApiClient {
    pub async fn get_artist_classes(&self, query: &ArtistClassQuery) -> Result<Page<ArtistClass>> {
        self.get_with_query("/artist-classes", query).await
    }

    pub async fn get_my_artist_classes(
        &self,
        query: &ArtistClassQuery,
    ) -> Result<Page<ArtistClass>> {
        self.get_with_query("/artist-classes/my-classes", query).await
    }

    pub async fn get_artist_class_detail(&self, id: RecordId) -> Result<ArtistClass> {
        self.get(&format!("/artist-classes/{}", id)).await
    }

    pub async fn artist_class_sign_up(&self, class_id: RecordId) -> Result<ClassSignupResponse> {
        self.post(
            "/artist-classes/signup/",
            &ClassSignupRequest {
                artist_class: class_id,
            },
        )
        .await
    }

    /// Emails the class video URL to the member and echoes it back.
    pub async fn get_artist_class_video_url(&self, class_id: RecordId) -> Result<VideoUrlResponse> {
        self.post_empty(&format!("/artist-classes/{}/video-url/", class_id))
            .await
    }

    pub async fn confirm_payment(&self, payment_intent: &str) -> Result<MessageResponse> {
        self.post(
            "/artist-classes/confirm-payment/",
            &ConfirmPaymentRequest {
                payment_intent: payment_intent.to_string(),
            },
        )
        .await
    }
}
