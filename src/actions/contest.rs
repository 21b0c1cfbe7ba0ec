use super::{contest_slice, Dispatcher, Request};
use crate::error::Result;
use crate::store::contest::{
    ArtistClassListKind, ContestListKind, ContestSlice, ARTIST_CLASS_SIGN_UP, CONFIRM_PAYMENT,
    GET_ARTIST_CLASSES, GET_ARTIST_CLASS_DETAIL, GET_ARTIST_CLASS_VIDEO_URL, GET_CONTESTS,
    GET_CONTEST_DETAIL, GET_MY_ARTIST_CLASSES, GET_MY_CONTESTS, SUBMIT_CONTEST_WORK,
};
use museume_types::{
    ArtistClass, ArtistClassQuery, ClassSignupResponse, Contest, ContestQuery, ContestSubmission,
    MessageResponse, Page, RecordId, VideoUrlResponse,
};

impl Dispatcher {
    pub async fn get_contests(&self, query: ContestQuery) -> Result<Page<Contest>> {
        self.fetch_contests(ContestListKind::All, query).await
    }

    pub async fn get_my_contests(&self, query: ContestQuery) -> Result<Page<Contest>> {
        self.fetch_contests(ContestListKind::Mine, query).await
    }

    async fn fetch_contests(&self, kind: ContestListKind, query: ContestQuery) -> Result<Page<Contest>> {
        let query = query.normalized();
        let key = match kind {
            ContestListKind::All => GET_CONTESTS,
            ContestListKind::Mine => GET_MY_CONTESTS,
        };
        let call = async {
            match kind {
                ContestListKind::All => self.api.get_contests(&query).await,
                ContestListKind::Mine => self.api.get_my_contests(&query).await,
            }
        };
        let echo = query.clone();
        self.fetch(
            Request::new(key, contest_slice),
            call,
            move |slice: &mut ContestSlice, ticket, page| {
                slice.fulfil_contests(ticket, kind, echo, page)
            },
        )
        .await
    }

    pub async fn get_contest_detail(&self, id: RecordId) -> Result<Contest> {
        self.fetch(
            Request::new(GET_CONTEST_DETAIL, contest_slice),
            self.api.get_contest_detail(id),
            ContestSlice::fulfil_contest_detail,
        )
        .await
    }

    pub async fn submit_contest_work(&self, contest_id: RecordId, work_id: RecordId) -> Result<MessageResponse> {
        let body = ContestSubmission { contest_id, work_id };
        self.mutate(
            Request::new(SUBMIT_CONTEST_WORK, contest_slice),
            self.api.submit_contest_work(&body),
            ContestSlice::fulfil_submit,
            "Your work has been submitted",
        )
        .await
    }

    pub async fn get_artist_classes(&self, query: ArtistClassQuery) -> Result<Page<ArtistClass>> {
        self.fetch_artist_classes(ArtistClassListKind::All, query).await
    }

    pub async fn get_my_artist_classes(&self, query: ArtistClassQuery) -> Result<Page<ArtistClass>> {
        self.fetch_artist_classes(ArtistClassListKind::Mine, query).await
    }

    async fn fetch_artist_classes(
        &self,
        kind: ArtistClassListKind,
        query: ArtistClassQuery,
    ) -> Result<Page<ArtistClass>> {
        let query = query.normalized();
        let key = match kind {
            ArtistClassListKind::All => GET_ARTIST_CLASSES,
            ArtistClassListKind::Mine => GET_MY_ARTIST_CLASSES,
        };
        let call = async {
            match kind {
                ArtistClassListKind::All => self.api.get_artist_classes(&query).await,
                ArtistClassListKind::Mine => self.api.get_my_artist_classes(&query).await,
            }
        };
        let echo = query.clone();
        self.fetch(
            Request::new(key, contest_slice),
            call,
            move |slice: &mut ContestSlice, ticket, page| {
                slice.fulfil_artist_classes(ticket, kind, echo, page)
            },
        )
        .await
    }

    pub async fn get_artist_class_detail(&self, id: RecordId) -> Result<ArtistClass> {
        self.fetch(
            Request::new(GET_ARTIST_CLASS_DETAIL, contest_slice),
            self.api.get_artist_class_detail(id),
            ContestSlice::fulfil_artist_class_detail,
        )
        .await
    }

    /// Paid classes answer with a payment intent secret; confirm it with
    /// [`Dispatcher::confirm_payment`] once the card step succeeds.
    pub async fn artist_class_sign_up(&self, class_id: RecordId) -> Result<ClassSignupResponse> {
        self.mutate(
            Request::new(ARTIST_CLASS_SIGN_UP, contest_slice),
            self.api.artist_class_sign_up(class_id),
            ContestSlice::fulfil_signup,
            "You have signed up for the artist class",
        )
        .await
    }

    pub async fn get_artist_class_video_url(&self, class_id: RecordId) -> Result<VideoUrlResponse> {
        self.mutate(
            Request::new(GET_ARTIST_CLASS_VIDEO_URL, contest_slice),
            self.api.get_artist_class_video_url(class_id),
            ContestSlice::fulfil_video_url,
            "The video URL has been sent to your email",
        )
        .await
    }

    pub async fn confirm_payment(&self, payment_intent: &str) -> Result<MessageResponse> {
        self.mutate(
            Request::new(CONFIRM_PAYMENT, contest_slice),
            self.api.confirm_payment(payment_intent),
            ContestSlice::fulfil_payment,
            "Payment completed",
        )
        .await
    }
}
