//! Contest slice, which also carries artist classes (they share one loading
//! flag and one error).

use super::accumulator::Accumulator;
use super::lifecycle::{Lifecycle, RequestKey, SliceCore, Ticket};
use museume_types::{
    ArtistClass, ArtistClassQuery, ClassSignupResponse, Contest, ContestQuery, MessageResponse,
    Page, VideoUrlResponse,
};

pub const GET_CONTESTS: RequestKey = "contest/getContests";
pub const GET_CONTEST_DETAIL: RequestKey = "contest/getContestDetail";
pub const GET_MY_CONTESTS: RequestKey = "contest/getMyContests";
pub const SUBMIT_CONTEST_WORK: RequestKey = "contest/submitContestWork";
pub const GET_ARTIST_CLASSES: RequestKey = "contest/getArtistClasses";
pub const GET_MY_ARTIST_CLASSES: RequestKey = "contest/getMyArtistClasses";
pub const GET_ARTIST_CLASS_DETAIL: RequestKey = "contest/getArtistClassDetail";
pub const ARTIST_CLASS_SIGN_UP: RequestKey = "contest/artistClassSignUp";
pub const GET_ARTIST_CLASS_VIDEO_URL: RequestKey = "contest/getArtistClassVideoUrl";
pub const CONFIRM_PAYMENT: RequestKey = "contest/confirmPayment";

pub type ContestList = Accumulator<Contest, ContestQuery>;
pub type ArtistClassList = Accumulator<ArtistClass, ArtistClassQuery>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestListKind {
    All,
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistClassListKind {
    All,
    Mine,
}

#[derive(Debug, Default, Clone)]
pub struct ContestSlice {
    core: SliceCore,
    contests: ContestList,
    my_contests: ContestList,
    contest_detail: Option<Contest>,
    submit_res: Option<MessageResponse>,
    artist_classes: ArtistClassList,
    my_artist_classes: ArtistClassList,
    artist_class_detail: Option<ArtistClass>,
    signup_res: Option<ClassSignupResponse>,
    video_url: Option<VideoUrlResponse>,
    payment_res: Option<MessageResponse>,
}

impl Lifecycle for ContestSlice {
    fn core_mut(&mut self) -> &mut SliceCore {
        &mut self.core
    }
}

impl ContestSlice {
    pub fn fulfil_contests(
        &mut self,
        ticket: Ticket,
        kind: ContestListKind,
        query: ContestQuery,
        page: Page<Contest>,
    ) {
        if self.core.fulfil(ticket) {
            let list = match kind {
                ContestListKind::All => &mut self.contests,
                ContestListKind::Mine => &mut self.my_contests,
            };
            list.apply(query, page);
        }
    }

    pub fn fulfil_contest_detail(&mut self, ticket: Ticket, contest: Contest) {
        if self.core.fulfil(ticket) {
            self.contest_detail = Some(contest);
        }
    }

    pub fn fulfil_submit(&mut self, ticket: Ticket, response: MessageResponse) {
        if self.core.fulfil(ticket) {
            self.submit_res = Some(response);
        }
    }

    pub fn fulfil_artist_classes(
        &mut self,
        ticket: Ticket,
        kind: ArtistClassListKind,
        query: ArtistClassQuery,
        page: Page<ArtistClass>,
    ) {
        if self.core.fulfil(ticket) {
            let list = match kind {
                ArtistClassListKind::All => &mut self.artist_classes,
                ArtistClassListKind::Mine => &mut self.my_artist_classes,
            };
            list.apply(query, page);
        }
    }

    pub fn fulfil_artist_class_detail(&mut self, ticket: Ticket, class: ArtistClass) {
        if self.core.fulfil(ticket) {
            self.artist_class_detail = Some(class);
        }
    }

    pub fn fulfil_signup(&mut self, ticket: Ticket, response: ClassSignupResponse) {
        if self.core.fulfil(ticket) {
            self.signup_res = Some(response);
        }
    }

    pub fn fulfil_video_url(&mut self, ticket: Ticket, response: VideoUrlResponse) {
        if self.core.fulfil(ticket) {
            self.video_url = Some(response);
        }
    }

    pub fn fulfil_payment(&mut self, ticket: Ticket, response: MessageResponse) {
        if self.core.fulfil(ticket) {
            self.payment_res = Some(response);
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

    pub fn contests(&self, kind: ContestListKind) -> &ContestList {
        match kind {
            ContestListKind::All => &self.contests,
            ContestListKind::Mine => &self.my_contests,
        }
    }

    pub fn contest_detail(&self) -> Option<&Contest> {
        self.contest_detail.as_ref()
    }

    pub fn submit_res(&self) -> Option<&MessageResponse> {
        self.submit_res.as_ref()
    }

    pub fn artist_classes(&self, kind: ArtistClassListKind) -> &ArtistClassList {
        match kind {
            ArtistClassListKind::All => &self.artist_classes,
            ArtistClassListKind::Mine => &self.my_artist_classes,
        }
    }

    pub fn artist_class_detail(&self) -> Option<&ArtistClass> {
        self.artist_class_detail.as_ref()
    }

    pub fn signup_res(&self) -> Option<&ClassSignupResponse> {
        self.signup_res.as_ref()
    }

    pub fn video_url(&self) -> Option<&VideoUrlResponse> {
        self.video_url.as_ref()
    }

    pub fn payment_res(&self) -> Option<&MessageResponse> {
        self.payment_res.as_ref()
    }
}
