use super::{work_slice, Dispatcher, Request};
use crate::error::Result;
use crate::store::work::{
    WorkListKind, WorkSlice, ADD_WORK, DELETE_WORK, GET_CATEGORIES, GET_MEMBER_WORK, GET_TAGS,
    GET_WORK_DETAIL, LIKE_WORK, UNLIKE_WORK, UPDATE_WORK,
};
use museume_types::{
    Category, MessageResponse, NewWork, Page, RecordId, Tag, Work, WorkQuery, WorkUpdate,
    WorkUpdateResponse,
};

impl Dispatcher {
    pub async fn add_work(&self, work: &NewWork) -> Result<Work> {
        self.fetch(
            Request::new(ADD_WORK, work_slice).mutation(),
            self.api.add_work(work),
            WorkSlice::fulfil_add_work,
        )
        .await
    }

    pub async fn get_my_works(&self, query: WorkQuery) -> Result<Page<Work>> {
        self.fetch_works(WorkListKind::Mine, query).await
    }

    /// `query.is_like` marks a refresh after a like toggle: it runs without
    /// the loading flag and replaces the list whatever the page.
    pub async fn get_public_works(&self, query: WorkQuery) -> Result<Page<Work>> {
        self.fetch_works(WorkListKind::Public, query).await
    }

    pub async fn get_my_collection(&self, query: WorkQuery) -> Result<Page<Work>> {
        self.fetch_works(WorkListKind::Collection, query).await
    }

    pub async fn get_family_gallery(&self, query: WorkQuery) -> Result<Page<Work>> {
        self.fetch_works(WorkListKind::FamilyGallery, query).await
    }

    async fn fetch_works(&self, kind: WorkListKind, query: WorkQuery) -> Result<Page<Work>> {
        let query = query.normalized();
        let call = async {
            match kind {
                WorkListKind::Mine => self.api.get_my_works(&query).await,
                WorkListKind::Public => self.api.get_public_works(&query).await,
                WorkListKind::Collection => self.api.get_my_collection(&query).await,
                WorkListKind::FamilyGallery => self.api.get_family_gallery(&query).await,
            }
        };
        let echo = query.clone();
        self.fetch(
            Request::new(kind.request_key(), work_slice).silent(query.is_like),
            call,
            move |slice: &mut WorkSlice, ticket, page| slice.fulfil_list(ticket, kind, echo, page),
        )
        .await
    }

    pub async fn get_member_work(&self, member_id: RecordId, query: WorkQuery) -> Result<Page<Work>> {
        let query = query.normalized();
        self.fetch(
            Request::new(GET_MEMBER_WORK, work_slice),
            self.api.get_member_work(member_id, &query),
            WorkSlice::fulfil_member_work,
        )
        .await
    }

    pub async fn get_work_detail(&self, id: RecordId) -> Result<Work> {
        self.fetch(
            Request::new(GET_WORK_DETAIL, work_slice).silent(true),
            self.api.get_work_detail(id),
            WorkSlice::fulfil_work_detail,
        )
        .await
    }

    pub async fn update_work(&self, id: RecordId, update: &WorkUpdate) -> Result<WorkUpdateResponse> {
        self.mutate(
            Request::new(UPDATE_WORK, work_slice),
            self.api.update_work(id, update),
            WorkSlice::fulfil_update,
            "Work updated successfully",
        )
        .await
    }

    pub async fn delete_work(&self, id: RecordId) -> Result<MessageResponse> {
        self.mutate(
            Request::new(DELETE_WORK, work_slice),
            self.api.delete_work(id),
            move |slice: &mut WorkSlice, ticket, _| slice.fulfil_delete(ticket, id),
            "Work deleted successfully",
        )
        .await
    }

    pub async fn like_work(&self, id: RecordId) -> Result<MessageResponse> {
        self.fetch(
            Request::new(LIKE_WORK, work_slice).silent(true).mutation(),
            self.api.like_work(id),
            move |slice: &mut WorkSlice, ticket, _| slice.fulfil_like(ticket, id, true),
        )
        .await
    }

    pub async fn unlike_work(&self, id: RecordId) -> Result<MessageResponse> {
        self.fetch(
            Request::new(UNLIKE_WORK, work_slice).silent(true).mutation(),
            self.api.unlike_work(id),
            move |slice: &mut WorkSlice, ticket, _| slice.fulfil_like(ticket, id, false),
        )
        .await
    }

    pub async fn get_tags(&self) -> Result<Vec<Tag>> {
        self.fetch(
            Request::new(GET_TAGS, work_slice),
            self.api.get_tags(),
            WorkSlice::fulfil_tags,
        )
        .await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        self.fetch(
            Request::new(GET_CATEGORIES, work_slice),
            self.api.get_categories(),
            WorkSlice::fulfil_categories,
        )
        .await
    }

    /// Clear `delete_work_res`, `edit_res` and the error.
    pub fn reset_work_state(&self) {
        self.store.update(|s| s.work.reset_flags());
    }
}
