//! Work slice: the member's works, public and family galleries, the liked
//! collection, tag/category lookups, and the current detail record.

use super::accumulator::Accumulator;
use super::lifecycle::{Lifecycle, RequestKey, SliceCore, Ticket};
use museume_types::{Category, Page, RecordId, Tag, Work, WorkQuery, WorkUpdateResponse};

pub const ADD_WORK: RequestKey = "work/addWork";
pub const GET_MY_WORKS: RequestKey = "work/getMyWorks";
pub const GET_TAGS: RequestKey = "work/getTags";
pub const GET_CATEGORIES: RequestKey = "work/getCategories";
pub const GET_PUBLIC_WORKS: RequestKey = "work/getPublicWorks";
pub const GET_MY_COLLECTION: RequestKey = "work/getMyCollection";
pub const GET_MEMBER_WORK: RequestKey = "work/getMemberWork";
pub const LIKE_WORK: RequestKey = "work/likeWork";
pub const UNLIKE_WORK: RequestKey = "work/unlikeWork";
pub const GET_WORK_DETAIL: RequestKey = "work/workDetail";
pub const GET_FAMILY_GALLERY: RequestKey = "work/getFamilyGallery";
pub const DELETE_WORK: RequestKey = "work/deleteWork";
pub const UPDATE_WORK: RequestKey = "work/updateWork";

pub type WorkList = Accumulator<Work, WorkQuery>;

/// Which accumulated work list a fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkListKind {
    Mine,
    Public,
    Collection,
    FamilyGallery,
}

impl WorkListKind {
    pub fn request_key(self) -> RequestKey {
        match self {
            WorkListKind::Mine => GET_MY_WORKS,
            WorkListKind::Public => GET_PUBLIC_WORKS,
            WorkListKind::Collection => GET_MY_COLLECTION,
            WorkListKind::FamilyGallery => GET_FAMILY_GALLERY,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct WorkSlice {
    core: SliceCore,
    add_work_res: Option<Work>,
    works: WorkList,
    public_works: WorkList,
    my_collection: WorkList,
    family_gallery: WorkList,
    member_work: Option<Page<Work>>,
    work_detail: Option<Work>,
    tags: Vec<Tag>,
    categories: Vec<Category>,
    delete_work_res: bool,
    edit_res: bool,
    last_update: Option<WorkUpdateResponse>,
}

impl Lifecycle for WorkSlice {
    fn core_mut(&mut self) -> &mut SliceCore {
        &mut self.core
    }
}

impl WorkSlice {
    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    pub fn fulfil_add_work(&mut self, ticket: Ticket, work: Work) {
        if self.core.fulfil(ticket) {
            self.add_work_res = Some(work);
        }
    }

    pub fn fulfil_list(&mut self, ticket: Ticket, kind: WorkListKind, query: WorkQuery, page: Page<Work>) {
        if self.core.fulfil(ticket) {
            self.list_mut(kind).apply(query, page);
        }
    }

    pub fn fulfil_member_work(&mut self, ticket: Ticket, page: Page<Work>) {
        if self.core.fulfil(ticket) {
            self.member_work = Some(page);
        }
    }

    pub fn fulfil_tags(&mut self, ticket: Ticket, tags: Vec<Tag>) {
        if self.core.fulfil(ticket) {
            self.tags = tags;
        }
    }

    pub fn fulfil_categories(&mut self, ticket: Ticket, categories: Vec<Category>) {
        if self.core.fulfil(ticket) {
            self.categories = categories;
        }
    }

    pub fn fulfil_work_detail(&mut self, ticket: Ticket, work: Work) {
        if self.core.fulfil(ticket) {
            self.work_detail = Some(work);
        }
    }

    /// Server confirmed a like/unlike; mirror it into every cached copy.
    pub fn fulfil_like(&mut self, ticket: Ticket, id: RecordId, liked: bool) {
        if !self.core.fulfil(ticket) {
            return;
        }
        let toggle = |work: &mut Work| {
            if work.id == id && work.is_liked_by_user != liked {
                work.is_liked_by_user = liked;
                work.likes_count = if liked {
                    work.likes_count + 1
                } else {
                    work.likes_count.saturating_sub(1)
                };
            }
        };
        for list in self.lists_mut() {
            list.for_each_mut(toggle);
        }
        if let Some(page) = &mut self.member_work {
            page.results.iter_mut().for_each(toggle);
        }
        if let Some(detail) = &mut self.work_detail {
            toggle(detail);
        }
    }

    /// Removes `id` from every cached list independently; lists that never
    /// held it are left as they are.
    pub fn fulfil_delete(&mut self, ticket: Ticket, id: RecordId) {
        if !self.core.fulfil(ticket) {
            return;
        }
        self.delete_work_res = true;
        for list in self.lists_mut() {
            list.remove_where(|w| w.id == id);
        }
        if let Some(page) = &mut self.member_work {
            page.results.retain(|w| w.id != id);
        }
        if self.work_detail.as_ref().map(|w| w.id) == Some(id) {
            self.work_detail = None;
        }
    }

    pub fn fulfil_update(&mut self, ticket: Ticket, response: WorkUpdateResponse) {
        if !self.core.fulfil(ticket) {
            return;
        }
        self.edit_res = true;
        if let Some(updated) = &response.work {
            let replace = |work: &mut Work| {
                if work.id == updated.id {
                    *work = updated.clone();
                }
            };
            for list in self.lists_mut() {
                list.for_each_mut(replace);
            }
            if self.work_detail.as_ref().map(|w| w.id) == Some(updated.id) {
                self.work_detail = Some(updated.clone());
            }
        }
        self.last_update = Some(response);
    }

    /// Clears the one-shot result flags after a page has acted on them.
    pub fn reset_flags(&mut self) {
        self.delete_work_res = false;
        self.edit_res = false;
        self.core.clear_error();
    }

    /// Forget the last created work (the add form consumed it).
    pub fn clear_add_work_res(&mut self) {
        self.add_work_res = None;
    }

    fn list_mut(&mut self, kind: WorkListKind) -> &mut WorkList {
        match kind {
            WorkListKind::Mine => &mut self.works,
            WorkListKind::Public => &mut self.public_works,
            WorkListKind::Collection => &mut self.my_collection,
            WorkListKind::FamilyGallery => &mut self.family_gallery,
        }
    }

    fn lists_mut(&mut self) -> [&mut WorkList; 4] {
        [
            &mut self.works,
            &mut self.public_works,
            &mut self.my_collection,
            &mut self.family_gallery,
        ]
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn core(&self) -> &SliceCore {
        &self.core
    }

    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.core.error()
    }

    pub fn list(&self, kind: WorkListKind) -> &WorkList {
        match kind {
            WorkListKind::Mine => &self.works,
            WorkListKind::Public => &self.public_works,
            WorkListKind::Collection => &self.my_collection,
            WorkListKind::FamilyGallery => &self.family_gallery,
        }
    }

    pub fn add_work_res(&self) -> Option<&Work> {
        self.add_work_res.as_ref()
    }

    pub fn member_work(&self) -> Option<&Page<Work>> {
        self.member_work.as_ref()
    }

    pub fn work_detail(&self) -> Option<&Work> {
        self.work_detail.as_ref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn delete_work_res(&self) -> bool {
        self.delete_work_res
    }

    pub fn edit_res(&self) -> bool {
        self.edit_res
    }

    pub fn last_update(&self) -> Option<&WorkUpdateResponse> {
        self.last_update.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(id: RecordId) -> Work {
        Work {
            id,
            title: Some(format!("work {}", id)),
            description: None,
            member: None,
            is_public: true,
            price: None,
            tags: vec![],
            category: None,
            images_data: vec![],
            likes_count: 0,
            is_liked_by_user: false,
        }
    }

    fn page(ids: &[RecordId], next: Option<&str>) -> Page<Work> {
        Page {
            count: ids.len() as u64,
            next: next.map(str::to_string),
            previous: None,
            results: ids.iter().copied().map(work).collect(),
        }
    }

    fn ids(list: &WorkList) -> Vec<RecordId> {
        list.results().iter().map(|w| w.id).collect()
    }

    fn load(slice: &mut WorkSlice, kind: WorkListKind, ids: &[RecordId]) {
        let t = slice.begin(kind.request_key(), false);
        slice.fulfil_list(t, kind, WorkQuery::page(1), page(ids, None));
    }

    #[test]
    fn delete_removes_id_from_every_list_holding_it() {
        let mut slice = WorkSlice::default();
        load(&mut slice, WorkListKind::Mine, &[1, 2, 3]);
        load(&mut slice, WorkListKind::FamilyGallery, &[2, 4]);
        load(&mut slice, WorkListKind::Public, &[5]);

        let t = slice.begin_mutation(DELETE_WORK, false);
        slice.fulfil_delete(t, 2);

        assert!(slice.delete_work_res());
        assert_eq!(ids(slice.list(WorkListKind::Mine)), vec![1, 3]);
        assert_eq!(ids(slice.list(WorkListKind::FamilyGallery)), vec![4]);
        assert_eq!(ids(slice.list(WorkListKind::Public)), vec![5]);
        assert!(slice.error().is_none());
    }

    #[test]
    fn overlapping_deletes_each_apply() {
        let mut slice = WorkSlice::default();
        load(&mut slice, WorkListKind::Mine, &[1, 2, 3]);

        let first = slice.begin_mutation(DELETE_WORK, false);
        let second = slice.begin_mutation(DELETE_WORK, false);
        slice.fulfil_delete(first, 1);
        slice.fulfil_delete(second, 2);

        assert_eq!(ids(slice.list(WorkListKind::Mine)), vec![3]);
    }

    #[test]
    fn rejected_delete_leaves_lists_untouched() {
        let mut slice = WorkSlice::default();
        load(&mut slice, WorkListKind::Mine, &[1, 2]);

        let t = slice.begin_mutation(DELETE_WORK, false);
        slice.reject(t, "Work not found");

        assert!(!slice.delete_work_res());
        assert_eq!(slice.error(), Some("Work not found"));
        assert!(!slice.is_loading());
        assert_eq!(ids(slice.list(WorkListKind::Mine)), vec![1, 2]);
    }

    #[test]
    fn like_updates_cached_copies() {
        let mut slice = WorkSlice::default();
        load(&mut slice, WorkListKind::Public, &[7, 8]);

        let t = slice.begin_mutation(LIKE_WORK, true);
        slice.fulfil_like(t, 7, true);
        let liked = &slice.list(WorkListKind::Public).results()[0];
        assert!(liked.is_liked_by_user);
        assert_eq!(liked.likes_count, 1);

        let other = slice.begin_mutation(LIKE_WORK, true);
        let t = slice.begin_mutation(LIKE_WORK, true);
        slice.fulfil_like(other, 8, true);
        slice.fulfil_like(t, 7, true);
        assert!(slice.list(WorkListKind::Public).results()[1].is_liked_by_user);

        // Confirming the same state twice does not double count.
        let t = slice.begin_mutation(LIKE_WORK, true);
        slice.fulfil_like(t, 7, true);
        assert_eq!(slice.list(WorkListKind::Public).results()[0].likes_count, 1);
    }

    #[test]
    fn update_sets_edit_flag_and_reset_clears_it() {
        let mut slice = WorkSlice::default();
        load(&mut slice, WorkListKind::Mine, &[1]);

        let mut updated = work(1);
        updated.title = Some("renamed".into());
        let t = slice.begin_mutation(UPDATE_WORK, false);
        slice.fulfil_update(
            t,
            WorkUpdateResponse {
                message: Some("Work updated successfully".into()),
                work: Some(updated),
            },
        );
        assert!(slice.edit_res());
        assert_eq!(
            slice.list(WorkListKind::Mine).results()[0].title.as_deref(),
            Some("renamed")
        );

        slice.reset_flags();
        assert!(!slice.edit_res());
        assert!(!slice.delete_work_res());
    }

    #[test]
    fn stale_list_response_is_dropped() {
        let mut slice = WorkSlice::default();
        let slow = slice.begin(GET_MY_WORKS, false);
        let fast = slice.begin(GET_MY_WORKS, false);

        slice.fulfil_list(fast, WorkListKind::Mine, WorkQuery::page(1).with_search("new"), page(&[2], None));
        slice.fulfil_list(slow, WorkListKind::Mine, WorkQuery::page(1).with_search("old"), page(&[1], None));

        assert_eq!(ids(slice.list(WorkListKind::Mine)), vec![2]);
    }
}
