//! Work endpoints.

use super::{image_part, ApiClient};
use crate::error::Result;
use crate::gate::MAX_IMAGES_PER_WORK;
use museume_types::{
    Category, MessageResponse, NewWork, Page, RecordId, Tag, Work, WorkQuery, WorkUpdate,
    WorkUpdateResponse,
};
use reqwest::multipart::Form;

impl ApiClient {
    pub async fn add_work(&self, work: &NewWork) -> Result<Work> {
        let mut form = Form::new();
        for image in work.images.iter().take(MAX_IMAGES_PER_WORK) {
            form = form.part("images", image_part(image)?);
        }
        form = form
            .text("title", work.title.clone())
            .text("description", work.description.clone())
            .text(
                "category",
                work.category.map(|c| c.to_string()).unwrap_or_default(),
            );
        for tag in &work.tags {
            form = form.text("tags", tag.to_string());
        }
        form = form.text("is_public", work.is_public.to_string());

        self.post_form("/works/", form).await
    }

    pub async fn get_my_works(&self, query: &WorkQuery) -> Result<Page<Work>> {
        self.get_with_query("/works/", query).await
    }

    pub async fn get_public_works(&self, query: &WorkQuery) -> Result<Page<Work>> {
        self.get_with_query("/works/public/", query).await
    }

    pub async fn get_my_collection(&self, query: &WorkQuery) -> Result<Page<Work>> {
        self.get_with_query("/works/my-collection/", query).await
    }

    pub async fn get_family_gallery(&self, query: &WorkQuery) -> Result<Page<Work>> {
        self.get_with_query("/works/family-gallery/", query).await
    }

    pub async fn get_member_work(&self, member_id: RecordId, query: &WorkQuery) -> Result<Page<Work>> {
        self.get_with_query(&format!("/works/member/{}/", member_id), query)
            .await
    }

    pub async fn get_work_detail(&self, id: RecordId) -> Result<Work> {
        self.get(&format!("/works/{}/", id)).await
    }

    /// Partial update: category only when selected, tags only when non-empty,
    /// and only newly attached files.
    pub async fn update_work(&self, id: RecordId, update: &WorkUpdate) -> Result<WorkUpdateResponse> {
        let mut form = Form::new()
            .text("title", update.title.clone())
            .text("description", update.description.clone());
        if let Some(category) = update.category {
            form = form.text("category", category.to_string());
        }
        form = form.text("is_public", update.is_public.to_string());
        for tag in &update.tags {
            form = form.text("tags", tag.to_string());
        }
        for image in &update.new_images {
            form = form.part("images", image_part(image)?);
        }

        self.post_form(&format!("/works/{}/update/", id), form).await
    }

    pub async fn delete_work(&self, id: RecordId) -> Result<MessageResponse> {
        self.delete(&format!("/works/{}/delete/", id)).await
    }

    pub async fn like_work(&self, id: RecordId) -> Result<MessageResponse> {
        self.post_empty(&format!("/works/{}/like/", id)).await
    }

    pub async fn unlike_work(&self, id: RecordId) -> Result<MessageResponse> {
        self.post_empty(&format!("/works/{}/unlike/", id)).await
    }

    pub async fn get_tags(&self) -> Result<Vec<Tag>> {
        self.get("/works/tags/").await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        self.get("/works/categories/").await
    }
}
