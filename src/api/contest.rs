//! Contest endpoints.

use super::ApiClient;
use crate::error::Result;
use museume_types::{Contest, ContestQuery, ContestSubmission, MessageResponse, Page, RecordId};

impl ApiClient {
    pub async fn get_contests(&self, query: &ContestQuery) -> Result<Page<Contest>> {
        self.get_with_query("/contests", query).await
    }

    pub async fn get_contest_detail(&self, id: RecordId) -> Result<Contest> {
        self.get(&format!("/contests/{}", id)).await
    }

    pub async fn get_my_contests(&self, query: &ContestQuery) -> Result<Page<Contest>> {
        self.get_with_query("/contests/my-contests", query).await
    }

    pub async fn submit_contest_work(&self, body: &ContestSubmission) -> Result<MessageResponse> {
        self.post("/contests/submit-work/", body).await
    }
}
