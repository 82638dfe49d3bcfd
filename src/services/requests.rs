//! Request board service

use crate::{
    error::AppResult,
    models::request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Post a new borrow request
    pub async fn create_request(
        &self,
        request: CreateItemRequest,
        requester_id: i32,
    ) -> AppResult<ItemRequest> {
        self.repository.users.get_by_id(requester_id).await?;
        let created = self
            .repository
            .requests
            .create(requester_id, &request.description)
            .await?;
        tracing::info!("Request {} posted by user {}", created.id, requester_id);
        Ok(created)
    }

    /// List the caller's own requests, newest first
    pub async fn get_own_requests(&self, caller_id: i32) -> AppResult<Vec<ItemRequest>> {
        self.repository.users.get_by_id(caller_id).await?;
        self.repository.requests.list_by_requester(caller_id).await
    }

    /// List everyone else's requests, newest first
    pub async fn get_other_requests(&self, caller_id: i32) -> AppResult<Vec<ItemRequest>> {
        self.repository.users.get_by_id(caller_id).await?;
        self.repository
            .requests
            .list_by_other_requesters(caller_id)
            .await
    }

    /// Get a request with the items offered in answer to it
    pub async fn get_request(&self, request_id: i32, caller_id: i32) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(caller_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        let items = self.repository.items.list_by_request(request_id).await?;

        Ok(ItemRequestDetails {
            id: request.id,
            description: request.description,
            requester_id: request.requester_id,
            created: request.created,
            items,
        })
    }
}
