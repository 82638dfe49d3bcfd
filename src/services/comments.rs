//! Comment ledger service
//!
//! A user may comment on an item only with proof of rental: at least one of
//! their bookings of that item must have ended.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::comment::{CommentDetails, CreateComment},
    repository::Repository,
};

#[derive(Clone)]
pub struct CommentsService {
    repository: Repository,
}

impl CommentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Leave a comment on an item the author has rented in the past
    pub async fn add_comment(
        &self,
        item_id: i32,
        author_id: i32,
        comment: CreateComment,
    ) -> AppResult<CommentDetails> {
        let item = self.repository.items.get_by_id(item_id).await?;
        let author = self.repository.users.get_by_id(author_id).await?;

        if !self
            .repository
            .bookings
            .exists_for_item_and_booker(item.id, author.id)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "No booking of item {} by user {} found",
                item_id, author_id
            )));
        }

        let now = Utc::now();
        if !self
            .repository
            .bookings
            .ended_exists_for_item_and_booker(item.id, author.id, now)
            .await?
        {
            return Err(AppError::BusinessRule(
                "Comments are allowed only after the rental period has ended".to_string(),
            ));
        }

        let created = self
            .repository
            .comments
            .create(item.id, author.id, &comment.text, now)
            .await?;
        tracing::info!("Comment {} added on item {} by user {}", created.id, item_id, author_id);
        Ok(created)
    }
}
