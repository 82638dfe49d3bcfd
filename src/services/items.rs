//! Item catalog service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::item::{CreateItem, Item, ItemDetails, UpdateItem},
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List the caller's items
    pub async fn get_user_items(&self, owner_id: i32) -> AppResult<Vec<Item>> {
        self.repository.items.list_by_owner(owner_id).await
    }

    /// Get an item with its comments. The owner additionally sees the end of
    /// the last approved booking and the start of the next one.
    pub async fn get_item(&self, item_id: i32, caller_id: i32) -> AppResult<ItemDetails> {
        let item = self.repository.items.get_by_id(item_id).await?;
        let comments = self.repository.comments.list_for_item(item_id).await?;

        let (last_booking, next_booking) = if item.owner_id == caller_id {
            let now = Utc::now();
            (
                self.repository.bookings.last_booking_end(item_id, now).await?,
                self.repository.bookings.next_booking_start(item_id, now).await?,
            )
        } else {
            (None, None)
        };

        Ok(ItemDetails {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        })
    }

    /// Search available items by text; empty text yields nothing
    pub async fn search_items(&self, text: &str) -> AppResult<Vec<Item>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.items.search(text).await
    }

    /// List a new item, optionally in answer to a request
    pub async fn create_item(&self, item: CreateItem, owner_id: i32) -> AppResult<Item> {
        self.repository.users.get_by_id(owner_id).await?;
        if let Some(request_id) = item.request_id {
            // The answered request must exist
            self.repository.requests.get_by_id(request_id).await?;
        }
        let created = self.repository.items.create(owner_id, &item).await?;
        tracing::info!("Item {} listed by user {}", created.id, owner_id);
        Ok(created)
    }

    /// Partially update an item; only its owner may do so
    pub async fn update_item(
        &self,
        item_id: i32,
        update: UpdateItem,
        caller_id: i32,
    ) -> AppResult<Item> {
        let item = self
            .repository
            .items
            .get_by_id_and_owner(item_id, caller_id)
            .await?;

        let name = update.name.unwrap_or(item.name);
        let description = update.description.unwrap_or(item.description);
        let available = update.available.unwrap_or(item.available);

        self.repository
            .items
            .update(item_id, &name, &description, available)
            .await
    }

    /// Delete an item by ID
    pub async fn delete_item(&self, item_id: i32) -> AppResult<()> {
        self.repository.items.delete(item_id).await
    }
}
