//! User registry service

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, user_id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// Register a new user; email must be unique
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        if self.repository.users.email_exists(&user.email, None).await? {
            return Err(AppError::Conflict(format!(
                "A user with email {} already exists",
                user.email
            )));
        }
        let created = self.repository.users.create(&user).await?;
        tracing::info!("User {} registered", created.id);
        Ok(created)
    }

    /// Partially update a user's profile
    pub async fn update_user(&self, user_id: i32, update: UpdateUser) -> AppResult<User> {
        let user = self.repository.users.get_by_id(user_id).await?;

        let email = update.email.unwrap_or(user.email);
        if self
            .repository
            .users
            .email_exists(&email, Some(user_id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A user with email {} already exists",
                email
            )));
        }
        let name = update.name.unwrap_or(user.name);

        self.repository.users.update(user_id, &name, &email).await
    }

    /// Delete a user by ID
    pub async fn delete_user(&self, user_id: i32) -> AppResult<()> {
        self.repository.users.delete(user_id).await
    }
}
