//! User account and admin user management operations

use reqwest::Method;

use super::push_param;
use crate::error::Error;
use crate::model::Record;
use crate::response::ApiResponse;
use crate::StorefrontClient;

/// Handle for user operations.
///
/// Obtained through [`StorefrontClient::users`]. `me`/`update_me` act on
/// the authenticated account; the rest require an admin.
pub struct UsersApi<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl UsersApi<'_> {
    /// Registers a new account.
    ///
    /// The payload carries at least `email`, `username` and `password`.
    /// Registration is open, so this is also how admins create accounts.
    pub async fn register(&self, user: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&user)?;
        self.client
            .send_json(Method::POST, "/auth/register", Some(body))
            .await
    }

    /// Gets the authenticated user's profile.
    pub async fn me(&self) -> Result<ApiResponse<Record>, Error> {
        self.client.get_json("/users/me").await
    }

    /// Updates the authenticated user's profile.
    pub async fn update_me(&self, changes: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&changes)?;
        self.client
            .send_json(Method::PUT, "/users/me", Some(body))
            .await
    }

    /// Lists accounts (admin only).
    pub async fn list(&self, query: UserQuery) -> Result<ApiResponse<Vec<Record>>, Error> {
        let path = format!("/users{}", query.to_query_string());
        self.client.get_json(&path).await
    }

    /// Gets an account by id (admin only).
    pub async fn get(&self, user_id: i64) -> Result<ApiResponse<Record>, Error> {
        self.client.get_json(&format!("/users/{user_id}")).await
    }

    /// Applies partial changes to an account (admin only).
    pub async fn update(&self, user_id: i64, changes: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&changes)?;
        self.client
            .send_json(Method::PUT, &format!("/users/{user_id}"), Some(body))
            .await
    }

    /// Deactivates an account (admin only).
    ///
    /// The service keeps the row and flips `is_active` off.
    pub async fn delete(&self, user_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(Method::DELETE, &format!("/users/{user_id}"), None)
            .await
    }
}

/// Pagination for account listings.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    skip: Option<usize>,
    limit: Option<usize>,
}

impl UserQuery {
    /// Creates an empty query (the service defaults to the first 100).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Page size (the service caps this at 1000).
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_query_string(&self) -> String {
        let mut query = String::new();
        if let Some(skip) = self.skip {
            push_param(&mut query, "skip", &skip.to_string());
        }
        if let Some(limit) = self.limit {
            push_param(&mut query, "limit", &limit.to_string());
        }
        query
    }
}
