//! Review operations and moderation

use reqwest::Method;

use super::push_param;
use crate::error::Error;
use crate::model::Record;
use crate::response::ApiResponse;
use crate::StorefrontClient;

/// Handle for review operations.
///
/// Obtained through [`StorefrontClient::reviews`]. Moderation calls
/// (`list_all`, `approve`, `reject`, `admin_delete`) require a moderator
/// or admin account.
pub struct ReviewsApi<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl ReviewsApi<'_> {
    /// Creates a review for a purchased product.
    ///
    /// The payload carries `product_id`, `rating` and optionally `title`
    /// and `comment`. New reviews start unapproved.
    pub async fn create(&self, review: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&review)?;
        self.client
            .send_json(Method::POST, "/reviews", Some(body))
            .await
    }

    /// Lists the approved reviews for a product, newest first.
    pub async fn for_product(&self, product_id: i64) -> Result<ApiResponse<Vec<Record>>, Error> {
        self.client.get_json(&format!("/reviews/{product_id}")).await
    }

    /// Updates one of the authenticated user's own reviews.
    pub async fn update(&self, review_id: i64, changes: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&changes)?;
        self.client
            .send_json(Method::PUT, &format!("/reviews/{review_id}"), Some(body))
            .await
    }

    /// Deletes one of the authenticated user's own reviews.
    pub async fn delete(&self, review_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(Method::DELETE, &format!("/reviews/{review_id}"), None)
            .await
    }

    /// Lists reviews across all products, newest first (moderator only).
    ///
    /// Each record carries the reviewed product inline as `product` plus a
    /// flattened `product_name`.
    pub async fn list_all(&self, query: ReviewQuery) -> Result<ApiResponse<Vec<Record>>, Error> {
        let path = format!("/admin/reviews{}", query.to_query_string());
        self.client.get_json(&path).await
    }

    /// Marks a review approved so it shows on the product page (moderator only).
    pub async fn approve(&self, review_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(
                Method::PUT,
                &format!("/admin/reviews/{review_id}/approve"),
                None,
            )
            .await
    }

    /// Marks a review rejected, hiding it from the product page (moderator only).
    pub async fn reject(&self, review_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(
                Method::PUT,
                &format!("/admin/reviews/{review_id}/reject"),
                None,
            )
            .await
    }

    /// Deletes any review regardless of author (moderator only).
    pub async fn admin_delete(&self, review_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(Method::DELETE, &format!("/admin/reviews/{review_id}"), None)
            .await
    }
}

/// Pagination and approval filter for moderation listings.
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    skip: Option<usize>,
    limit: Option<usize>,
    approved: Option<bool>,
}

impl ReviewQuery {
    /// Creates an empty query (the service defaults to the first 100).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reviews to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Page size (the service caps this at 200).
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters to approved (`true`) or pending/rejected (`false`) reviews.
    pub fn approved(mut self, approved: bool) -> Self {
        self.approved = Some(approved);
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
        if let Some(approved) = self.approved {
            push_param(&mut query, "approved", &approved.to_string());
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_query_string() {
        let query = ReviewQuery::new().limit(50).approved(false);
        assert_eq!(query.to_query_string(), "?limit=50&approved=false");
    }
}
